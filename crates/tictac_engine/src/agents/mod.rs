//! Computer opponents.
//!
//! Every agent answers the same question: given a board and the player it is
//! acting for, which cell should be claimed next. Agents never mutate the
//! board; the caller commits the returned cell.

mod commentary;
mod memoized;
mod minimax;
mod random;

pub use commentary::{Commentary, LogCommentary, RemarkCategory};
pub use memoized::MemoizedMinimaxAgent;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;

use crate::board::Board;
use crate::search::SearchError;
use crate::types::{Outcome, Player, PlayerId};
use crate::variant::GameRules;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

/// Errors an agent can return instead of a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum AgentError {
    /// Search failed.
    #[display("Search failed: {_0}")]
    Search(SearchError),
    /// The position offers no legal move.
    #[display("No legal moves for player {acting}")]
    #[from(ignore)]
    NoLegalMoves {
        /// Player the agent acted for.
        acting: PlayerId,
    },
    /// The source of moves went away.
    #[display("Move input closed")]
    #[from(ignore)]
    InputClosed,
}

/// Shipped agent implementations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AgentKind {
    /// Uniformly random legal move.
    Random,
    /// Full minimax search on every move.
    Minimax,
    /// Minimax that replays its predicted line while the opponent follows it.
    MemoizedMinimax,
}

impl AgentKind {
    /// Builds a fresh agent of this kind.
    pub fn build(self) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::new()),
            AgentKind::Minimax => Box::new(MinimaxAgent::new()),
            AgentKind::MemoizedMinimax => Box::new(MemoizedMinimaxAgent::new()),
        }
    }
}

/// A source of moves.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Chooses a cell for `as_player` on `board`.
    ///
    /// Returns the row-major index of the chosen cell.
    async fn get_move(
        &mut self,
        board: &Board,
        as_player: &Player,
        rules: &GameRules<'_>,
    ) -> Result<usize, AgentError>;

    /// Forgets everything learned during the current game.
    fn reset(&mut self);

    /// Returns the agent's display name.
    fn name(&self) -> &str;

    /// Called once a game this agent played in has finished.
    fn game_over(&mut self, _outcome: &Outcome, _as_player: &Player) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_agent_kind_names() {
        assert_eq!(AgentKind::MemoizedMinimax.to_string(), "memoized-minimax");
        assert_eq!("minimax".parse::<AgentKind>().ok(), Some(AgentKind::Minimax));
    }

    #[test]
    fn test_every_kind_builds_a_named_agent() {
        for kind in AgentKind::iter() {
            assert!(!kind.build().name().is_empty());
        }
    }
}
