//! Agent that searches the full tree on every move.

use super::{Agent, AgentError};
use crate::board::Board;
use crate::search::{SearchError, expand};
use crate::types::Player;
use crate::variant::GameRules;
use tracing::{debug, instrument};

/// Stateless minimax opponent.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    name: String,
}

impl MinimaxAgent {
    /// Creates the agent.
    pub fn new() -> Self {
        Self {
            name: "Minimax AI".to_string(),
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Agent for MinimaxAgent {
    #[instrument(skip(self, board, rules), fields(agent = %self.name, player = %as_player.id()))]
    async fn get_move(
        &mut self,
        board: &Board,
        as_player: &Player,
        rules: &GameRules<'_>,
    ) -> Result<usize, AgentError> {
        let best = expand(rules, board.cells(), as_player)?;
        debug!(score = %best.score(), line = ?best.moves(), "Search finished");
        let cell = best
            .moves()
            .front()
            .copied()
            .ok_or(SearchError::NoMoveToMake {
                acting: as_player.id(),
            })?;
        Ok(cell)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        &self.name
    }
}
