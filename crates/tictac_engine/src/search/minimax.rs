//! Exhaustive minimax over the remaining game tree.
//!
//! No pruning, no transposition table, no depth limit: a 3x3 board keeps the
//! full tree small enough to walk on every call.
//!
//! Two behaviours are deliberate and observable:
//!
//! - a move that wins on the spot is returned immediately, even if a later
//!   candidate would also win;
//! - among equally scored continuations the longer one is preferred, so a
//!   lost or drawn position is dragged out as long as possible.

use crate::board::pretty_cells;
use crate::types::{Cell, Outcome, Player, PlayerId};
use crate::variant::GameRules;
use derive_more::{Display, Error};
use serde::Serialize;
use std::collections::VecDeque;
use std::ops::Neg;
use tracing::{instrument, trace};

/// Evaluation of a position from one player's point of view.
///
/// Serializes as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(into = "i8")]
pub enum Score {
    /// Another player wins.
    #[display("-1")]
    Loss = -1,
    /// Nobody wins.
    #[display("0")]
    Tie = 0,
    /// The evaluated player wins.
    #[display("1")]
    Win = 1,
}

impl Score {
    /// Numeric value: -1, 0 or 1.
    pub fn value(self) -> i8 {
        self as i8
    }
}

impl From<Score> for i8 {
    fn from(score: Score) -> i8 {
        score.value()
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Loss => Score::Win,
            Score::Tie => Score::Tie,
            Score::Win => Score::Loss,
        }
    }
}

/// Ordered cell indices, root move first.
pub type MoveSequence = VecDeque<usize>;

/// Best line found for the player to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveCandidate {
    score: Score,
    moves: MoveSequence,
}

impl MoveCandidate {
    fn single(score: Score, cell: usize) -> Self {
        Self {
            score,
            moves: VecDeque::from([cell]),
        }
    }

    /// Evaluation for the player the search ran for.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Predicted moves for every player until the game ends.
    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }

    /// Consumes the candidate, returning its move sequence.
    pub fn into_moves(self) -> MoveSequence {
        self.moves
    }
}

/// Search failures. Both indicate a rules defect rather than bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// No candidate found: a non-terminal position offered no legal move.
    #[display("Could not find best move for player {acting}")]
    Exhausted {
        /// Player the search ran for.
        acting: PlayerId,
    },
    /// A finished search produced an empty move sequence.
    #[display("Search for player {acting} produced no move to make")]
    NoMoveToMake {
        /// Player the search ran for.
        acting: PlayerId,
    },
}

/// Copies `cells` with `player` owning `index`.
pub fn pretend_move(cells: &[Cell], index: usize, player: &Player) -> Vec<Cell> {
    let mut copy = cells.to_vec();
    copy[index].set_owner(Some(*player));
    copy
}

/// Terminal evaluation of `cells` for `acting`, who has just moved.
///
/// The tester is told the previous player in turn order moved last, which is
/// what makes completing a line a loss in the only-X variant. Returns `None`
/// while the game goes on.
pub fn evaluate(rules: &GameRules<'_>, cells: &mut [Cell], acting: &Player) -> Option<Score> {
    let previous = rules.previous_player(acting);
    match rules.test_win(cells, &previous)? {
        Outcome::Winner(winner) if winner == *acting => Some(Score::Win),
        Outcome::Tie => Some(Score::Tie),
        Outcome::Winner(_) => Some(Score::Loss),
    }
}

/// Finds the best move sequence for `acting` from `cells`.
///
/// # Errors
///
/// Returns [`SearchError::Exhausted`] when no legal move exists; callers
/// should not search positions the win tester already classifies as over.
#[instrument(level = "trace", skip(rules, cells), fields(acting = %acting.id()))]
pub fn expand(
    rules: &GameRules<'_>,
    cells: &[Cell],
    acting: &Player,
) -> Result<MoveCandidate, SearchError> {
    let mut best: Option<MoveCandidate> = None;

    for index in rules.legal_moves(cells) {
        let mut after = pretend_move(cells, index, acting);

        if let Some(score) = evaluate(rules, &mut after, acting) {
            trace!(
                acting = %acting.id(),
                %score,
                "Terminal move\n{}",
                pretty_cells(&after, Some(index))
            );
            if score == Score::Win {
                return Ok(MoveCandidate::single(score, index));
            }
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(MoveCandidate::single(score, index));
            }
            continue;
        }

        let next = rules.next_player(acting);
        let reply = expand(rules, &after, &next)?;
        let score = if next == *acting {
            reply.score
        } else {
            -reply.score
        };

        let replaces = best.as_ref().is_none_or(|b| {
            score > b.score || (score == b.score && reply.moves.len() > b.moves.len())
        });
        if replaces {
            trace!(
                acting = %acting.id(),
                %score,
                length = reply.moves.len() + 1,
                "New best expanded move\n{}",
                pretty_cells(&after, Some(index))
            );
            let mut moves = reply.moves;
            moves.push_front(index);
            best = Some(MoveCandidate { score, moves });
        }
    }

    best.ok_or(SearchError::Exhausted {
        acting: acting.id(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::types::PlayerSymbol;
    use crate::variant::Variant;

    fn setup() -> (Variant, Roster) {
        let variant = Variant::standard();
        let roster = Roster::new(variant.default_players().to_vec()).expect("valid roster");
        (variant, roster)
    }

    fn cells_with(owners: &[(usize, Player)]) -> Vec<Cell> {
        let mut cells: Vec<Cell> = (0..9).map(Cell::new).collect();
        for (index, player) in owners {
            cells[*index].set_owner(Some(*player));
        }
        cells
    }

    #[test]
    fn test_score_negation_and_order() {
        assert_eq!(-Score::Win, Score::Loss);
        assert_eq!(-Score::Tie, Score::Tie);
        assert!(Score::Loss < Score::Tie && Score::Tie < Score::Win);
        assert_eq!(Score::Loss.value(), -1);
    }

    #[test]
    fn test_pretend_move_leaves_source_untouched() {
        let cells = cells_with(&[]);
        let player = Player::new(1, PlayerSymbol::O);
        let after = pretend_move(&cells, 3, &player);
        assert!(cells[3].is_empty());
        assert!(after[3].is_owned_by(&player));
    }

    #[test]
    fn test_evaluate_maps_outcomes() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.players()[0];
        let b = roster.players()[1];

        let mut won = cells_with(&[(0, a), (1, a), (2, a)]);
        assert_eq!(evaluate(&rules, &mut won, &a), Some(Score::Win));
        assert_eq!(evaluate(&rules, &mut won, &b), Some(Score::Loss));

        let mut open = cells_with(&[(0, a)]);
        assert_eq!(evaluate(&rules, &mut open, &a), None);
    }

    #[test]
    fn test_blocks_immediate_threat() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.players()[0];
        let b = roster.players()[1];
        // b threatens 6 on the left column; blocking there also forks for a.
        let cells = cells_with(&[(0, b), (3, b), (4, a), (8, a)]);

        let best = expand(&rules, &cells, &a).expect("search succeeds");
        assert_eq!(best.score(), Score::Win);
        assert_eq!(best.moves(), &VecDeque::from([6, 1, 2]));
    }

    #[test]
    fn test_full_board_is_exhausted() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.players()[0];
        let b = roster.players()[1];
        let owners: Vec<(usize, Player)> = [a, b, a, a, b, b, b, a, a]
            .into_iter()
            .enumerate()
            .collect();
        let cells = cells_with(&owners);

        assert_eq!(
            expand(&rules, &cells, &a),
            Err(SearchError::Exhausted { acting: a.id() })
        );
    }
}
