//! Human seat fed by lines of text.

use crate::orchestrator::GameEvent;
use derive_more::{Display, Error};
use std::sync::Arc;
use tictac_engine::{Agent, AgentError, Board, GameRules, Move, Player};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument, warn};

/// Shared source of typed lines; every human seat reads from the same input.
pub type InputLines = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Why a typed line is not a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Not a number or a coordinate pair.
    #[display("Could not read \"{_0}\", type a cell number or \"x y\"")]
    Unreadable(#[error(not(source))] String),
    /// Number outside the board.
    #[display("There is no cell {number}, pick 1 to {cells}")]
    NoSuchCell {
        /// Number typed.
        number: usize,
        /// Cells on the board.
        cells: usize,
    },
    /// Coordinate outside the board.
    #[display("({x}, {y}) is outside the board")]
    OutsideBoard {
        /// Column typed.
        x: usize,
        /// Row typed.
        y: usize,
    },
    /// Cell already owned.
    #[display("Cell {_0} is already taken")]
    Taken(#[error(not(source))] usize),
}

/// Reads a move from one line of input.
///
/// A single number is the 1-based cell shown on the rendered board; two
/// numbers are a zero-based `x y` coordinate. Returns the zero-based cell
/// index of an empty cell.
pub fn parse_move_input(line: &str, board: &Board, player: &Player) -> Result<usize, InputError> {
    let numbers: Vec<usize> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse::<usize>)
        .collect::<Result<_, _>>()
        .map_err(|_| InputError::Unreadable(line.trim().to_string()))?;

    let cell = match numbers.as_slice() {
        [number] => {
            let cells = board.cells().len();
            if *number == 0 || *number > cells {
                return Err(InputError::NoSuchCell {
                    number: *number,
                    cells,
                });
            }
            number - 1
        }
        [x, y] => board
            .index_of(*x, *y)
            .map_err(|_| InputError::OutsideBoard { x: *x, y: *y })?,
        _ => return Err(InputError::Unreadable(line.trim().to_string())),
    };

    if !board.is_move_legal(&Move::new(cell, *player)) {
        return Err(InputError::Taken(cell + 1));
    }
    Ok(cell)
}

/// Human player answering with typed lines.
///
/// Unusable lines are reported as [`GameEvent::Rejected`] and the next line
/// is read.
pub struct HumanPlayer {
    name: String,
    input: InputLines,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl HumanPlayer {
    /// Creates a human seat.
    pub fn new(
        name: impl Into<String>,
        input: InputLines,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            event_tx,
        }
    }
}

#[async_trait::async_trait]
impl Agent for HumanPlayer {
    #[instrument(skip(self, board, _rules), fields(human = %self.name, player = %as_player.id()))]
    async fn get_move(
        &mut self,
        board: &Board,
        as_player: &Player,
        _rules: &GameRules<'_>,
    ) -> Result<usize, AgentError> {
        let mut input = self.input.lock().await;
        while let Some(line) = input.recv().await {
            match parse_move_input(&line, board, as_player) {
                Ok(cell) => {
                    debug!(cell, "Human chose cell");
                    return Ok(cell);
                }
                Err(e) => {
                    warn!(error = %e, "Rejected input");
                    let _ = self.event_tx.send(GameEvent::Rejected {
                        player: *as_player,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Err(AgentError::InputClosed)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_engine::PlayerSymbol;

    fn board_with_center_taken() -> (Board, Player) {
        let player = Player::new(1, PlayerSymbol::O);
        let mut board = Board::default();
        board
            .set_owner(4, Some(Player::new(2, PlayerSymbol::X)))
            .expect("in range");
        (board, player)
    }

    #[test]
    fn test_parses_one_based_cell_number() {
        let (board, player) = board_with_center_taken();
        assert_eq!(parse_move_input("1", &board, &player), Ok(0));
        assert_eq!(parse_move_input(" 9 \n", &board, &player), Ok(8));
    }

    #[test]
    fn test_parses_coordinates() {
        let (board, player) = board_with_center_taken();
        assert_eq!(parse_move_input("2 1", &board, &player), Ok(5));
        assert_eq!(parse_move_input("0,2", &board, &player), Ok(6));
    }

    #[test]
    fn test_rejects_bad_input() {
        let (board, player) = board_with_center_taken();
        assert_eq!(
            parse_move_input("5", &board, &player),
            Err(InputError::Taken(5))
        );
        assert!(matches!(
            parse_move_input("10", &board, &player),
            Err(InputError::NoSuchCell { number: 10, .. })
        ));
        assert!(matches!(
            parse_move_input("3 0", &board, &player),
            Err(InputError::OutsideBoard { x: 3, y: 0 })
        ));
        assert!(matches!(
            parse_move_input("centre", &board, &player),
            Err(InputError::Unreadable(_))
        ));
        assert!(matches!(
            parse_move_input("", &board, &player),
            Err(InputError::Unreadable(_))
        ));
    }
}
