//! Text notation for boards and the one-shot solver built on it.
//!
//! A board is written row by row, one character per cell: `.` or `-` for an
//! empty cell, `x` or `o` for the first roster player carrying that symbol,
//! or a digit naming a player id. Whitespace and `/` are ignored, so
//! `"xo./.x./..o"` and `"xo. .x. ..o"` describe the same board.

use derive_more::{Display, Error, From};
use serde::Serialize;
use tictac_engine::{
    Board, GameRules, MoveSequence, Player, PlayerId, PlayerSymbol, Roster, Score, SearchError, Variant,
    VariantId, expand,
};
use tracing::{debug, instrument};

/// Reasons a board string cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum NotationError {
    /// Wrong number of cells.
    #[display("Expected {expected} cells, found {found}")]
    Length {
        /// Cells on the board.
        expected: usize,
        /// Cells in the string.
        found: usize,
    },
    /// A character that is not part of the notation.
    #[display("Unexpected character '{_0}'")]
    UnexpectedChar(#[error(not(source))] char),
    /// A digit naming a player not on the roster.
    #[display("No player with id {_0}")]
    UnknownPlayer(#[error(not(source))] u32),
    /// A symbol nobody on the roster carries.
    #[display("No player carries symbol {_0}")]
    NoPlayerWithSymbol(#[error(not(source))] PlayerSymbol),
}

/// Parses `notation` into a standard board for `roster`.
#[instrument(skip(roster))]
pub fn parse_board(notation: &str, roster: &Roster) -> Result<Board, NotationError> {
    let mut board = Board::default();
    let expected = board.cells().len();
    let marks: Vec<char> = notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .collect();
    if marks.len() != expected {
        return Err(NotationError::Length {
            expected,
            found: marks.len(),
        });
    }

    for (index, mark) in marks.into_iter().enumerate() {
        let owner = match mark {
            '.' | '-' => None,
            'x' | 'X' => Some(by_symbol(roster, PlayerSymbol::X)?),
            'o' | 'O' => Some(by_symbol(roster, PlayerSymbol::O)?),
            digit if digit.is_ascii_digit() => {
                let id = digit.to_digit(10).unwrap_or_default();
                Some(
                    *roster
                        .get(PlayerId(id))
                        .ok_or(NotationError::UnknownPlayer(id))?,
                )
            }
            other => return Err(NotationError::UnexpectedChar(other)),
        };
        if owner.is_some() {
            // Index comes from enumerating a board-sized list.
            let _ = board.set_owner(index, owner);
        }
    }
    debug!(filled = expected - board.empty_count(), "Board parsed");
    Ok(board)
}

fn by_symbol(roster: &Roster, symbol: PlayerSymbol) -> Result<Player, NotationError> {
    roster
        .players()
        .iter()
        .find(|p| p.symbol() == symbol)
        .copied()
        .ok_or(NotationError::NoPlayerWithSymbol(symbol))
}

/// Best line for a position.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Variant the position was searched under.
    pub variant: VariantId,
    /// Player the search ran for.
    pub player: Player,
    /// Evaluation for that player.
    pub score: Score,
    /// Best line, zero-based cell indices, the player's move first.
    pub moves: MoveSequence,
    /// The position as parsed.
    #[serde(skip)]
    pub board: Board,
}

/// Reasons a position cannot be solved.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SolveError {
    /// Bad board string.
    #[display("{_0}")]
    Notation(NotationError),
    /// Search failed.
    #[display("{_0}")]
    Search(SearchError),
    /// `--player` names nobody on the roster.
    #[display("No player with id {_0}")]
    #[from(ignore)]
    UnknownPlayer(#[error(not(source))] u32),
    /// The position is already decided.
    #[display("Game is already over")]
    #[from(ignore)]
    Finished,
}

/// Searches the position in `notation` for `player`.
///
/// Without a player, the side to move is inferred from the number of filled
/// cells, cycling through the roster from the first player.
#[instrument(skip(variant, roster), fields(variant = %variant.id()))]
pub fn solve(
    variant: &Variant,
    roster: &Roster,
    notation: &str,
    player: Option<u32>,
) -> Result<SolveReport, SolveError> {
    let board = parse_board(notation, roster)?;
    let acting = match player {
        Some(id) => *roster
            .get(PlayerId(id))
            .ok_or(SolveError::UnknownPlayer(id))?,
        None => {
            let filled = board.cells().len() - board.empty_count();
            roster.players()[filled % roster.len()]
        }
    };

    let rules = GameRules::new(variant, roster);
    let mut probe = board.clone();
    if probe
        .test_win_condition(variant, &rules.previous_player(&acting))
        .is_some()
    {
        return Err(SolveError::Finished);
    }

    let best = expand(&rules, board.cells(), &acting)?;
    Ok(SolveReport {
        variant: variant.id(),
        player: acting,
        score: best.score(),
        moves: best.into_moves(),
        board,
    })
}
