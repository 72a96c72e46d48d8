//! Win detection for the 3x3 variants.

use super::draw::is_full;
use crate::types::{Cell, Highlight, Outcome, Player};
use tracing::{debug, instrument};

/// Winning lines as cell-index triples, checked in this order.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

fn highlight_line(cells: &mut [Cell], line: [usize; 3]) {
    for index in line {
        cells[index].mark(Highlight::WinningLine);
    }
}

/// Ownership-based tester: three cells with the same owner win.
///
/// The first matching line in [`WIN_LINES`] order decides and is highlighted.
/// `_last_mover` is unused.
#[instrument(level = "trace", skip_all)]
pub fn standard_tester(cells: &mut [Cell], _last_mover: &Player) -> Option<Outcome> {
    for line in WIN_LINES {
        let Some(owner) = cells[line[0]].owner().copied() else {
            continue;
        };
        if line.iter().all(|&i| cells[i].is_owned_by(&owner)) {
            highlight_line(cells, line);
            debug!(winner = %owner.id(), ?line, "Line completed");
            return Some(Outcome::Winner(owner));
        }
    }

    if is_full(cells) {
        return Some(Outcome::Tie);
    }

    None
}

/// Only-X tester: any fully occupied line counts, whoever owns its cells.
///
/// The completed line is credited to `last_mover`, not to the cell owners.
/// Callers decide who that is: the search passes the player before the one
/// who just moved, a session passes its current turn holder.
#[instrument(level = "trace", skip_all, fields(last_mover = %last_mover.id()))]
pub fn only_x_tester(cells: &mut [Cell], last_mover: &Player) -> Option<Outcome> {
    for line in WIN_LINES {
        if line.iter().all(|&i| !cells[i].is_empty()) {
            highlight_line(cells, line);
            debug!(winner = %last_mover.id(), ?line, "Line completed");
            return Some(Outcome::Winner(*last_mover));
        }
    }

    if is_full(cells) {
        return Some(Outcome::Tie);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerSymbol;

    fn players() -> (Player, Player) {
        (
            Player::new(1, PlayerSymbol::O),
            Player::new(2, PlayerSymbol::X),
        )
    }

    fn cells(owners: [Option<&Player>; 9]) -> Vec<Cell> {
        owners
            .iter()
            .enumerate()
            .map(|(i, owner)| {
                let mut cell = Cell::new(i);
                cell.set_owner(owner.copied());
                cell
            })
            .collect()
    }

    #[test]
    fn test_no_winner_empty_board() {
        let (a, _) = players();
        let mut board = cells([None; 9]);
        assert_eq!(standard_tester(&mut board, &a), None);
    }

    #[test]
    fn test_winner_top_row_highlighted() {
        let (a, b) = players();
        let mut board = cells([
            Some(&a),
            Some(&a),
            Some(&a),
            Some(&b),
            Some(&b),
            None,
            None,
            None,
            None,
        ]);
        assert_eq!(standard_tester(&mut board, &b), Some(Outcome::Winner(a)));
        for i in [0, 1, 2] {
            assert_eq!(board[i].highlight(), Some(Highlight::WinningLine));
        }
        assert_eq!(board[3].highlight(), None);
    }

    #[test]
    fn test_winner_diagonal() {
        let (a, b) = players();
        let mut board = cells([
            None,
            Some(&a),
            Some(&b),
            Some(&a),
            Some(&b),
            None,
            Some(&b),
            None,
            None,
        ]);
        assert_eq!(standard_tester(&mut board, &a), Some(Outcome::Winner(b)));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let (a, b) = players();
        let mut board = cells([
            Some(&a),
            Some(&b),
            Some(&a),
            None,
            None,
            None,
            None,
            None,
            None,
        ]);
        assert_eq!(standard_tester(&mut board, &a), None);
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let (a, b) = players();
        // O X O / O X X / X O O
        let mut board = cells([
            Some(&a),
            Some(&b),
            Some(&a),
            Some(&a),
            Some(&b),
            Some(&b),
            Some(&b),
            Some(&a),
            Some(&a),
        ]);
        assert_eq!(standard_tester(&mut board, &a), Some(Outcome::Tie));
    }

    #[test]
    fn test_only_x_credits_last_mover() {
        let (a, b) = players();
        let mut board = cells([
            Some(&a),
            Some(&a),
            Some(&b),
            None,
            None,
            None,
            None,
            None,
            None,
        ]);
        assert_eq!(only_x_tester(&mut board, &b), Some(Outcome::Winner(b)));
        assert_eq!(only_x_tester(&mut board, &a), Some(Outcome::Winner(a)));
        assert_eq!(board[2].highlight(), Some(Highlight::WinningLine));
    }

    #[test]
    fn test_only_x_incomplete_line_continues() {
        let (a, b) = players();
        let mut board = cells([
            Some(&a),
            Some(&b),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        ]);
        assert_eq!(only_x_tester(&mut board, &a), None);
    }
}
