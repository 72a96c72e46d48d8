//! Draw detection.

use crate::types::Cell;

/// Checks if every cell has an owner.
///
/// A full board with no completed line is a tie.
pub fn is_full(cells: &[Cell]) -> bool {
    cells.iter().all(|c| !c.is_empty())
}
