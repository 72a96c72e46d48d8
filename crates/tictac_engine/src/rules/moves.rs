//! Legal move generation.

use crate::types::Cell;

/// Restartable cursor over the cells a variant admits as moves.
///
/// Yields cell indices in ascending order. Build a fresh cursor for every
/// board state; a cursor borrows the cells it walks.
#[derive(Debug, Clone)]
pub struct MoveCursor<'c> {
    cells: &'c [Cell],
    position: usize,
    admits: fn(&Cell) -> bool,
}

impl<'c> MoveCursor<'c> {
    /// Creates a cursor yielding every cell for which `admits` holds.
    pub fn new(cells: &'c [Cell], admits: fn(&Cell) -> bool) -> Self {
        Self {
            cells,
            position: 0,
            admits,
        }
    }

    /// Rewinds to the first cell.
    pub fn restart(&mut self) {
        self.position = 0;
    }
}

impl Iterator for MoveCursor<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(cell) = self.cells.get(self.position) {
            self.position += 1;
            if (self.admits)(cell) {
                return Some(cell.index());
            }
        }
        None
    }
}

/// Every unowned cell, in index order.
pub fn empty_cells(cells: &[Cell]) -> MoveCursor<'_> {
    MoveCursor::new(cells, Cell::is_empty)
}
