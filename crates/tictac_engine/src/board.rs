//! Fixed-size grid of cells.

use crate::action::Move;
use crate::types::{Cell, Outcome, Player, PlayerSymbol};
use crate::variant::Variant;
use derive_more::{Display, Error};
use serde::Serialize;
use tracing::{instrument, warn};

/// Side length of the boards every shipped variant plays on.
pub const STANDARD_SIDE: usize = 3;

/// Errors raised by coordinate access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Coordinate outside the board.
    #[display("Cell ({x}, {y}) out of range for a {width}x{height} board")]
    OutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },
    /// Linear index outside the board.
    #[display("Cell index {index} out of range for {len} cells")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cells.
        len: usize,
    },
}

/// Board of `width × height` cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board with every cell unowned, indexed `0..width*height`.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: (0..width * height).map(Cell::new).collect(),
        }
    }

    /// Returns the board width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the board height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access for testers that highlight cells.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Returns the cell at a linear index.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Converts a coordinate to a linear index (`y * width + x`).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfRange`] when `x >= width` or `y >= height`.
    #[instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn index_of(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x >= self.width || y >= self.height {
            warn!(x, y, "Coordinate outside board");
            return Err(BoardError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Returns the cell at `(x, y)`.
    #[instrument(skip(self))]
    pub fn get_cell_at(&self, x: usize, y: usize) -> Result<&Cell, BoardError> {
        let index = self.index_of(x, y)?;
        Ok(&self.cells[index])
    }

    /// Replaces owner and highlight of the cell at `(x, y)`.
    ///
    /// The stored cell keeps its own index.
    #[instrument(skip(self, value))]
    pub fn set_cell_at(&mut self, x: usize, y: usize, value: &Cell) -> Result<(), BoardError> {
        let index = self.index_of(x, y)?;
        self.cells[index].assign(value);
        Ok(())
    }

    /// Assigns an owner by linear index.
    #[instrument(skip(self, owner))]
    pub fn set_owner(&mut self, index: usize, owner: Option<Player>) -> Result<(), BoardError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange { index, len })?;
        cell.set_owner(owner);
        Ok(())
    }

    /// True iff the target cell exists and has no owner.
    #[instrument(skip(self), fields(cell = mv.cell))]
    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.cell(mv.cell).is_some_and(Cell::is_empty)
    }

    /// Runs the variant's win tester over this board.
    ///
    /// `last_mover` is the player the only-X tester credits with a completed
    /// line; the standard tester ignores it.
    #[instrument(skip(self, variant), fields(variant = %variant.id()))]
    pub fn test_win_condition(&mut self, variant: &Variant, last_mover: &Player) -> Option<Outcome> {
        (variant.win_tester())(self.cells.as_mut_slice(), last_mover)
    }

    /// Number of unowned cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Formats the board for a human; empty cells show their 1-based index.
    pub fn render(&self) -> String {
        let mut result = String::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = &self.cells[row * self.width + col];
                match cell.owner() {
                    Some(player) => result.push(player.symbol().glyph().to_ascii_uppercase()),
                    None => result.push_str(&(cell.index() + 1).to_string()),
                }
                if col + 1 < self.width {
                    result.push('|');
                }
            }
            if row + 1 < self.height {
                result.push('\n');
                result.push_str(&vec!["-"; self.width].join("+"));
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(STANDARD_SIDE, STANDARD_SIDE)
    }
}

/// Draws a square cell slice with the `marked` cell bracketed.
///
/// Used by search trace logging.
pub fn pretty_cells(cells: &[Cell], marked: Option<usize>) -> String {
    let side = (cells.len() as f64).sqrt() as usize;
    let mut result = String::new();
    for row in cells.chunks(side.max(1)) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                let glyph = cell
                    .owner()
                    .map(|p| p.symbol())
                    .unwrap_or(PlayerSymbol::Empty)
                    .glyph();
                if Some(cell.index()) == marked {
                    format!("[{}]", glyph)
                } else {
                    format!(" {} ", glyph)
                }
            })
            .collect();
        result.push_str(&line.join("|"));
        result.push('\n');
    }
    result
}
