//! First-class move type.

use crate::types::Player;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A player claiming a cell.
///
/// Moves are transient: built once per turn and only kept longer inside
/// predicted move sequences (as bare cell indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Row-major index of the target cell.
    pub cell: usize,
    /// The player making the move.
    pub player: Player,
}

impl Move {
    /// Returns the target cell index.
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// Returns the moving player.
    pub fn player(&self) -> &Player {
        &self.player
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> cell {}", self.player, self.cell)
    }
}
