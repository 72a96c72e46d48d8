//! Game rules for the shipped variants.
//!
//! Pure functions over cell slices. A [`Variant`](crate::Variant) picks one
//! tester and one move generator from here.

pub mod draw;
pub mod moves;
pub mod win;

pub use draw::is_full;
pub use moves::{MoveCursor, empty_cells};
pub use win::{WIN_LINES, only_x_tester, standard_tester};
