//! Game-tree search and the memo that lets agents skip it.

mod cache;
mod minimax;

pub use cache::PredictionCache;
pub use minimax::{
    MoveCandidate, MoveSequence, Score, SearchError, evaluate, expand, pretend_move,
};
