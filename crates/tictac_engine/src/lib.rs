//! Tic-tac-toe engine with pluggable rule variants and minimax opponents.
//!
//! # Architecture
//!
//! - **Model**: [`Cell`], [`Player`], [`Board`] and the turn-ordered [`Roster`]
//! - **Rules**: a [`Variant`] bundles a win tester, a move generator and turn
//!   order; [`GameRules`] pairs it with a roster for search
//! - **Search**: exhaustive minimax ([`expand`]) and the per-player
//!   [`PredictionCache`]
//! - **Agents**: the [`Agent`] contract with random, minimax and memoized
//!   minimax implementations
//!
//! # Example
//!
//! ```
//! use tictac_engine::{Board, GameRules, Roster, Score, Variant, expand};
//!
//! let variant = Variant::standard();
//! let roster = Roster::new(variant.default_players().to_vec()).unwrap();
//! let rules = GameRules::new(&variant, &roster);
//!
//! let best = expand(&rules, Board::default().cells(), &roster.first()).unwrap();
//! assert_eq!(best.score(), Score::Tie);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod agents;
mod board;
mod roster;
mod rules;
mod search;
mod types;
mod variant;

// Crate-level exports - Model
pub use action::Move;
pub use board::{Board, BoardError, STANDARD_SIDE, pretty_cells};
pub use roster::{Roster, RosterError, next_in_order, previous_in_order};
pub use types::{Cell, Highlight, Outcome, Player, PlayerId, PlayerSymbol};

// Crate-level exports - Rules
pub use rules::{MoveCursor, WIN_LINES, empty_cells, is_full, only_x_tester, standard_tester};
pub use variant::{
    ConfigurationIssue, GameRules, MoveGenerator, TurnOrder, Variant, VariantId, WinTester,
};

// Crate-level exports - Search
pub use search::{
    MoveCandidate, MoveSequence, PredictionCache, Score, SearchError, evaluate, expand,
    pretend_move,
};

// Crate-level exports - Agents
pub use agents::{
    Agent, AgentError, AgentKind, Commentary, LogCommentary, MemoizedMinimaxAgent,
    MinimaxAgent, RandomAgent, RemarkCategory,
};
