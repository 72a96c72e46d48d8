//! Tictac arena - sessions, paced agents and match orchestration
//!
//! Builds playable matches on top of `tictac_engine`.
//!
//! # Architecture
//!
//! - **Session**: authoritative board, turn pointer and results
//! - **Driver**: throttled, one-at-a-time agent requests
//! - **Orchestrator**: rounds between human and computer seats, reported as
//!   [`GameEvent`]s
//! - **Config**: TOML match settings
//! - **Notation**: board strings and the one-shot solver

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod commentary;
mod config;
mod driver;
mod human;
mod notation;
mod orchestrator;
mod session;

// Crate-level exports - Configuration
pub use config::{ArenaConfig, ConfigError, PlayerConfig};

// Crate-level exports - Session management
pub use session::{Session, SessionError};

// Crate-level exports - Agent pacing
pub use driver::{AgentDriver, DEFAULT_THROTTLE, DriverError};

// Crate-level exports - Orchestration
pub use commentary::EventCommentary;
pub use human::{HumanPlayer, InputError, InputLines, parse_move_input};
pub use orchestrator::{GameEvent, Orchestrator, Seat, build_agent, seats_for};

// Crate-level exports - Notation
pub use notation::{NotationError, SolveError, SolveReport, parse_board, solve};
