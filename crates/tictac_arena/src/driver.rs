//! Paced agent requests.
//!
//! Searches on a 3x3 board finish almost instantly, which makes computer
//! moves appear before a human has seen the previous one. The driver holds
//! every answer back until a minimum delay has passed, and refuses a second
//! request while one is still outstanding.

use crate::session::Session;
use derive_more::{Display, Error, From};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tictac_engine::{Agent, AgentError, Player};
use tracing::{debug, instrument, warn};

/// Default minimum time an agent move takes.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(400);

/// Reasons the driver did not produce a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum DriverError {
    /// Another request is still in flight.
    #[display("An agent move is already being computed")]
    #[from(ignore)]
    Busy,
    /// The agent failed.
    #[display("Agent failed: {_0}")]
    Agent(AgentError),
}

/// Clears the busy flag on every exit path.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Requests moves from agents at a bounded pace, one at a time.
#[derive(Debug, Clone)]
pub struct AgentDriver {
    min_delay: Duration,
    busy: Arc<AtomicBool>,
}

impl AgentDriver {
    /// Creates a driver that never answers faster than `min_delay`.
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Minimum time a request takes.
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// True while a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Asks `agent` for a move on `session`'s board as `player`.
    ///
    /// The minimum delay starts counting before the agent does, so the call
    /// takes the longer of the two. The move is only returned, never
    /// committed.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Busy`] if another request is in flight and
    /// [`DriverError::Agent`] if the agent fails.
    #[instrument(skip(self, agent, session), fields(agent = agent.name(), player = %player.id()))]
    pub async fn request_move(
        &self,
        agent: &mut dyn Agent,
        session: &Session,
        player: &Player,
    ) -> Result<usize, DriverError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            warn!("Rejecting overlapping move request");
            return Err(DriverError::Busy);
        }
        let _guard = BusyGuard(Arc::clone(&self.busy));

        let throttle = tokio::time::sleep(self.min_delay);
        let rules = session.rules();
        let (chosen, ()) = tokio::join!(
            agent.get_move(session.board(), player, &rules),
            throttle
        );

        let cell = chosen?;
        debug!(cell, "Agent answered");
        Ok(cell)
    }
}

impl Default for AgentDriver {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE)
    }
}
