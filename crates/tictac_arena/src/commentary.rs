//! Routes agent remarks to the match event stream.

use crate::orchestrator::GameEvent;
use tictac_engine::{Commentary, RemarkCategory};
use tokio::sync::mpsc;
use tracing::debug;

/// Commentary sink that turns remarks into [`GameEvent::Remark`].
#[derive(Debug, Clone)]
pub struct EventCommentary {
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl EventCommentary {
    /// Creates a sink sending to `event_tx`.
    pub fn new(event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { event_tx }
    }
}

impl Commentary for EventCommentary {
    fn remark(&self, speaker: &str, category: RemarkCategory, line: &str) {
        let event = GameEvent::Remark {
            speaker: speaker.to_string(),
            category,
            line: line.to_string(),
        };
        if self.event_tx.send(event).is_err() {
            debug!(speaker, %category, "Remark dropped, no listener");
        }
    }
}
