//! Ordered set of players and the default turn order over it.

use crate::types::{Player, PlayerId};
use derive_more::{Display, Error};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// Errors building a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RosterError {
    /// At least one player is required.
    #[display("Roster needs at least one player")]
    Empty,
    /// Two players share an id.
    #[display("Player id {_0} is used twice")]
    DuplicateId(#[error(not(source))] PlayerId),
}

/// Non-empty ordered list of players with unique ids.
///
/// Order matters: the first player opens the game and the default turn
/// order cycles through the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Builds a roster.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Empty`] for an empty list and
    /// [`RosterError::DuplicateId`] when ids repeat.
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn new(players: Vec<Player>) -> Result<Self, RosterError> {
        if players.is_empty() {
            warn!("Refusing empty roster");
            return Err(RosterError::Empty);
        }
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id()) {
                warn!(id = %player.id(), "Duplicate player id");
                return Err(RosterError::DuplicateId(player.id()));
            }
        }
        info!(count = players.len(), "Roster assembled");
        Ok(Self { players })
    }

    /// The opening player.
    pub fn first(&self) -> Player {
        self.players[0]
    }

    /// All players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false; rosters are never empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks a player up by id.
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Position of `player` in turn order.
    pub fn position(&self, player: &Player) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }
}

/// The player after `player`, wrapping around.
///
/// A player not on the roster maps to the first player.
pub fn next_in_order(roster: &Roster, player: &Player) -> Player {
    match roster.position(player) {
        Some(i) => roster.players[(i + 1) % roster.len()],
        None => roster.first(),
    }
}

/// The player before `player`, wrapping around.
///
/// A player not on the roster maps to the first player.
pub fn previous_in_order(roster: &Roster, player: &Player) -> Player {
    match roster.position(player) {
        Some(i) => roster.players[(i + roster.len() - 1) % roster.len()],
        None => roster.first(),
    }
}
