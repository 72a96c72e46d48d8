//! Per-player memo of a previously searched line.
//!
//! After a full search the remainder of the best line (every player's moves
//! after the one just played) is stored under the player the search ran for.
//! On that player's next turn the intervening moves are checked against the
//! board; if the other players followed the line, the next stored move is
//! played without searching again.

use super::minimax::MoveSequence;
use crate::board::Board;
use crate::types::{Player, PlayerId};
use crate::variant::GameRules;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Predicted lines keyed by the player they were computed for.
#[derive(Debug, Clone, Default)]
pub struct PredictionCache {
    entries: HashMap<PlayerId, MoveSequence>,
}

impl PredictionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining predicted line for `player`.
    pub fn get(&self, player: &Player) -> Option<&MoveSequence> {
        self.entries.get(&player.id())
    }

    /// Stores a fresh line for `player`, replacing any previous one.
    #[instrument(skip(self, moves), fields(player = %player.id(), length = moves.len()))]
    pub fn store(&mut self, player: &Player, moves: MoveSequence) {
        info!("Caching predicted line");
        self.entries.insert(player.id(), moves);
    }

    /// Drops the line for `player`.
    pub fn invalidate(&mut self, player: &Player) {
        self.entries.remove(&player.id());
    }

    /// Drops every line.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the cached move for `acting` if every intervening move matched.
    ///
    /// Walks the turn order from `acting` until it comes back round, popping
    /// one predicted cell per intervening player and requiring that player to
    /// own it on `board`. On success the next predicted cell is popped and
    /// returned. On the first mismatch, or when the line runs out, the whole
    /// entry is discarded and `None` is returned.
    #[instrument(skip(self, board, rules), fields(acting = %acting.id()))]
    pub fn predict(
        &mut self,
        board: &Board,
        acting: &Player,
        rules: &GameRules<'_>,
    ) -> Option<usize> {
        let hit = self.walk(board, acting, rules);
        if hit.is_none() {
            self.invalidate(acting);
        }
        hit
    }

    fn walk(&mut self, board: &Board, acting: &Player, rules: &GameRules<'_>) -> Option<usize> {
        let line = self.entries.get_mut(&acting.id())?;
        if line.is_empty() {
            debug!("No predicted line left");
            return None;
        }

        debug!("Checking cache");
        let mut expected = rules.next_player(acting);
        while expected != *acting {
            let Some(predicted) = line.pop_front() else {
                debug!(expected = %expected.id(), "Predicted line ran out");
                return None;
            };
            let found = board.cell(predicted).and_then(|c| c.owner().copied());
            if found.as_ref() != Some(&expected) {
                warn!(
                    expected = %expected.id(),
                    cell = predicted,
                    found = ?found.map(|p| p.id()),
                    "Prediction was wrong"
                );
                return None;
            }
            debug!(expected = %expected.id(), cell = predicted, "Prediction was correct");
            expected = rules.next_player(&expected);
        }

        let ours = line.pop_front();
        if let Some(cell) = ours {
            info!(cell, "Moving according to prediction");
        }
        ours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::variant::Variant;
    use std::collections::VecDeque;

    fn setup() -> (Variant, Roster) {
        let variant = Variant::standard();
        let roster = Roster::new(variant.default_players().to_vec()).expect("valid roster");
        (variant, roster)
    }

    #[test]
    fn test_missing_entry_is_a_miss() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let mut cache = PredictionCache::new();
        let board = Board::default();
        assert_eq!(cache.predict(&board, &roster.first(), &rules), None);
    }

    #[test]
    fn test_matching_reply_hits_and_consumes() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.players()[0];
        let b = roster.players()[1];
        let mut cache = PredictionCache::new();
        cache.store(&a, VecDeque::from([4, 8, 2]));

        let mut board = Board::default();
        board.set_owner(0, Some(a)).expect("in range");
        board.set_owner(4, Some(b)).expect("in range");

        assert_eq!(cache.predict(&board, &a, &rules), Some(8));
        assert_eq!(cache.get(&a), Some(&VecDeque::from([2])));
    }

    #[test]
    fn test_wrong_owner_discards_entry() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.players()[0];
        let b = roster.players()[1];
        let mut cache = PredictionCache::new();
        cache.store(&a, VecDeque::from([4, 8, 2]));

        let mut board = Board::default();
        board.set_owner(0, Some(a)).expect("in range");
        board.set_owner(5, Some(b)).expect("in range");

        assert_eq!(cache.predict(&board, &a, &rules), None);
        assert_eq!(cache.get(&a), None);
    }

    #[test]
    fn test_line_running_out_discards_entry() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.players()[0];
        let b = roster.players()[1];
        let mut cache = PredictionCache::new();
        cache.store(&a, VecDeque::from([4]));

        let mut board = Board::default();
        board.set_owner(4, Some(b)).expect("in range");

        assert_eq!(cache.predict(&board, &a, &rules), None);
        assert_eq!(cache.get(&a), None);
    }

    #[test]
    fn test_entries_are_per_player() {
        let (_, roster) = setup();
        let a = roster.players()[0];
        let b = roster.players()[1];
        let mut cache = PredictionCache::new();
        cache.store(&a, VecDeque::from([1]));
        cache.store(&b, VecDeque::from([2]));

        cache.invalidate(&a);

        assert_eq!(cache.get(&a), None);
        assert_eq!(cache.get(&b), Some(&VecDeque::from([2])));
    }
}
