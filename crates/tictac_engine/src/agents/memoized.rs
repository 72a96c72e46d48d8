//! Minimax agent that replays its predicted line.
//!
//! After each full search the agent remembers the rest of the best line. As
//! long as the other players keep making the predicted moves it answers from
//! memory; any deviation throws the memo away and triggers a fresh search.

use super::commentary::{Commentary, LogCommentary, RemarkCategory};
use super::{Agent, AgentError};
use crate::board::Board;
use crate::search::{MoveSequence, PredictionCache, Score, SearchError, expand};
use crate::types::{Outcome, Player};
use crate::variant::GameRules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// Memoizing minimax opponent.
pub struct MemoizedMinimaxAgent {
    name: String,
    cache: PredictionCache,
    last_prediction: Option<MoveSequence>,
    last_score: Option<Score>,
    commentary: Box<dyn Commentary>,
    rng: StdRng,
}

impl MemoizedMinimaxAgent {
    /// Creates the agent with remarks going to the log.
    pub fn new() -> Self {
        Self {
            name: "Memoized Minimax AI".to_string(),
            cache: PredictionCache::new(),
            last_prediction: None,
            last_score: None,
            commentary: Box::new(LogCommentary),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Sends remarks to `commentary` instead of the log.
    pub fn with_commentary(mut self, commentary: Box<dyn Commentary>) -> Self {
        self.commentary = commentary;
        self
    }

    /// Remaining cached line for `player`.
    pub fn cached_line(&self, player: &Player) -> Option<&MoveSequence> {
        self.cache.get(player)
    }

    /// Full line from the most recent search, including the move it returned.
    ///
    /// A snapshot; consuming the cache does not change it.
    pub fn last_prediction(&self) -> Option<&MoveSequence> {
        self.last_prediction.as_ref()
    }

    fn say(&mut self, category: RemarkCategory) {
        let line = category.pick_line(&mut self.rng);
        self.commentary.remark(&self.name, category, line);
    }
}

impl Default for MemoizedMinimaxAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoizedMinimaxAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedMinimaxAgent")
            .field("name", &self.name)
            .field("cache", &self.cache)
            .field("last_prediction", &self.last_prediction)
            .field("last_score", &self.last_score)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Agent for MemoizedMinimaxAgent {
    #[instrument(skip(self, board, rules), fields(agent = %self.name, player = %as_player.id()))]
    async fn get_move(
        &mut self,
        board: &Board,
        as_player: &Player,
        rules: &GameRules<'_>,
    ) -> Result<usize, AgentError> {
        if let Some(cell) = self.cache.predict(board, as_player, rules) {
            return Ok(cell);
        }

        let best = expand(rules, board.cells(), as_player)?;
        let score = best.score();
        info!(%score, length = best.moves().len(), "Fresh search");

        let opening = board.empty_count() == board.cells().len();
        let category = RemarkCategory::for_evaluation(score, self.last_score, opening);
        self.say(category);

        self.last_prediction = Some(best.moves().clone());
        let mut line = best.into_moves();
        let cell = line.pop_front().ok_or(SearchError::NoMoveToMake {
            acting: as_player.id(),
        })?;
        self.cache.store(as_player, line);
        self.last_score = Some(score);
        debug!(cell, "Chose move");
        Ok(cell)
    }

    fn reset(&mut self) {
        debug!(agent = %self.name, "Clearing memo");
        self.cache.clear();
        self.last_prediction = None;
        self.last_score = None;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn game_over(&mut self, outcome: &Outcome, as_player: &Player) {
        let category = match outcome {
            Outcome::Winner(winner) if winner == as_player => RemarkCategory::EndWin,
            Outcome::Tie => RemarkCategory::EndDraw,
            Outcome::Winner(_) => RemarkCategory::EndLoss,
        };
        self.say(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::variant::Variant;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct Recorder(Arc<Mutex<Vec<RemarkCategory>>>);

    impl Commentary for Recorder {
        fn remark(&self, _speaker: &str, category: RemarkCategory, _line: &str) {
            self.0.lock().expect("lock").push(category);
        }
    }

    fn setup() -> (Variant, Roster) {
        let variant = Variant::standard();
        let roster = Roster::new(variant.default_players().to_vec()).expect("valid roster");
        (variant, roster)
    }

    #[tokio::test]
    async fn test_opening_search_fills_cache() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.first();
        let mut agent = MemoizedMinimaxAgent::new();

        let cell = agent
            .get_move(&Board::default(), &a, &rules)
            .await
            .expect("move");

        assert_eq!(cell, 0);
        assert_eq!(
            agent.cached_line(&a),
            Some(&VecDeque::from([4, 1, 2, 6, 3, 5, 7, 8]))
        );
        assert_eq!(
            agent.last_prediction(),
            Some(&VecDeque::from([0, 4, 1, 2, 6, 3, 5, 7, 8]))
        );
    }

    #[tokio::test]
    async fn test_reset_clears_memo() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.first();
        let mut agent = MemoizedMinimaxAgent::new();
        agent
            .get_move(&Board::default(), &a, &rules)
            .await
            .expect("move");

        agent.reset();

        assert_eq!(agent.cached_line(&a), None);
        assert_eq!(agent.last_prediction(), None);
    }

    #[tokio::test]
    async fn test_remarks_follow_evaluations() {
        let (variant, roster) = setup();
        let rules = GameRules::new(&variant, &roster);
        let a = roster.players()[0];
        let b = roster.players()[1];
        let recorder = Recorder::default();
        let mut agent = MemoizedMinimaxAgent::new().with_commentary(Box::new(recorder.clone()));

        agent
            .get_move(&Board::default(), &a, &rules)
            .await
            .expect("move");

        let mut board = Board::default();
        for (cell, owner) in [(0, a), (1, a), (3, b), (5, b)] {
            board.set_owner(cell, Some(owner)).expect("in range");
        }
        agent.get_move(&board, &a, &rules).await.expect("move");
        agent.game_over(&Outcome::Winner(a), &a);
        agent.game_over(&Outcome::Tie, &a);
        agent.game_over(&Outcome::Winner(b), &a);

        assert_eq!(
            *recorder.0.lock().expect("lock"),
            vec![
                RemarkCategory::FirstMove,
                RemarkCategory::Blunder,
                RemarkCategory::EndWin,
                RemarkCategory::EndDraw,
                RemarkCategory::EndLoss,
            ]
        );
    }
}
