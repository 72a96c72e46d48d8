//! Flavour text agents may emit while they play.
//!
//! Commentary is observational: sinks receive a category and a line, and
//! nothing they do feeds back into move selection.

use crate::search::Score;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

/// Situation a remark responds to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum RemarkCategory {
    /// Search found a forced win.
    Taunt,
    /// The opponent's last move turned a non-winning position into a win.
    Blunder,
    /// Forced win found before anyone moved.
    TauntFirstMove,
    /// Opening move of a game the agent cannot force.
    FirstMove,
    /// The agent cannot force a win.
    GoodMove,
    /// The agent won.
    EndWin,
    /// The game was drawn.
    EndDraw,
    /// The agent lost.
    EndLoss,
}

impl RemarkCategory {
    /// Fixed lines for this category.
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            RemarkCategory::Taunt => &[
                "You can resign whenever you like.",
                "This position is not kind to you.",
                "I have seen how this ends.",
                "Easy.",
                "You never had a chance here.",
            ],
            RemarkCategory::Blunder => &[
                "Thank you, that settles it.",
                "You will regret that one.",
                "That was a mistake.",
                "Now it is mine.",
                "Why would you play there?",
            ],
            RemarkCategory::TauntFirstMove => &[
                "This one is already decided.",
                "I can see the end from here.",
                "Let's make this quick.",
            ],
            RemarkCategory::FirstMove => &[
                "Let's begin.",
                "I won't go easy on you.",
                "Your move after this one.",
            ],
            RemarkCategory::GoodMove => &[
                "Good move.",
                "I would have played the same.",
                "Not bad at all.",
                "You are making this hard.",
            ],
            RemarkCategory::EndWin => &[
                "I won!",
                "As expected.",
                "Better luck next round.",
            ],
            RemarkCategory::EndDraw => &[
                "Good game.",
                "A draw, perfectly balanced.",
                "Nobody wins this time.",
            ],
            RemarkCategory::EndLoss => &[
                "That should not have happened.",
                "Well played.",
                "Again!",
            ],
        }
    }

    /// Picks one line at random.
    pub fn pick_line<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        self.lines().choose(rng).copied().unwrap_or_default()
    }

    /// Category for a fresh evaluation.
    ///
    /// `previous` is the evaluation from this agent's previous search in the
    /// same game, if any.
    pub fn for_evaluation(score: Score, previous: Option<Score>, opening: bool) -> Self {
        match (score, opening) {
            (Score::Win, true) => RemarkCategory::TauntFirstMove,
            (Score::Win, false) if previous.is_some_and(|p| p < Score::Win) => {
                RemarkCategory::Blunder
            }
            (Score::Win, false) => RemarkCategory::Taunt,
            (_, true) => RemarkCategory::FirstMove,
            (_, false) => RemarkCategory::GoodMove,
        }
    }
}

/// Receives remarks from an agent.
pub trait Commentary: Send + Sync {
    /// Delivers one remark spoken by `speaker`.
    fn remark(&self, speaker: &str, category: RemarkCategory, line: &str);
}

/// Commentary sink that writes remarks to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCommentary;

impl Commentary for LogCommentary {
    fn remark(&self, speaker: &str, category: RemarkCategory, line: &str) {
        info!(speaker, %category, line, "Remark");
    }
}
