//! Agent that plays any legal move.

use super::{Agent, AgentError};
use crate::board::Board;
use crate::types::Player;
use crate::variant::GameRules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Picks uniformly among the legal moves.
#[derive(Debug)]
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Creates an agent seeded from the thread RNG.
    pub fn new() -> Self {
        Self {
            name: "Random AI".to_string(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Creates an agent with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: "Random AI".to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Agent for RandomAgent {
    #[instrument(skip(self, board, rules), fields(agent = %self.name, player = %as_player.id()))]
    async fn get_move(
        &mut self,
        board: &Board,
        as_player: &Player,
        rules: &GameRules<'_>,
    ) -> Result<usize, AgentError> {
        let available: Vec<usize> = rules.legal_moves(board.cells()).collect();
        let cell = available
            .choose(&mut self.rng)
            .copied()
            .ok_or(AgentError::NoLegalMoves {
                acting: as_player.id(),
            })?;
        debug!(cell, "Random choice");
        Ok(cell)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        &self.name
    }
}
