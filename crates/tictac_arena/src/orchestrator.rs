//! Match orchestration between seats.

use crate::commentary::EventCommentary;
use crate::config::ArenaConfig;
use crate::driver::AgentDriver;
use crate::human::{HumanPlayer, InputLines};
use crate::session::{Session, SessionError};
use anyhow::{Result, anyhow};
use std::time::Duration;
use tictac_engine::{
    Agent, AgentError, AgentKind, MemoizedMinimaxAgent, Move, Outcome, Player, RemarkCategory,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the orchestrator to the front end.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Board after a change, rendered for display.
    StateChanged(String),
    /// A human is expected to type a move.
    AwaitingInput {
        /// Player to move.
        player: Player,
    },
    /// An agent is computing its move.
    AgentThinking {
        /// Player to move.
        player: Player,
    },
    /// A move was committed.
    MoveMade {
        /// Player the move was committed for.
        player: Player,
        /// Zero-based cell index.
        cell: usize,
    },
    /// A proposed move was refused; the player is asked again.
    Rejected {
        /// Player whose move was refused.
        player: Player,
        /// Reason shown to the user.
        reason: String,
    },
    /// Flavour text from an agent.
    Remark {
        /// Agent name.
        speaker: String,
        /// What prompted the remark.
        category: RemarkCategory,
        /// The remark.
        line: String,
    },
    /// A game ended.
    GameOver {
        /// One-based round number.
        round: u32,
        /// Result of the game.
        outcome: Outcome,
    },
}

/// A player and whatever produces its moves.
pub struct Seat {
    player: Player,
    agent: Box<dyn Agent>,
    computer: bool,
}

impl Seat {
    /// Seat driven by a computer agent.
    pub fn computer(player: Player, agent: Box<dyn Agent>) -> Self {
        Self {
            player,
            agent,
            computer: true,
        }
    }

    /// Seat driven by a human or any other source that paces itself.
    pub fn human(player: Player, agent: Box<dyn Agent>) -> Self {
        Self {
            player,
            agent,
            computer: false,
        }
    }

    /// The seated player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// True for computer seats.
    pub fn is_computer(&self) -> bool {
        self.computer
    }
}

/// Builds a computer agent whose remarks go to `event_tx`.
pub fn build_agent(kind: AgentKind, event_tx: &mpsc::UnboundedSender<GameEvent>) -> Box<dyn Agent> {
    match kind {
        AgentKind::MemoizedMinimax => Box::new(
            MemoizedMinimaxAgent::new()
                .with_commentary(Box::new(EventCommentary::new(event_tx.clone()))),
        ),
        other => other.build(),
    }
}

/// One seat per roster player: computer seats for players with an agent,
/// human seats reading from `input` for the rest.
pub fn seats_for(
    session: &Session,
    input: InputLines,
    event_tx: &mpsc::UnboundedSender<GameEvent>,
) -> Vec<Seat> {
    session
        .roster()
        .players()
        .iter()
        .map(|player| match player.agent() {
            Some(kind) => Seat::computer(*player, build_agent(kind, event_tx)),
            None => Seat::human(
                *player,
                Box::new(HumanPlayer::new(
                    player.to_string(),
                    input.clone(),
                    event_tx.clone(),
                )),
            ),
        })
        .collect()
}

/// Plays rounds of a session between seats.
pub struct Orchestrator {
    session: Session,
    seats: Vec<Seat>,
    driver: AgentDriver,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    rounds: u32,
    auto_restart: bool,
    end_of_round: Duration,
}

impl Orchestrator {
    /// Creates an orchestrator using the pacing and round settings of `config`.
    pub fn new(
        session: Session,
        seats: Vec<Seat>,
        config: &ArenaConfig,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            seats,
            driver: AgentDriver::new(config.throttle()),
            event_tx,
            rounds: *config.rounds(),
            auto_restart: *config.auto_restart(),
            end_of_round: config.end_of_round(),
        }
    }

    /// The session being played.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event dropped, no listener");
        }
    }

    /// Plays the configured number of rounds, or keeps going with auto
    /// restart on. Stops early when a human seat's input closes.
    ///
    /// Returns the outcomes of the finished games.
    #[instrument(skip(self), fields(variant = %self.session.variant().id(), rounds = self.rounds))]
    pub async fn run(&mut self) -> Result<Vec<Outcome>> {
        info!("Starting match");
        let mut round = 0;

        loop {
            round += 1;
            let Some(outcome) = self.play_round(round).await? else {
                info!(round, "Input closed, ending match");
                break;
            };

            for seat in &mut self.seats {
                seat.agent.game_over(&outcome, &seat.player);
            }

            if !self.auto_restart && round >= self.rounds {
                break;
            }

            tokio::time::sleep(self.end_of_round).await;
            self.restart();
        }

        info!(games = self.session.results().len(), "Match finished");
        Ok(self.session.results().to_vec())
    }

    /// Resets the session and every seat's agent.
    pub fn restart(&mut self) {
        self.session.reset();
        for seat in &mut self.seats {
            seat.agent.reset();
        }
    }

    /// Plays one game to its end.
    ///
    /// Returns `None` when a human seat's input closes before the game ends.
    #[instrument(skip(self))]
    pub async fn play_round(&mut self, round: u32) -> Result<Option<Outcome>> {
        self.emit(GameEvent::StateChanged(self.session.board().render()));

        loop {
            if let Some(outcome) = self.session.outcome() {
                info!(%outcome, "Round over");
                self.emit(GameEvent::GameOver { round, outcome });
                return Ok(Some(outcome));
            }

            let turn = self.session.turn();
            let seat = self
                .seats
                .iter_mut()
                .find(|s| s.player == turn)
                .ok_or_else(|| anyhow!("No seat for {}", turn))?;

            let cell = if seat.computer {
                let _ = self.event_tx.send(GameEvent::AgentThinking { player: turn });
                self.driver
                    .request_move(seat.agent.as_mut(), &self.session, &turn)
                    .await?
            } else {
                let _ = self.event_tx.send(GameEvent::AwaitingInput { player: turn });
                let rules = self.session.rules();
                match seat.agent.get_move(self.session.board(), &turn, &rules).await {
                    Ok(cell) => cell,
                    Err(AgentError::InputClosed) => return Ok(None),
                    Err(e) => return Err(e.into()),
                }
            };

            if self.session.is_finished() {
                continue;
            }

            let holder = self.session.turn();
            match self.session.execute_move(Move::new(cell, holder)) {
                Ok(_) => {
                    self.emit(GameEvent::MoveMade {
                        player: holder,
                        cell,
                    });
                    self.emit(GameEvent::StateChanged(self.session.board().render()));
                }
                Err(e @ (SessionError::IllegalMove { .. } | SessionError::Board(_))) => {
                    warn!(error = %e, "Move rejected");
                    seat.agent.reset();
                    self.emit(GameEvent::Rejected {
                        player: holder,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
