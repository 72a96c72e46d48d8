//! Authoritative game state for one table.

use derive_more::{Display, Error, From};
use tictac_engine::{
    Board, BoardError, ConfigurationIssue, GameRules, Move, Outcome, Player, PlayerId, Roster,
    RosterError, Variant, VariantId,
};
use tracing::{debug, info, instrument, warn};

/// Reasons a session refuses an operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// Cell lookup failed.
    #[display("{_0}")]
    Board(BoardError),
    /// Roster could not be built.
    #[display("{_0}")]
    Roster(RosterError),
    /// The target cell is already owned.
    #[display("Cell {} is already taken", cell + 1)]
    #[from(ignore)]
    IllegalMove {
        /// Zero-based cell index.
        cell: usize,
    },
    /// Someone other than the turn holder tried to move.
    #[display("It is not {player}'s turn, {expected} is to move")]
    #[from(ignore)]
    OutOfTurn {
        /// Player who tried to move.
        player: PlayerId,
        /// Current turn holder.
        expected: PlayerId,
    },
    /// The game already has an outcome.
    #[display("Game is already over: {_0}")]
    #[from(ignore)]
    GameOver(#[error(not(source))] Outcome),
    /// The roster cannot play the variant.
    #[display(
        "Roster cannot play {variant}: {}",
        issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    #[from(ignore)]
    Misconfigured {
        /// Variant that was requested.
        variant: VariantId,
        /// Everything wrong with the roster.
        issues: Vec<ConfigurationIssue>,
    },
}

/// Board, players, turn pointer and results of an ongoing match.
#[derive(Debug, Clone)]
pub struct Session {
    variant: Variant,
    roster: Roster,
    board: Board,
    turn: Player,
    outcome: Option<Outcome>,
    results: Vec<Outcome>,
}

fn validate(variant: &Variant, roster: &Roster) -> Result<(), SessionError> {
    let issues = variant.configuration_issues(roster);
    if issues.is_empty() {
        return Ok(());
    }
    for issue in &issues {
        warn!(variant = %variant.id(), %issue, "Configuration issue");
    }
    Err(SessionError::Misconfigured {
        variant: variant.id(),
        issues,
    })
}

impl Session {
    /// Starts a session after validating `roster` against `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Misconfigured`] listing every configuration
    /// issue.
    #[instrument(skip(variant, roster), fields(variant = %variant.id(), players = roster.len()))]
    pub fn new(variant: Variant, roster: Roster) -> Result<Self, SessionError> {
        validate(&variant, &roster)?;
        info!("Session created");
        let turn = roster.first();
        Ok(Self {
            variant,
            roster,
            board: Board::default(),
            turn,
            outcome: None,
            results: Vec::new(),
        })
    }

    /// Starts a session with the variant's default players.
    pub fn with_default_players(variant: Variant) -> Result<Self, SessionError> {
        let roster = Roster::new(variant.default_players().to_vec())?;
        Self::new(variant, roster)
    }

    /// Active variant.
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Players in turn order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose turn it is.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Outcome of the current game, once finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True once the current game has an outcome.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Outcomes of every finished game since the last variant switch.
    pub fn results(&self) -> &[Outcome] {
        &self.results
    }

    /// Rule context for agents.
    pub fn rules(&self) -> GameRules<'_> {
        GameRules::new(&self.variant, &self.roster)
    }

    /// Applies `mv` to the board.
    ///
    /// The turn pointer moves on before the win condition is checked, so the
    /// win tester receives the next turn holder as its last-mover argument.
    /// Only the only-X tester looks at it.
    ///
    /// Returns the outcome when this move finished the game. A rejected move
    /// leaves the session untouched.
    #[instrument(skip(self), fields(player = %mv.player.id(), cell = mv.cell))]
    pub fn execute_move(&mut self, mv: Move) -> Result<Option<Outcome>, SessionError> {
        if let Some(outcome) = self.outcome {
            warn!(%outcome, "Move after game over");
            return Err(SessionError::GameOver(outcome));
        }
        if mv.player != self.turn {
            warn!(expected = %self.turn.id(), "Move out of turn");
            return Err(SessionError::OutOfTurn {
                player: mv.player.id(),
                expected: self.turn.id(),
            });
        }
        let len = self.board.cells().len();
        if mv.cell >= len {
            warn!("Cell out of range");
            return Err(BoardError::IndexOutOfRange {
                index: mv.cell,
                len,
            }
            .into());
        }
        if !self.board.is_move_legal(&mv) {
            warn!("Cell already taken");
            return Err(SessionError::IllegalMove { cell: mv.cell });
        }

        self.turn = self.rules().next_player(&self.turn);
        self.board.set_owner(mv.cell, Some(mv.player))?;
        debug!(next = %self.turn.id(), "Move applied");

        let outcome = self.board.test_win_condition(&self.variant, &self.turn);
        if let Some(outcome) = outcome {
            info!(%outcome, "Game finished");
            self.outcome = Some(outcome);
            self.results.push(outcome);
        }
        Ok(outcome)
    }

    /// Clears the board and gives the first player the move. Results are kept.
    #[instrument(skip(self), fields(variant = %self.variant.id()))]
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.width(), self.board.height());
        self.turn = self.roster.first();
        self.outcome = None;
        info!("Session reset");
    }

    /// Switches to another variant and roster, clearing results.
    ///
    /// On error the session keeps its previous variant, roster and state.
    #[instrument(skip(self, variant, roster), fields(from = %self.variant.id(), to = %variant.id()))]
    pub fn switch_variant(&mut self, variant: Variant, roster: Roster) -> Result<(), SessionError> {
        validate(&variant, &roster)?;
        self.variant = variant;
        self.roster = roster;
        self.reset();
        self.results.clear();
        info!("Variant switched");
        Ok(())
    }
}
