//! Match configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictac_engine::{AgentKind, Player, PlayerSymbol, Roster, RosterError, Variant, VariantId};
use tracing::{debug, info, instrument};

/// One seat at the table.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Player id, unique within the match.
    id: u32,

    /// Mark the player draws.
    symbol: PlayerSymbol,

    /// Computer opponent; omitted for a human seat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agent: Option<AgentKind>,
}

impl PlayerConfig {
    /// Creates a seat configuration.
    pub fn new(id: u32, symbol: PlayerSymbol, agent: Option<AgentKind>) -> Self {
        Self { id, symbol, agent }
    }

    /// Builds the player this seat describes.
    pub fn to_player(&self) -> Player {
        let player = Player::new(self.id, self.symbol);
        match self.agent {
            Some(kind) => player.with_agent(kind),
            None => player,
        }
    }
}

/// Settings for a run of games.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Rule variant to play.
    #[serde(default)]
    variant: VariantId,

    /// Minimum time an agent move takes, in milliseconds.
    #[serde(default = "default_throttle_ms")]
    throttle_ms: u64,

    /// Pause between the end of a game and the next one, in milliseconds.
    #[serde(default = "default_end_of_round_ms")]
    end_of_round_ms: u64,

    /// Number of games to play.
    #[serde(default = "default_rounds")]
    rounds: u32,

    /// Keep starting new games until input closes.
    #[serde(default)]
    auto_restart: bool,

    /// Seats in turn order; empty means the variant's default players.
    #[serde(default)]
    players: Vec<PlayerConfig>,
}

#[instrument]
fn default_throttle_ms() -> u64 {
    400
}

#[instrument]
fn default_end_of_round_ms() -> u64 {
    400
}

#[instrument]
fn default_rounds() -> u32 {
    1
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            variant: VariantId::default(),
            throttle_ms: default_throttle_ms(),
            end_of_round_ms: default_end_of_round_ms(),
            rounds: default_rounds(),
            auto_restart: false,
            players: Vec::new(),
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(variant = %config.variant, players = config.players.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the variant.
    pub fn with_variant(mut self, variant: VariantId) -> Self {
        self.variant = variant;
        self
    }

    /// Overrides the number of rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Replaces the seats.
    pub fn with_players(mut self, players: Vec<PlayerConfig>) -> Self {
        self.players = players;
        self
    }

    /// Minimum agent move time.
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Pause between games.
    pub fn end_of_round(&self) -> Duration {
        Duration::from_millis(self.end_of_round_ms)
    }

    /// Builds the roster, falling back to `variant`'s default players.
    pub fn roster(&self, variant: &Variant) -> Result<Roster, RosterError> {
        if self.players.is_empty() {
            debug!(variant = %variant.id(), "Using default players");
            return Roster::new(variant.default_players().to_vec());
        }
        Roster::new(self.players.iter().map(PlayerConfig::to_player).collect())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
