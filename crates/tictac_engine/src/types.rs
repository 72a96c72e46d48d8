//! Core domain types: symbols, players, cells and terminal outcomes.

use crate::agents::AgentKind;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use tracing::instrument;

/// Mark a player draws on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerSymbol {
    /// No symbol assigned.
    Empty,
    /// The X mark.
    X,
    /// The O mark.
    O,
}

impl PlayerSymbol {
    /// Character used when drawing the board.
    pub fn glyph(self) -> char {
        match self {
            PlayerSymbol::Empty => ' ',
            PlayerSymbol::X => 'x',
            PlayerSymbol::O => 'o',
        }
    }
}

/// Stable player identifier assigned at configuration time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Serialize,
    Deserialize,
)]
#[display("#{}", _0)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// A participant in the game.
///
/// Two players are the same player only when their ids match; the symbol and
/// the attached agent are not part of the identity. In the only-X variant
/// both players carry [`PlayerSymbol::X`] and are still distinct.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    symbol: PlayerSymbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agent: Option<AgentKind>,
}

impl Player {
    /// Creates a player without an attached agent.
    pub fn new(id: u32, symbol: PlayerSymbol) -> Self {
        Self {
            id: PlayerId(id),
            symbol,
            agent: None,
        }
    }

    /// Attaches an autonomous agent to this player.
    pub fn with_agent(mut self, agent: AgentKind) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Returns the player id.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the player's symbol.
    pub fn symbol(&self) -> PlayerSymbol {
        self.symbol
    }

    /// Returns the attached agent, if the player is computer controlled.
    pub fn agent(&self) -> Option<AgentKind> {
        self.agent
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {} ({})", self.id, self.symbol)?;
        if self.agent.is_some() {
            write!(f, " (AI)")?;
        }
        Ok(())
    }
}

/// Cosmetic marker set on cells by the win testers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    /// Cell belongs to the completed winning line.
    WinningLine,
}

/// One square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    index: usize,
    owner: Option<Player>,
    highlight: Option<Highlight>,
}

impl Cell {
    /// Creates an unowned cell at `index`.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            owner: None,
            highlight: None,
        }
    }

    /// Row-major index of this cell; never changes.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current owner, if any.
    pub fn owner(&self) -> Option<&Player> {
        self.owner.as_ref()
    }

    /// Returns the highlight marker.
    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    /// True when nobody owns the cell.
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }

    /// Returns true if `player` owns this cell.
    pub fn is_owned_by(&self, player: &Player) -> bool {
        self.owner.as_ref() == Some(player)
    }

    /// Assigns the owner.
    pub fn set_owner(&mut self, owner: Option<Player>) {
        self.owner = owner;
    }

    /// Marks the cell.
    pub fn mark(&mut self, highlight: Highlight) {
        self.highlight = Some(highlight);
    }

    /// Copies owner and highlight from `other`, keeping this cell's index.
    #[instrument(level = "trace", skip(self, other), fields(index = self.index))]
    pub fn assign(&mut self, other: &Cell) {
        self.owner = other.owner;
        self.highlight = other.highlight;
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = self
            .owner
            .map(|p| p.symbol())
            .unwrap_or(PlayerSymbol::Empty);
        write!(f, "Cell #{} [{}]", self.index, symbol)
    }
}

/// Terminal result of a game.
///
/// An ongoing game has no outcome; testers return `Option<Outcome>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The given player won.
    Winner(Player),
    /// Board filled with no completed line.
    Tie,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} won", player),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
