//! Rule variants and the rule context handed to search.
//!
//! A [`Variant`] bundles everything that differs between game modes: how a
//! win is detected, which cells are legal, and who moves next. Exactly one
//! variant is active per session; it is passed explicitly to every search and
//! evaluation call through [`GameRules`].

use crate::agents::AgentKind;
use crate::roster::{Roster, next_in_order, previous_in_order};
use crate::rules::{MoveCursor, empty_cells, only_x_tester, standard_tester};
use crate::types::{Cell, Outcome, Player, PlayerId, PlayerSymbol};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Decides the outcome of a position; `None` means the game goes on.
///
/// The second argument is the player a tester may credit with a completed
/// line. Testers may highlight cells.
pub type WinTester = fn(&mut [Cell], &Player) -> Option<Outcome>;

/// Produces the legal moves for a position.
pub type MoveGenerator = for<'c> fn(&'c [Cell]) -> MoveCursor<'c>;

/// Maps a player to the next (or previous) player in turn order.
pub type TurnOrder = fn(&Roster, &Player) -> Player;

/// Identifier of a shipped variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum VariantId {
    /// Regular tic-tac-toe.
    #[default]
    Standard,
    /// Both players place X; completing a line loses.
    OnlyX,
}

/// Immutable rule bundle.
#[derive(Debug, Clone)]
pub struct Variant {
    id: VariantId,
    name: &'static str,
    description: &'static str,
    win_tester: WinTester,
    move_generator: MoveGenerator,
    next_player: TurnOrder,
    previous_player: TurnOrder,
    default_players: Vec<Player>,
    min_players: usize,
    max_players: usize,
    agents: Vec<AgentKind>,
    allowed_symbols: Vec<PlayerSymbol>,
    allow_leftover_symbols: bool,
}

impl Variant {
    /// Looks up a shipped variant.
    #[instrument]
    pub fn from_id(id: VariantId) -> Self {
        match id {
            VariantId::Standard => Self::standard(),
            VariantId::OnlyX => Self::only_x(),
        }
    }

    /// Regular tic-tac-toe.
    pub fn standard() -> Self {
        Self {
            id: VariantId::Standard,
            name: "Default tic-tac-toe",
            description: "Regular tic-tac-toe rules",
            win_tester: standard_tester,
            move_generator: empty_cells,
            next_player: next_in_order,
            previous_player: previous_in_order,
            default_players: vec![
                Player::new(1, PlayerSymbol::O),
                Player::new(2, PlayerSymbol::X),
            ],
            min_players: 2,
            max_players: 2,
            agents: vec![
                AgentKind::Random,
                AgentKind::Minimax,
                AgentKind::MemoizedMinimax,
            ],
            allowed_symbols: vec![PlayerSymbol::O, PlayerSymbol::X],
            allow_leftover_symbols: false,
        }
    }

    /// Both players place X; the first to complete a line loses.
    pub fn only_x() -> Self {
        Self {
            id: VariantId::OnlyX,
            name: "Only X can be placed",
            description: "Players alternate placing X signs, first to create 3 in a line loses.",
            win_tester: only_x_tester,
            move_generator: empty_cells,
            next_player: next_in_order,
            previous_player: previous_in_order,
            default_players: vec![
                Player::new(1, PlayerSymbol::X),
                Player::new(2, PlayerSymbol::X).with_agent(AgentKind::MemoizedMinimax),
            ],
            min_players: 2,
            max_players: 2,
            agents: vec![
                AgentKind::Random,
                AgentKind::Minimax,
                AgentKind::MemoizedMinimax,
            ],
            allowed_symbols: vec![PlayerSymbol::X],
            allow_leftover_symbols: false,
        }
    }

    /// Replaces the win tester.
    pub fn with_win_tester(mut self, tester: WinTester) -> Self {
        self.win_tester = tester;
        self
    }

    /// Replaces the turn order functions.
    pub fn with_turn_order(mut self, next: TurnOrder, previous: TurnOrder) -> Self {
        self.next_player = next;
        self.previous_player = previous;
        self
    }

    /// Returns the variant id.
    pub fn id(&self) -> VariantId {
        self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// One-line rule summary.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the win tester.
    pub fn win_tester(&self) -> WinTester {
        self.win_tester
    }

    /// Returns the move generator.
    pub fn move_generator(&self) -> MoveGenerator {
        self.move_generator
    }

    /// Returns the next-player function.
    pub fn next_player(&self) -> TurnOrder {
        self.next_player
    }

    /// Returns the previous-player function.
    pub fn previous_player(&self) -> TurnOrder {
        self.previous_player
    }

    /// Players a fresh game of this variant starts with.
    pub fn default_players(&self) -> &[Player] {
        &self.default_players
    }

    /// Minimum number of players.
    pub fn min_players(&self) -> usize {
        self.min_players
    }

    /// Maximum number of players.
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// Agents players may use.
    pub fn agents(&self) -> &[AgentKind] {
        &self.agents
    }

    /// Symbols players may carry.
    pub fn allowed_symbols(&self) -> &[PlayerSymbol] {
        &self.allowed_symbols
    }

    /// Whether allowed symbols may go unused.
    pub fn allow_leftover_symbols(&self) -> bool {
        self.allow_leftover_symbols
    }

    /// Lists everything wrong with playing this variant with `roster`.
    ///
    /// An empty list means the roster is playable.
    #[instrument(skip(self, roster), fields(variant = %self.id, players = roster.len()))]
    pub fn configuration_issues(&self, roster: &Roster) -> Vec<ConfigurationIssue> {
        let mut issues = Vec::new();
        let count = roster.len();

        if count < self.min_players {
            issues.push(ConfigurationIssue::TooFewPlayers {
                count,
                min: self.min_players,
            });
        }
        if count > self.max_players {
            issues.push(ConfigurationIssue::TooManyPlayers {
                count,
                max: self.max_players,
            });
        }

        for player in roster.players() {
            if !self.allowed_symbols.contains(&player.symbol()) {
                issues.push(ConfigurationIssue::SymbolNotAllowed {
                    player: player.id(),
                    symbol: player.symbol(),
                });
            }
        }

        for player in roster.players() {
            if let Some(agent) = player.agent()
                && !self.agents.contains(&agent)
            {
                issues.push(ConfigurationIssue::AgentNotAllowed {
                    player: player.id(),
                    agent,
                });
            }
        }

        if !self.allow_leftover_symbols {
            for symbol in &self.allowed_symbols {
                if !roster.players().iter().any(|p| p.symbol() == *symbol) {
                    issues.push(ConfigurationIssue::SymbolUnassigned(*symbol));
                }
            }
        }

        debug!(issues = issues.len(), "Configuration checked");
        issues
    }
}

/// A reason a roster cannot play a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfigurationIssue {
    /// Not enough players.
    #[display("Too few players ({count} < {min})")]
    TooFewPlayers {
        /// Players present.
        count: usize,
        /// Players required.
        min: usize,
    },
    /// Too many players.
    #[display("Too many players ({count} > {max})")]
    TooManyPlayers {
        /// Players present.
        count: usize,
        /// Players allowed.
        max: usize,
    },
    /// A player's symbol is not part of this variant.
    #[display("Player {player} has symbol {symbol} that is not currently allowed")]
    SymbolNotAllowed {
        /// Offending player.
        player: PlayerId,
        /// Their symbol.
        symbol: PlayerSymbol,
    },
    /// A player's agent is not offered by this variant.
    #[display("Player {player} has AI {agent} that is not currently allowed")]
    AgentNotAllowed {
        /// Offending player.
        player: PlayerId,
        /// Their agent.
        agent: AgentKind,
    },
    /// An allowed symbol nobody carries.
    #[display("Symbol {_0} was not assigned")]
    SymbolUnassigned(PlayerSymbol),
}

/// Everything search needs to know about the rules in force.
#[derive(Debug, Clone, Copy)]
pub struct GameRules<'a> {
    variant: &'a Variant,
    roster: &'a Roster,
}

impl<'a> GameRules<'a> {
    /// Pairs a variant with the players taking part.
    pub fn new(variant: &'a Variant, roster: &'a Roster) -> Self {
        Self { variant, roster }
    }

    /// Returns the active variant.
    pub fn variant(&self) -> &'a Variant {
        self.variant
    }

    /// Returns the players.
    pub fn roster(&self) -> &'a Roster {
        self.roster
    }

    /// Who moves after `player`.
    pub fn next_player(&self, player: &Player) -> Player {
        (self.variant.next_player)(self.roster, player)
    }

    /// Who moved before `player`.
    pub fn previous_player(&self, player: &Player) -> Player {
        (self.variant.previous_player)(self.roster, player)
    }

    /// Legal moves in `cells`.
    pub fn legal_moves<'c>(&self, cells: &'c [Cell]) -> MoveCursor<'c> {
        (self.variant.move_generator)(cells)
    }

    /// Runs the win tester.
    pub fn test_win(&self, cells: &mut [Cell], last_mover: &Player) -> Option<Outcome> {
        (self.variant.win_tester)(cells, last_mover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_players_are_playable() {
        for variant in [Variant::standard(), Variant::only_x()] {
            let roster = Roster::new(variant.default_players().to_vec()).expect("valid roster");
            assert!(variant.configuration_issues(&roster).is_empty());
        }
    }

    #[test]
    fn test_only_x_rejects_o_symbol() {
        let variant = Variant::only_x();
        let roster = Roster::new(vec![
            Player::new(1, PlayerSymbol::X),
            Player::new(2, PlayerSymbol::O),
        ])
        .expect("valid roster");
        assert_eq!(
            variant.configuration_issues(&roster),
            vec![ConfigurationIssue::SymbolNotAllowed {
                player: PlayerId(2),
                symbol: PlayerSymbol::O,
            }]
        );
    }

    #[test]
    fn test_standard_reports_count_and_leftovers() {
        let variant = Variant::standard();
        let roster = Roster::new(vec![Player::new(1, PlayerSymbol::X)]).expect("valid roster");
        assert_eq!(
            variant.configuration_issues(&roster),
            vec![
                ConfigurationIssue::TooFewPlayers { count: 1, min: 2 },
                ConfigurationIssue::SymbolUnassigned(PlayerSymbol::O),
            ]
        );
    }

    #[test]
    fn test_variant_id_parses_kebab_case() {
        assert_eq!("only-x".parse::<VariantId>().ok(), Some(VariantId::OnlyX));
        assert_eq!(VariantId::OnlyX.to_string(), "only-x");
    }
}
