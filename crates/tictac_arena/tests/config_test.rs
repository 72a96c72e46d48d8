//! Tests for loading match configuration from TOML.

use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tictac_arena::{ArenaConfig, PlayerConfig};
use tictac_engine::{AgentKind, PlayerId, PlayerSymbol, Variant, VariantId};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_full_config_loads() {
    let file = write_config(
        r#"
variant = "only-x"
throttle_ms = 250
end_of_round_ms = 1000
rounds = 3
auto_restart = true

[[players]]
id = 1
symbol = "x"

[[players]]
id = 2
symbol = "x"
agent = "memoized-minimax"
"#,
    );

    let config = ArenaConfig::from_file(file.path()).expect("config loads");

    assert_eq!(*config.variant(), VariantId::OnlyX);
    assert_eq!(config.throttle(), Duration::from_millis(250));
    assert_eq!(config.end_of_round(), Duration::from_millis(1000));
    assert_eq!(*config.rounds(), 3);
    assert!(*config.auto_restart());
    assert_eq!(config.players().len(), 2);
    assert_eq!(*config.players()[1].agent(), Some(AgentKind::MemoizedMinimax));
}

#[test]
fn test_missing_fields_use_defaults() {
    let file = write_config("rounds = 2\n");

    let config = ArenaConfig::from_file(file.path()).expect("config loads");

    assert_eq!(*config.variant(), VariantId::Standard);
    assert_eq!(*config.throttle_ms(), 400);
    assert_eq!(*config.end_of_round_ms(), 400);
    assert_eq!(*config.rounds(), 2);
    assert!(!*config.auto_restart());
    assert!(config.players().is_empty());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");

    let config =
        ArenaConfig::load_or_default(dir.path().join("absent.toml")).expect("defaults load");

    assert_eq!(*config.rounds(), 1);
    assert_eq!(config.throttle(), Duration::from_millis(400));
}

#[test]
fn test_unknown_agent_is_a_parse_error() {
    let file = write_config(
        r#"
[[players]]
id = 1
symbol = "o"
agent = "alphazero"
"#,
    );

    let err = ArenaConfig::from_file(file.path()).expect_err("bad agent");

    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_unreadable_file_reports_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    let err = ArenaConfig::from_file(dir.path().join("absent.toml")).expect_err("no file");

    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_roster_defaults_to_variant_players() {
    let variant = Variant::only_x();
    let config = ArenaConfig::default();

    let roster = config.roster(&variant).expect("valid roster");

    assert_eq!(roster.players(), variant.default_players());
}

#[test]
fn test_roster_from_configured_players() {
    let variant = Variant::standard();
    let config = ArenaConfig::default().with_players(vec![
        PlayerConfig::new(7, PlayerSymbol::X, Some(AgentKind::Random)),
        PlayerConfig::new(3, PlayerSymbol::O, None),
    ]);

    let roster = config.roster(&variant).expect("valid roster");

    assert_eq!(roster.first().id(), PlayerId(7));
    assert_eq!(roster.first().agent(), Some(AgentKind::Random));
    assert_eq!(roster.players()[1].agent(), None);
}

#[test]
fn test_cli_style_overrides() {
    let config = ArenaConfig::default()
        .with_variant(VariantId::OnlyX)
        .with_rounds(5);

    assert_eq!(*config.variant(), VariantId::OnlyX);
    assert_eq!(*config.rounds(), 5);
}
