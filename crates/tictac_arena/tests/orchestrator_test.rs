//! Tests for whole matches between computer and human seats.

use std::sync::Arc;
use tictac_arena::{ArenaConfig, GameEvent, Orchestrator, PlayerConfig, Session, seats_for};
use tictac_engine::{AgentKind, Outcome, PlayerSymbol, RemarkCategory, Variant, VariantId};
use tokio::sync::{Mutex, mpsc};

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn session_for(config: &ArenaConfig) -> Session {
    let variant = Variant::from_id(*config.variant());
    let roster = config.roster(&variant).expect("valid roster");
    Session::new(variant, roster).expect("valid session")
}

#[tokio::test(start_paused = true)]
async fn test_optimal_agents_always_draw() {
    let config = ArenaConfig::default().with_rounds(2).with_players(vec![
        PlayerConfig::new(1, PlayerSymbol::O, Some(AgentKind::Minimax)),
        PlayerConfig::new(2, PlayerSymbol::X, Some(AgentKind::MemoizedMinimax)),
    ]);
    let session = session_for(&config);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (_line_tx, line_rx) = mpsc::unbounded_channel::<String>();
    let seats = seats_for(&session, Arc::new(Mutex::new(line_rx)), &event_tx);
    let mut orchestrator = Orchestrator::new(session, seats, &config, event_tx);

    let results = orchestrator.run().await.expect("match runs");

    assert_eq!(results, vec![Outcome::Tie, Outcome::Tie]);
    let events = drain(&mut event_rx);
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 2);
    let moves = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MoveMade { .. }))
        .count();
    assert_eq!(moves, 18);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Remark {
            category: RemarkCategory::EndDraw,
            ..
        }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_human_input_is_validated_and_committed() {
    let config = ArenaConfig::default().with_players(vec![
        PlayerConfig::new(1, PlayerSymbol::O, None),
        PlayerConfig::new(2, PlayerSymbol::X, Some(AgentKind::Minimax)),
    ]);
    let session = session_for(&config);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    let seats = seats_for(&session, Arc::new(Mutex::new(line_rx)), &event_tx);
    let mut orchestrator = Orchestrator::new(session, seats, &config, event_tx);

    line_tx.send("middle".to_string()).expect("send");
    line_tx.send("5".to_string()).expect("send");
    drop(line_tx);

    let results = orchestrator.run().await.expect("match runs");

    assert!(results.is_empty());
    let board = orchestrator.session().board();
    let human = orchestrator.session().roster().players()[0];
    let agent = orchestrator.session().roster().players()[1];
    assert!(board.cells()[4].is_owned_by(&human));
    assert!(board.cells()[0].is_owned_by(&agent));

    let events = drain(&mut event_rx);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Rejected { .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::MoveMade { cell: 4, .. }
    )));
    assert!(events.iter().any(|e| matches!(e, GameEvent::AgentThinking { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_only_x_match_finishes() {
    let config = ArenaConfig::default()
        .with_variant(VariantId::OnlyX)
        .with_players(vec![
            PlayerConfig::new(1, PlayerSymbol::X, Some(AgentKind::MemoizedMinimax)),
            PlayerConfig::new(2, PlayerSymbol::X, Some(AgentKind::Random)),
        ]);
    let session = session_for(&config);
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let (_line_tx, line_rx) = mpsc::unbounded_channel::<String>();
    let seats = seats_for(&session, Arc::new(Mutex::new(line_rx)), &event_tx);
    let mut orchestrator = Orchestrator::new(session, seats, &config, event_tx);

    let results = orchestrator.run().await.expect("match runs");

    // The first player can force the second to complete a line.
    assert_eq!(
        results,
        vec![Outcome::Winner(orchestrator.session().roster().players()[0])]
    );
}
