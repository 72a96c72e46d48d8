//! Tictac - terminal front end
//!
//! Plays matches on stdin/stdout and solves positions.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tictac_arena::{ArenaConfig, GameEvent, Orchestrator, Session, seats_for, solve};
use tictac_engine::{Outcome, Variant, VariantId};
use tokio::sync::{Mutex, mpsc};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictac_engine=info,tictac_arena=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            variant,
            rounds,
        } => run_play(config, variant, rounds).await,
        Command::Solve {
            board,
            player,
            variant,
            json,
        } => run_solve(&board, player, variant, json),
        Command::Variants => {
            list_variants();
            Ok(())
        }
    }
}

/// Play a match in the terminal
#[instrument(skip(config_path), fields(config = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    variant: Option<VariantId>,
    rounds: Option<u32>,
) -> Result<()> {
    let mut config = ArenaConfig::load_or_default(&config_path)?;
    if let Some(variant) = variant {
        config = config.with_variant(variant);
    }
    if let Some(rounds) = rounds {
        config = config.with_rounds(rounds);
    }

    let variant = Variant::from_id(*config.variant());
    let roster = config.roster(&variant)?;
    let session = Session::new(variant, roster).context("Cannot start session")?;
    info!(variant = %session.variant().id(), "Starting play");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (line_tx, line_rx) = mpsc::unbounded_channel();

    // Blocking stdin reads stay off the runtime.
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    println!("{}: {}", session.variant().name(), session.variant().description());
    let seats = seats_for(&session, Arc::new(Mutex::new(line_rx)), &event_tx);
    let mut orchestrator = Orchestrator::new(session, seats, &config, event_tx);
    let results = orchestrator.run().await?;
    drop(orchestrator);
    printer.await?;

    print_summary(&results);
    Ok(())
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::StateChanged(board) => println!("\n{}\n", board),
        GameEvent::AwaitingInput { player } => {
            println!("{} to move, type a cell number or \"x y\":", player)
        }
        GameEvent::AgentThinking { player } => println!("{} is thinking...", player),
        GameEvent::MoveMade { player, cell } => println!("{} took cell {}", player, cell + 1),
        GameEvent::Rejected { player, reason } => println!("{}: {}", player, reason),
        GameEvent::Remark { speaker, line, .. } => {
            if !line.is_empty() {
                println!("{}: \"{}\"", speaker, line);
            }
        }
        GameEvent::GameOver { round, outcome } => println!("Game {} over: {}", round, outcome),
    }
}

fn print_summary(results: &[Outcome]) {
    let ties = results.iter().filter(|o| matches!(o, Outcome::Tie)).count();
    println!("Played {} game(s), {} tie(s)", results.len(), ties);
    for (round, outcome) in results.iter().enumerate() {
        println!("  {}: {}", round + 1, outcome);
    }
}

/// Print the best line for a position
#[instrument]
fn run_solve(board: &str, player: Option<u32>, variant: VariantId, json: bool) -> Result<()> {
    let variant = Variant::from_id(variant);
    let roster = tictac_engine::Roster::new(variant.default_players().to_vec())?;
    let report = solve(&variant, &roster, board, player)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}\n", report.board.render());
    println!("{} to move, evaluation {}", report.player, report.score);
    let line: Vec<String> = report.moves.iter().map(|c| (c + 1).to_string()).collect();
    println!("Best line: {}", line.join(" "));
    Ok(())
}

fn list_variants() {
    for id in VariantId::iter() {
        let variant = Variant::from_id(id);
        let players: Vec<String> = variant
            .default_players()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("{:<10} {}", id, variant.name());
        println!("{:<10} {}", "", variant.description());
        println!("{:<10} default players: {}", "", players.join(", "));
    }
}
