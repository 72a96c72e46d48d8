//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_engine::VariantId;

/// Tictac - tic-tac-toe variants against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Play tic-tac-toe variants against minimax agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Path to the match configuration
        #[arg(short, long, default_value = "tictac.toml")]
        config: PathBuf,

        /// Variant to play (overrides the config file)
        #[arg(long)]
        variant: Option<VariantId>,

        /// Number of games (overrides the config file)
        #[arg(short, long)]
        rounds: Option<u32>,
    },

    /// Print the best line for a position
    Solve {
        /// Board in row-major notation, e.g. "xo./.x./..o"
        #[arg(short, long)]
        board: String,

        /// Id of the player to move (inferred when omitted)
        #[arg(short, long)]
        player: Option<u32>,

        /// Variant to search under
        #[arg(long, default_value_t = VariantId::Standard)]
        variant: VariantId,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available variants
    Variants,
}
