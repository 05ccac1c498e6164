//! TicTacMaster CLI - Perfect-play tic-tac-toe engine with decision-tree capture
//!
//! This CLI provides a unified interface for:
//! - Playing against the engine in the console
//! - Analyzing positions with both search variants
//! - Driving engine-vs-engine games from every opening
//! - Exporting decision trees and search statistics
//! - Serving the JSON API for the visualization frontend

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tictacmaster")]
#[command(version, about = "Perfect-play tic-tac-toe engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine in the console
    Play(tictacmaster::cli::commands::play::PlayArgs),

    /// Analyze a position with both search variants
    Analyze(tictacmaster::cli::commands::analyze::AnalyzeArgs),

    /// Drive engine-vs-engine games from every opening
    Selfplay(tictacmaster::cli::commands::selfplay::SelfplayArgs),

    /// Export decision trees and search statistics
    Export(tictacmaster::cli::commands::export::ExportArgs),

    /// Run the HTTP API server
    #[cfg(feature = "server")]
    Serve(tictacmaster::cli::commands::serve::ServeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => tictacmaster::cli::commands::play::execute(args),
        Commands::Analyze(args) => tictacmaster::cli::commands::analyze::execute(args),
        Commands::Selfplay(args) => tictacmaster::cli::commands::selfplay::execute(args),
        Commands::Export(args) => tictacmaster::cli::commands::export::execute(args),
        #[cfg(feature = "server")]
        Commands::Serve(args) => tictacmaster::cli::commands::serve::execute(args),
    }
}
