//! Export command
//!
//! Two exports are supported: the decision tree of a single search as JSON
//! (the same shape the HTTP API serves) and a CSV of search effort across
//! all nine openings for comparing the variants offline.

use std::{
    fs::File,
    io::Write,
    path::PathBuf,
};

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use crate::engine::{DecisionTree, SearchEngine};
use crate::tictactoe::{GameState, Player};

#[derive(Parser, Debug)]
#[command(about = "Export decision trees and search statistics")]
pub struct ExportArgs {
    /// Type of data to export
    #[arg(value_enum)]
    pub data_type: DataType,

    /// Board string for tree exports (defaults to the empty board);
    /// ignored for opening statistics
    pub state: Option<String>,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Search with plain minimax instead of alpha-beta pruning
    #[arg(long)]
    pub plain: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum DataType {
    /// Decision tree of one search, as JSON
    Tree,
    /// Per-opening node counts for both variants, as CSV
    Openings,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    match args.data_type {
        DataType::Tree => export_tree(args.state.as_deref(), &args.output, !args.plain),
        DataType::Openings => export_openings(&args.output),
    }
}

fn export_tree(state_str: Option<&str>, output: &PathBuf, use_alpha_beta: bool) -> Result<()> {
    let state = match state_str {
        Some(s) => GameState::from_string(s)?,
        None => GameState::new(),
    };

    let mut engine = SearchEngine::new(state.current_player);
    engine
        .search(&state, use_alpha_beta)
        .ok_or_else(|| anyhow!("cannot export a tree for a terminal position"))?;
    let tree = engine
        .decision_tree()
        .ok_or_else(|| anyhow!("search completed without building a tree"))?;

    let file = File::create(output)?;
    serde_json::to_writer_pretty(file, tree)?;

    println!("✓ Decision tree exported to: {}", output.display());
    println!(
        "  {} nodes, max depth {}, {} explored",
        tree.len(),
        tree.max_depth(),
        engine.nodes_explored()
    );
    Ok(())
}

fn export_openings(output: &PathBuf) -> Result<()> {
    let mut file = File::create(output)?;
    writeln!(file, "# Tic-Tac-Toe search effort per opening")?;
    writeln!(file, "# Engine responds as O to each opening move by X")?;
    writeln!(file)?;
    writeln!(
        file,
        "OpeningRow,OpeningCol,PlainNodes,AlphaBetaNodes,SavingsPct,Score"
    )?;

    for row in 0..3 {
        for col in 0..3 {
            let mut state = GameState::new();
            state.apply_move(row, col);

            let (plain_nodes, _) = measure(&state, false)?;
            let (pruning_nodes, score) = measure(&state, true)?;
            let savings = 100.0 * (plain_nodes - pruning_nodes) as f64 / plain_nodes as f64;

            writeln!(
                file,
                "{row},{col},{plain_nodes},{pruning_nodes},{savings:.1},{score}"
            )?;
        }
    }

    println!("✓ Opening statistics exported to: {}", output.display());
    Ok(())
}

/// Node count and chosen-move score of one shortcut-free search as O
fn measure(state: &GameState, use_alpha_beta: bool) -> Result<(u64, i32)> {
    let mut engine = SearchEngine::new(Player::O);
    let mv = engine
        .search(state, use_alpha_beta)
        .ok_or_else(|| anyhow!("opening position has no legal replies"))?;
    let tree = engine
        .decision_tree()
        .ok_or_else(|| anyhow!("search completed without building a tree"))?;
    let score = tree
        .children(DecisionTree::ROOT)
        .iter()
        .find(|&&id| tree.node(id).mv == Some(mv))
        .and_then(|&id| tree.node(id).score())
        .ok_or_else(|| anyhow!("chosen move is missing from the decision tree"))?;
    Ok((engine.nodes_explored(), score))
}
