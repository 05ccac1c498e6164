//! Position analysis
//!
//! Runs both search variants on a position and reports what they agree on
//! (the move and its score) and what they differ in (node counts, pruning).

use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::cli::output;
use crate::engine::{DecisionTree, SearchEngine};
use crate::tictactoe::{GameState, LineAnalyzer, Player};

#[derive(Parser, Debug)]
#[command(about = "Analyze a position with both search variants")]
pub struct AnalyzeArgs {
    /// Board string, row-major with '.' for empty cells (e.g. "XX..O....").
    /// An optional "_X"/"_O" suffix forces the side to move. Defaults to the
    /// empty board.
    pub state: Option<String>,

    /// Side to evaluate for (defaults to the side to move)
    #[arg(long, value_enum)]
    pub player: Option<PlayerArg>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(arg: PlayerArg) -> Player {
        match arg {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

struct VariantReport {
    label: &'static str,
    best_move: (usize, usize),
    score: i32,
    nodes: u64,
    tree_size: usize,
    pruned: usize,
    max_depth: usize,
    elapsed_ms: f64,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let state = match &args.state {
        Some(s) => GameState::from_string(s)?,
        None => GameState::new(),
    };
    let player = args
        .player
        .map(Player::from)
        .unwrap_or(state.current_player);

    output::print_section("Position Analysis");
    println!("{state}");
    output::print_kv("To move", &state.current_player.to_string());
    output::print_kv("Evaluating for", &player.to_string());

    if state.is_over {
        match state.winner {
            Some(winner) => println!("\nGame over: {winner} has won."),
            None => println!("\nGame over: draw."),
        }
        return Ok(());
    }

    for side in [Player::X, Player::O] {
        let threats = LineAnalyzer::winning_moves(&state.cells, side);
        if !threats.is_empty() {
            let formatted: Vec<String> = threats
                .iter()
                .map(|(row, col)| format!("({row}, {col})"))
                .collect();
            output::print_kv(
                &format!("Immediate wins for {side}"),
                &formatted.join(", "),
            );
        }
    }

    let spinner = output::create_spinner("Searching with both variants...");
    let plain = run_variant(&state, player, false)?;
    let pruning = run_variant(&state, player, true)?;
    spinner.finish_and_clear();

    for report in [&plain, &pruning] {
        output::print_subsection(report.label);
        output::print_kv(
            "Best move",
            &format!("({}, {})", report.best_move.0, report.best_move.1),
        );
        output::print_kv("Score", &report.score.to_string());
        output::print_kv("Nodes explored", &output::format_number(report.nodes));
        output::print_kv("Tree nodes", &output::format_number(report.tree_size as u64));
        output::print_kv("Pruned placeholders", &report.pruned.to_string());
        output::print_kv("Max depth", &report.max_depth.to_string());
        output::print_kv("Time", &format!("{:.2} ms", report.elapsed_ms));
    }

    output::print_subsection("Comparison");
    if plain.best_move == pruning.best_move && plain.score == pruning.score {
        println!(
            "  Both variants agree: ({}, {}) scoring {}",
            plain.best_move.0, plain.best_move.1, plain.score
        );
    } else {
        // The variants must agree; a mismatch is a search bug
        println!(
            "  WARNING: variants disagree (plain {:?}/{} vs alpha-beta {:?}/{})",
            plain.best_move, plain.score, pruning.best_move, pruning.score
        );
    }
    let saved = plain.nodes.saturating_sub(pruning.nodes);
    let pct = if plain.nodes > 0 {
        100.0 * saved as f64 / plain.nodes as f64
    } else {
        0.0
    };
    output::print_kv(
        "Pruning savings",
        &format!("{} nodes ({pct:.1}%)", output::format_number(saved)),
    );

    print_principal_variation(&state, player);

    Ok(())
}

fn run_variant(state: &GameState, player: Player, use_alpha_beta: bool) -> Result<VariantReport> {
    let mut engine = SearchEngine::new(player);
    let started = Instant::now();
    let best_move = engine
        .search(state, use_alpha_beta)
        .ok_or_else(|| anyhow::anyhow!("no legal moves in the given position"))?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let tree = engine
        .decision_tree()
        .ok_or_else(|| anyhow::anyhow!("search completed without building a tree"))?;
    let score = chosen_score(tree, best_move)
        .ok_or_else(|| anyhow::anyhow!("chosen move is missing from the decision tree"))?;
    let pruned = tree.ids().filter(|&id| tree.node(id).pruned()).count();

    Ok(VariantReport {
        label: if use_alpha_beta {
            "Alpha-beta pruning"
        } else {
            "Plain minimax"
        },
        best_move,
        score,
        nodes: engine.nodes_explored(),
        tree_size: tree.len(),
        pruned,
        max_depth: tree.max_depth(),
        elapsed_ms,
    })
}

/// Score of the root child holding the chosen move
fn chosen_score(tree: &DecisionTree, mv: (usize, usize)) -> Option<i32> {
    tree.children(DecisionTree::ROOT)
        .iter()
        .find(|&&id| tree.node(id).mv == Some(mv))
        .and_then(|&id| tree.node(id).score())
}

fn print_principal_variation(state: &GameState, player: Player) {
    let mut engine = SearchEngine::new(player);
    if engine.search(state, true).is_none() {
        return;
    }
    let Some(tree) = engine.decision_tree() else {
        return;
    };

    let line: Vec<String> = tree
        .principal_variation()
        .iter()
        .filter_map(|&id| tree.node(id).mv)
        .map(|(row, col)| format!("({row}, {col})"))
        .collect();
    if !line.is_empty() {
        output::print_kv("Principal variation", &line.join(" -> "));
    }
}
