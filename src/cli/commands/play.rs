//! Interactive console game against the engine
//!
//! The human plays X and moves first; the engine answers as O, using the
//! same search path the HTTP API uses (opening shortcut included).

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::cli::output;
use crate::engine::SearchEngine;
use crate::tictactoe::{GameState, Player};

#[derive(Parser, Debug)]
#[command(about = "Play against the engine in the console")]
pub struct PlayArgs {
    /// Search with plain minimax instead of alpha-beta pruning
    #[arg(long)]
    pub no_alpha_beta: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let use_alpha_beta = !args.no_alpha_beta;

    output::print_section("Tic-Tac-Toe");
    println!("You are X. Enter moves as 'row,col' (0-2 each), or 'q' to quit.");

    let mut game = GameState::new();
    let mut engine = SearchEngine::new(Player::O);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", output::render_board(&game));
        if game.is_over {
            break;
        }

        if game.current_player == Player::X {
            let Some(mv) = prompt_move(&mut lines)? else {
                println!("Goodbye.");
                return Ok(());
            };
            if !game.apply_move(mv.0, mv.1) {
                println!("That cell is taken or out of range. Try again.");
                continue;
            }
        } else {
            let Some((row, col)) = engine.get_best_move(&game, use_alpha_beta) else {
                break;
            };
            game.apply_move(row, col);
            if engine.nodes_explored() > 0 {
                println!(
                    "Engine plays ({row}, {col}) after exploring {} nodes.",
                    output::format_number(engine.nodes_explored())
                );
            } else {
                println!("Engine plays ({row}, {col}) from its opening book.");
            }
        }
    }

    match game.winner {
        Some(Player::X) => println!("You win!"),
        Some(Player::O) => println!("The engine wins."),
        None => println!("Draw."),
    }

    Ok(())
}

/// Ask for a move until the input parses; `None` means the player quit
fn prompt_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<(usize, usize)>> {
    loop {
        print!("Your move: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        match parse_move(trimmed) {
            Some(mv) => return Ok(Some(mv)),
            None => println!("Could not read that as 'row,col'. Try again."),
        }
    }
}

/// Parse "row,col" (or "row col") with both coordinates in 0..=2
fn parse_move(input: &str) -> Option<(usize, usize)> {
    let mut parts = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() || row > 2 || col > 2 {
        return None;
    }
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("0,2"), Some((0, 2)));
        assert_eq!(parse_move("1, 1"), Some((1, 1)));
        assert_eq!(parse_move("2 0"), Some((2, 0)));
        assert_eq!(parse_move("3,0"), None);
        assert_eq!(parse_move("0,1,2"), None);
        assert_eq!(parse_move("a,b"), None);
        assert_eq!(parse_move(""), None);
    }
}
