//! Output formatting and progress bars for CLI

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const SECTION_RULE: usize = 60;
const KEY_COLUMN: usize = 24;

/// Create a progress bar for self-play runs
pub fn create_game_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Create a spinner for analysis tasks
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    let rule = "=".repeat(SECTION_RULE);
    println!("\n{rule}\n{title}\n{rule}");
}

/// Print a subsection header, underlined to its own width
pub fn print_subsection(title: &str) {
    println!("\n{title}\n{}", "-".repeat(title.len().max(24)));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair, keys aligned into a fixed column
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<KEY_COLUMN$} {value}", format!("{key}:"));
}

/// Render a board with cell separators for console play
pub fn render_board(state: &crate::tictactoe::GameState) -> String {
    let mut out = String::new();
    for (i, row) in state.cells.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell.to_char() {
                '.' => " ".to_string(),
                c => c.to_string(),
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
        if i < 2 {
            out.push_str(&"-".repeat(9));
            out.push('\n');
        }
    }
    out
}
