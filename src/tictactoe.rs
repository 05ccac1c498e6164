//! Tic-Tac-Toe game state, rules, and line analysis

pub mod board;
pub mod lines;

pub use board::{Cell, GameState, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
