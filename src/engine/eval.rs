//! Terminal-state scoring for the search

use crate::tictactoe::{GameState, Player};

/// Score assigned to a won terminal position
pub const WIN_SCORE: i32 = 10;

/// Evaluate a terminal state from `perspective`'s point of view.
///
/// Returns +10 if `perspective` has won, -10 if the opponent has won, and 0
/// for a draw. Callers must only invoke this at terminal states; a
/// non-terminal state degenerately scores 0.
///
/// The score is depth-independent on purpose: a win in one ply and a win in
/// five plies score identically, so the engine cannot prefer the fastest win
/// among equally winning lines. With exhaustive search over a 3x3 board this
/// never changes the game-theoretic outcome.
pub fn evaluate(state: &GameState, perspective: Player) -> i32 {
    match state.winner {
        Some(winner) if winner == perspective => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}
