//! Common test utilities for the tictacmaster test suite.

use tictacmaster::tictactoe::GameState;

/// Build a position by applying moves in order from the empty board,
/// panicking on any illegal move
pub fn state_after(moves: &[(usize, usize)]) -> GameState {
    let mut state = GameState::new();
    for &(row, col) in moves {
        assert!(
            state.apply_move(row, col),
            "illegal move ({row}, {col}) while building a test position"
        );
    }
    state
}

/// Every position reachable after exactly one or two opening moves
pub fn shallow_positions() -> Vec<GameState> {
    let mut positions = Vec::new();
    for first in all_cells() {
        positions.push(state_after(&[first]));
        for second in all_cells() {
            if second != first {
                positions.push(state_after(&[first, second]));
            }
        }
    }
    positions
}

fn all_cells() -> Vec<(usize, usize)> {
    (0..3).flat_map(|row| (0..3).map(move |col| (row, col))).collect()
}
