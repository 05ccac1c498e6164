//! Perfect play from both sides must always draw, from the empty board and
//! from every possible opening move, with either search variant.

mod common;

use tictacmaster::engine::SearchEngine;
use tictacmaster::tictactoe::{GameState, Player};

/// Drive a game to completion with shortcut-free searches on every ply
fn play_out(mut game: GameState, use_alpha_beta: bool) -> GameState {
    let mut x_engine = SearchEngine::new(Player::X);
    let mut o_engine = SearchEngine::new(Player::O);

    while !game.is_over {
        let engine = match game.current_player {
            Player::X => &mut x_engine,
            Player::O => &mut o_engine,
        };
        let Some((row, col)) = engine.search(&game, use_alpha_beta) else {
            break;
        };
        assert!(game.apply_move(row, col), "engine chose an illegal move");
    }
    game
}

#[test]
fn empty_board_self_play_draws() {
    for use_alpha_beta in [false, true] {
        let final_state = play_out(GameState::new(), use_alpha_beta);
        assert!(final_state.is_over);
        assert_eq!(
            final_state.winner, None,
            "self-play must draw (alpha_beta={use_alpha_beta})"
        );
        assert_eq!(final_state.moves_made, 9);
    }
}

#[test]
fn all_openings_draw_with_pruning() {
    for row in 0..3 {
        for col in 0..3 {
            let final_state = play_out(common::state_after(&[(row, col)]), true);
            assert_eq!(
                final_state.winner, None,
                "opening ({row}, {col}) did not draw"
            );
            assert_eq!(final_state.moves_made, 9);
        }
    }
}

#[test]
fn all_openings_draw_without_pruning() {
    for row in 0..3 {
        for col in 0..3 {
            let final_state = play_out(common::state_after(&[(row, col)]), false);
            assert_eq!(
                final_state.winner, None,
                "opening ({row}, {col}) did not draw"
            );
        }
    }
}

#[test]
fn engine_punishes_a_blunder() {
    // X opens at a corner; O's edge reply loses against perfect play
    let game = common::state_after(&[(0, 0), (0, 1)]);
    let final_state = play_out(game, true);
    assert_eq!(final_state.winner, Some(Player::X));
}

#[test]
fn production_path_also_draws() {
    // Same drive but through get_best_move, opening shortcut included
    let mut game = GameState::new();
    let mut x_engine = SearchEngine::new(Player::X);
    let mut o_engine = SearchEngine::new(Player::O);

    while !game.is_over {
        let engine = match game.current_player {
            Player::X => &mut x_engine,
            Player::O => &mut o_engine,
        };
        let Some((row, col)) = engine.get_best_move(&game, true) else {
            break;
        };
        assert!(game.apply_move(row, col));
    }

    assert_eq!(game.winner, None);
    assert_eq!(game.moves_made, 9);
}
