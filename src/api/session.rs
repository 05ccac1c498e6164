//! Per-session game and engine state
//!
//! Each session owns its own board and search engine, so independent clients
//! never share mutable state. Turn bookkeeping (whose move it is) lives here
//! at the boundary; the engine itself has no notion of being "on turn".

use std::time::Instant;

use serde_json::Value;

use super::envelope::{
    AiMoveResponse, DecisionTreeResponse, GameStateResponse, MessageResponse, MovePayload,
    SearchStats, Status,
};
use crate::engine::SearchEngine;
use crate::tictactoe::{GameState, Player};
use crate::{Error, Result};

/// One client's live game: a board plus the engine playing against them
#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    engine: SearchEngine,
}

impl Session {
    /// Fresh session: empty board, engine playing O
    pub fn new() -> Self {
        Session {
            game: GameState::new(),
            engine: SearchEngine::new(Player::O),
        }
    }

    /// Direct access to the board, for inspection
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Reset the board for a new game
    pub fn reset(&mut self) -> MessageResponse {
        self.game.reset();
        MessageResponse::success("Game reset")
    }

    /// Current game state in the success envelope
    pub fn game_state(&self) -> GameStateResponse {
        GameStateResponse {
            status: Status::Success,
            game_state: self.game,
        }
    }

    /// Apply a human move to the session board.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] when a coordinate is absent,
    /// [`Error::InvalidMove`] when the board rejects the move.
    pub fn make_move(&mut self, row: Option<usize>, col: Option<usize>) -> Result<GameStateResponse> {
        let row = row.ok_or(Error::MissingField { field: "row" })?;
        let col = col.ok_or(Error::MissingField { field: "col" })?;

        if !self.game.apply_move(row, col) {
            return Err(Error::InvalidMove { row, col });
        }

        Ok(self.game_state())
    }

    /// Compute the engine's best move without applying it.
    ///
    /// # Errors
    ///
    /// [`Error::NoMovesAvailable`] when the board has no legal moves.
    pub fn get_ai_move(
        &mut self,
        use_alpha_beta: bool,
        player: Option<Player>,
    ) -> Result<AiMoveResponse> {
        self.engine.set_player(player.unwrap_or(Player::O));

        let (chosen, stats, tree) = self.run_search(use_alpha_beta)?;
        Ok(AiMoveResponse {
            status: Status::Success,
            chosen,
            game_state: None,
            stats,
            decision_tree: tree,
        })
    }

    /// Compute the engine's best move and play it on the session board.
    ///
    /// # Errors
    ///
    /// [`Error::WrongTurn`] when it is not the engine's turn,
    /// [`Error::NoMovesAvailable`] when the board has no legal moves,
    /// [`Error::EngineMoveRejected`] if the board refuses the engine's own
    /// move (impossible for a well-formed session; kept for the 500 contract).
    pub fn ai_make_move(
        &mut self,
        use_alpha_beta: bool,
        player: Option<Player>,
    ) -> Result<AiMoveResponse> {
        let player = player.unwrap_or(Player::O);
        self.engine.set_player(player);

        if self.game.current_player != player {
            return Err(Error::WrongTurn { player });
        }

        let (chosen, stats, tree) = self.run_search(use_alpha_beta)?;
        if !self.game.apply_move(chosen.row, chosen.col) {
            return Err(Error::EngineMoveRejected);
        }

        Ok(AiMoveResponse {
            status: Status::Success,
            chosen,
            game_state: Some(self.game),
            stats,
            decision_tree: tree,
        })
    }

    /// Run a search purely to capture its decision tree.
    ///
    /// Unlike the move endpoints this succeeds even on a full board; the
    /// frontend may ask for a tree at any point of the game.
    pub fn decision_tree(
        &mut self,
        use_alpha_beta: bool,
        player: Option<Player>,
    ) -> Result<DecisionTreeResponse> {
        self.engine
            .set_player(player.unwrap_or(self.game.current_player));

        let started = Instant::now();
        self.engine.get_best_move(&self.game, use_alpha_beta);
        let stats = SearchStats {
            nodes_explored: self.engine.nodes_explored(),
            decision_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };

        Ok(DecisionTreeResponse {
            status: Status::Success,
            stats,
            decision_tree: self.tree_json()?,
        })
    }

    fn run_search(&mut self, use_alpha_beta: bool) -> Result<(MovePayload, SearchStats, Value)> {
        let started = Instant::now();
        let best = self.engine.get_best_move(&self.game, use_alpha_beta);
        let stats = SearchStats {
            nodes_explored: self.engine.nodes_explored(),
            decision_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };

        let (row, col) = best.ok_or(Error::NoMovesAvailable)?;
        Ok((MovePayload { row, col }, stats, self.tree_json()?))
    }

    fn tree_json(&self) -> Result<Value> {
        match self.engine.decision_tree() {
            Some(tree) => Ok(serde_json::to_value(tree)?),
            None => Ok(Value::Null),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_move_requires_coordinates() {
        let mut session = Session::new();
        let err = session.make_move(Some(0), None).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "col" }));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_make_move_rejects_occupied_cell() {
        let mut session = Session::new();
        session.make_move(Some(0), Some(0)).unwrap();
        // It's O's turn now, but occupancy is checked regardless of player
        let err = session.make_move(Some(0), Some(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidMove { row: 0, col: 0 }));
    }

    #[test]
    fn test_ai_make_move_checks_turn() {
        let mut session = Session::new();
        // Empty board: X to move, engine plays O
        let err = session.ai_make_move(true, None).unwrap_err();
        assert!(matches!(err, Error::WrongTurn { player: Player::O }));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_ai_make_move_applies_the_move() {
        let mut session = Session::new();
        session.make_move(Some(0), Some(0)).unwrap();

        let response = session.ai_make_move(true, None).unwrap();
        // Opening shortcut: center, no search, no tree
        assert_eq!(response.chosen.row, 1);
        assert_eq!(response.chosen.col, 1);
        assert_eq!(response.stats.nodes_explored, 0);
        assert!(response.decision_tree.is_null());

        let state = response.game_state.expect("move was applied");
        assert_eq!(state.moves_made, 2);
        assert_eq!(state.current_player, Player::X);
    }

    #[test]
    fn test_get_ai_move_leaves_board_untouched() {
        let mut session = Session::new();
        session.make_move(Some(0), Some(0)).unwrap();
        session.make_move(Some(1), Some(1)).unwrap();
        session.make_move(Some(0), Some(1)).unwrap();
        let before = *session.game();

        let response = session.get_ai_move(true, None).unwrap();
        assert_eq!(*session.game(), before);
        assert!(response.game_state.is_none());
        assert!(response.stats.nodes_explored > 0);
        assert!(!response.decision_tree.is_null());
    }

    #[test]
    fn test_no_moves_available_on_full_board() {
        let mut session = Session::new();
        // X O X / X O O / O X X: a completed draw
        for (row, col) in [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (1, 2),
            (2, 2),
            (2, 1),
        ] {
            session.make_move(Some(row), Some(col)).unwrap();
        }

        let err = session.get_ai_move(true, None).unwrap_err();
        assert!(matches!(err, Error::NoMovesAvailable));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_reset_envelope() {
        let mut session = Session::new();
        session.make_move(Some(0), Some(0)).unwrap();

        let response = session.reset();
        assert_eq!(response.status, Status::Success);
        assert_eq!(response.message, "Game reset");
        assert_eq!(session.game().moves_made, 0);
    }
}
