//! Request and response types for the HTTP boundary
//!
//! Every response carries a `status` discriminator; errors additionally map
//! to an HTTP status code through [`crate::Error::status_code`]. Field names
//! match the JSON contract of the visualization frontend exactly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tictactoe::{GameState, Player};

/// Envelope discriminator: `"success"` or `"error"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Plain message envelope, used for reset acknowledgements and all errors
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: Status,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        MessageResponse {
            status: Status::Success,
            message: message.into(),
        }
    }

    pub fn error(err: &crate::Error) -> Self {
        MessageResponse {
            status: Status::Error,
            message: err.to_string(),
        }
    }
}

/// Current game state wrapped in the success envelope
#[derive(Debug, Serialize)]
pub struct GameStateResponse {
    pub status: Status,
    pub game_state: GameState,
}

/// A move as the frontend expects it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MovePayload {
    pub row: usize,
    pub col: usize,
}

/// Search instrumentation attached to AI responses
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchStats {
    pub nodes_explored: u64,
    pub decision_time_ms: f64,
}

/// Response for the AI-move endpoints.
///
/// `game_state` is present only when the move was actually applied to the
/// session board; `decision_tree` is `null` when the opening shortcut
/// answered without searching.
#[derive(Debug, Serialize)]
pub struct AiMoveResponse {
    pub status: Status,
    #[serde(rename = "move")]
    pub chosen: MovePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
    pub stats: SearchStats,
    pub decision_tree: Value,
}

/// Response for the tree-only endpoint
#[derive(Debug, Serialize)]
pub struct DecisionTreeResponse {
    pub status: Status,
    pub stats: SearchStats,
    pub decision_tree: Value,
}

/// Body of `make_move` requests; coordinates are optional so their absence
/// can be reported through the envelope instead of a deserialization fault
#[derive(Debug, Default, Deserialize)]
pub struct MoveRequest {
    pub row: Option<usize>,
    pub col: Option<usize>,
    #[serde(default)]
    pub session: Option<String>,
}

/// Body of the AI endpoints
#[derive(Debug, Deserialize)]
pub struct AiRequest {
    #[serde(default = "default_use_alpha_beta")]
    pub use_alpha_beta: bool,
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub session: Option<String>,
}

impl Default for AiRequest {
    fn default() -> Self {
        AiRequest {
            use_alpha_beta: true,
            player: None,
            session: None,
        }
    }
}

/// Body of session-only requests (reset)
#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub session: Option<String>,
}

fn default_use_alpha_beta() -> bool {
    true
}
