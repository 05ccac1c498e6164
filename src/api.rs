//! API boundary: JSON envelope contract and per-session state
//!
//! The engine itself knows nothing about HTTP; this layer maps engine
//! results into the `{status: "success"|"error"}` envelope the frontend
//! consumes and owns the turn bookkeeping for live games.

pub mod envelope;
pub mod session;
#[cfg(feature = "server")]
pub mod server;

pub use envelope::{
    AiMoveResponse, AiRequest, DecisionTreeResponse, GameStateResponse, MessageResponse,
    MovePayload, MoveRequest, SearchStats, SessionRequest, Status,
};
pub use session::Session;
#[cfg(feature = "server")]
pub use server::SessionStore;
