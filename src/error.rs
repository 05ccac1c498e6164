//! Error types for the tictacmaster crate

use thiserror::Error;

use crate::tictactoe::Player;

/// Main error type for the tictacmaster crate
///
/// The search engine itself never fails: every position it visits is reached
/// through legal simulated moves. These variants cover the board-parsing
/// surface, the API boundary, and IO/serialization at the edges.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({row}, {col}) is occupied, out of range, or the game is over")]
    InvalidMove { row: usize, col: usize },

    #[error("no valid moves available")]
    NoMovesAvailable,

    #[error("not {player}'s turn")]
    WrongTurn { player: Player },

    #[error("failed to make AI move")]
    EngineMoveRejected,

    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count}")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid player '{player}' in '{context}' (expected 'X' or 'O')")]
    InvalidPlayerString { player: String, context: String },

    #[error("invalid board '{context}': {reason}")]
    InvalidBoard { context: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// HTTP status code the API boundary maps this error to.
    ///
    /// Client mistakes (bad move, no moves, wrong turn, malformed request)
    /// are 400; everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidMove { .. }
            | Error::NoMovesAvailable
            | Error::WrongTurn { .. }
            | Error::MissingField { .. }
            | Error::InvalidBoardLength { .. }
            | Error::InvalidCellCharacter { .. }
            | Error::InvalidPieceCounts { .. }
            | Error::InvalidPlayerString { .. }
            | Error::InvalidBoard { .. } => 400,
            _ => 500,
        }
    }
}
