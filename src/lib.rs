//! Tic-tac-toe engine with full decision-tree capture
//!
//! The engine plays perfect tic-tac-toe by minimax search, optionally with
//! alpha-beta pruning, and records every position it examines in a decision
//! tree suitable for visualization. Alpha-beta is an exact optimization
//! here: it always returns the same move scores as plain minimax, while
//! exploring fewer nodes; pruned subtrees appear in the tree as unscored
//! placeholder nodes.
//!
//! The crate is organized as:
//!
//! - [`tictactoe`]: board representation, rules, win detection
//! - [`engine`]: evaluation, search, decision-tree capture
//! - [`api`]: JSON envelope contract and per-session state (HTTP server
//!   behind the `server` feature)
//! - [`cli`]: command-line interface

pub mod api;
pub mod cli;
pub mod engine;
pub mod error;
pub mod tictactoe;

pub use error::{Error, Result};
