//! Search engine: minimax, alpha-beta pruning, and decision-tree capture

pub mod eval;
pub mod search;
pub mod tree;

pub use eval::{evaluate, WIN_SCORE};
pub use search::SearchEngine;
pub use tree::{DecisionTree, Node, NodeId, Outcome};
