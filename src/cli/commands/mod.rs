//! CLI command implementations

pub mod analyze;
pub mod export;
pub mod play;
pub mod selfplay;
#[cfg(feature = "server")]
pub mod serve;
