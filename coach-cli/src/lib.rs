//! # coach-cli
//!
//! CLI foundation: argument parsing, config loading, and the chain pieces the `coach` binary
//! wires together.

pub mod cli;
pub mod config;
pub mod reply;

pub use cli::{Cli, Commands};
pub use config::CoachConfig;
pub use reply::CannedReplyHandler;
