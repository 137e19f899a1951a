//! Command-line adapter for doomscroll.
//!
//! `prepare` fills the assets tree with a dataset, `launch` runs the scroll
//! feed over a prepared directory and `paths` prints where everything lives.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for suites that only use some of them
#[cfg(test)]
use tempfile as _;

// Binary-only dependencies
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod prepare_commands;

// Re-export primary types for convenient access
pub use bootstrap::CliConfig;
pub use commands::{Commands, LaunchArgs};
pub use error::CliError;
pub use parser::Cli;
pub use prepare_commands::PrepareCommand;
