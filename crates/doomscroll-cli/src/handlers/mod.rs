//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(config: &CliConfig, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call the library crates
//!   3. Format output for the terminal

pub mod launch;
pub mod paths;
pub mod prepare;
