//! CLI bootstrap - the composition root.
//!
//! Resolves the assets root and builds the concrete Hub client handed to the
//! preparers.

use std::path::PathBuf;

use doomscroll_core::assets_root;
use doomscroll_hf::{DefaultHfClient, HfClientConfig};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Root of the assets tree.
    pub assets_root: PathBuf,
    /// HuggingFace token, from `--hf-token` or `HF_TOKEN`.
    pub hf_token: Option<String>,
    /// Show progress bars.
    pub show_progress: bool,
}

impl CliConfig {
    /// Resolve configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(Self {
            assets_root: assets_root(cli.assets_dir.as_deref())?,
            hf_token: cli.hf_token.clone().filter(|t| !t.trim().is_empty()),
            show_progress: true,
        })
    }

    /// Config rooted at an explicit directory (used by tests).
    pub fn with_assets_root(root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: root.into(),
            hf_token: None,
            show_progress: false,
        }
    }
}

/// Build the HuggingFace client.
pub fn hf_client(config: &CliConfig) -> Result<DefaultHfClient, CliError> {
    let hf_config = HfClientConfig::new()
        .with_optional_token(config.hf_token.clone())
        .with_progress(config.show_progress);
    tracing::debug!(token = config.hf_token.is_some(), "Building HuggingFace client");
    Ok(DefaultHfClient::new(&hf_config)?)
}
