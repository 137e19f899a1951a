//! Paths command handler.
//!
//! Displays every resolved location of the assets tree in `key = value`
//! format.

use doomscroll_core::ResolvedPaths;

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Execute the paths command.
pub fn execute(config: &CliConfig) -> Result<(), CliError> {
    let root = config.assets_root.to_string_lossy();
    let paths = ResolvedPaths::resolve(Some(&root))?;
    println!("{paths}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_under_configured_root() {
        let config = CliConfig::with_assets_root("/srv/assets");
        assert!(execute(&config).is_ok());
    }
}
