//! Temporary extraction directories and blocking helpers.

use std::path::Path;

use tempfile::TempDir;

use crate::error::PrepareError;

/// Create a temporary directory under `root`, removed when dropped.
pub fn staging_dir(root: &Path, prefix: &str) -> Result<TempDir, PrepareError> {
    std::fs::create_dir_all(root)?;
    let dir = tempfile::Builder::new().prefix(prefix).tempdir_in(root)?;
    tracing::debug!(path = %dir.path().display(), "Created staging directory");
    Ok(dir)
}

/// Run filesystem-heavy work on the blocking pool.
pub async fn blocking<T, F>(work: F) -> Result<T, PrepareError>
where
    F: FnOnce() -> Result<T, PrepareError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_staging_dir_is_removed_on_drop() {
        let root = tempdir().unwrap();
        let staging = staging_dir(root.path(), "_msrvtt_tmp_extract").unwrap();
        let path = staging.path().to_path_buf();
        assert!(path.starts_with(root.path()));
        assert!(path.is_dir());

        drop(staging);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_blocking_propagates_errors() {
        let result: Result<(), _> =
            blocking(|| Err(PrepareError::InvalidOption("bad".to_string()))).await;
        assert!(matches!(result, Err(PrepareError::InvalidOption(_))));
    }
}
