//! User path normalisation.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Expand `~` and make a user-supplied path absolute against the working directory.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(normalize_user_path("  "), Err(PathError::EmptyPath)));
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let path = normalize_user_path("assets/videos/msrvtt").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("assets/videos/msrvtt"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(normalize_user_path("~").unwrap(), home);
            assert_eq!(normalize_user_path("~/clips").unwrap(), home.join("clips"));
        }
    }
}
