//! CLI-specific error types and mappings.
//!
//! Library errors are folded into [`CliError`], which decides the process
//! exit code.

use doomscroll_core::{CoreError, HfPortError, PathError};
use doomscroll_datasets::PrepareError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A remote service or required external tool is unavailable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process execution error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Process(_) => 71,     // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NoHomeDir | PathError::CurrentDirError(_) => Self::Config(err.to_string()),
            PathError::EmptyPath | PathError::NotADirectory(_) | PathError::DirectoryNotFound(_) => {
                Self::Arguments(err.to_string())
            }
            PathError::CreateFailed { .. } | PathError::NotWritable { .. } => {
                Self::Io(err.to_string())
            }
        }
    }
}

impl From<HfPortError> for CliError {
    fn from(err: HfPortError) -> Self {
        match err {
            HfPortError::Network { .. } => Self::Unavailable(err.to_string()),
            HfPortError::DatasetNotFound { .. }
            | HfPortError::FileNotFound { .. }
            | HfPortError::InvalidResponse { .. }
            | HfPortError::Other { .. } => Self::Core(format!("HuggingFace: {err}")),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Path(path_err) => path_err.into(),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::ExternalService(msg) => Self::Unavailable(msg),
            CoreError::Io(io_err) => Self::Io(io_err.to_string()),
            CoreError::Serialization(json_err) => Self::Core(json_err.to_string()),
        }
    }
}

impl From<PrepareError> for CliError {
    fn from(err: PrepareError) -> Self {
        match err {
            PrepareError::Hub(hub_err) => hub_err.into(),
            PrepareError::Path(path_err) => path_err.into(),
            PrepareError::Unavailable { .. } => Self::Unavailable(err.to_string()),
            PrepareError::InvalidOption(msg) => Self::Arguments(msg),
            PrepareError::Io(_) | PrepareError::Csv(_) => Self::Io(err.to_string()),
            PrepareError::Task(msg) => Self::Process(msg),
            PrepareError::Archive { .. } => Self::Core(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_directory_is_usage_error() {
        let err: CliError = PathError::DirectoryNotFound(PathBuf::from("/nope")).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_tool_is_unavailable() {
        let err: CliError = PrepareError::Unavailable {
            tool: "yt-dlp".to_string(),
            message: "not found".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 69);
        assert!(err.to_string().contains("yt-dlp"));
    }

    #[test]
    fn test_network_failure_is_unavailable() {
        let err: CliError = PrepareError::Hub(HfPortError::Network {
            message: "connection reset".to_string(),
        })
        .into();
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn test_invalid_option_is_usage_error() {
        let err: CliError = PrepareError::InvalidOption("workers must be at least 1".into()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_error_exit_code() {
        let err: CliError = std::io::Error::other("disk full").into();
        assert_eq!(err.exit_code(), 74);
    }
}
