// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the cklint application.
//!
//! These errors cover the glue layers only: configuration, repository access,
//! hook management and terminal I/O. Rule findings are never raised through
//! this module; they are reported as [`crate::rules::ValidationError`] values.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cklint operations.
#[derive(Error, Debug)]
pub enum CklintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Hook errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // One or more commits failed validation
    #[error("Validation failed: {failed} of {total} commits have errors")]
    ValidationFailed { failed: usize, total: usize },

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for CklintError {
    fn from(err: dialoguer::Error) -> Self {
        CklintError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Hook-related errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook already exists: {hook}")]
    AlreadyExists { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },
}

/// Result type alias for cklint operations.
pub type Result<T> = std::result::Result<T, CklintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CklintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/cklint.toml"),
        };
        assert!(err.to_string().contains("/path/to/cklint.toml"));
    }

    #[test]
    fn test_validation_failed_display() {
        let err = CklintError::ValidationFailed {
            failed: 2,
            total: 5,
        };
        assert_eq!(
            err.to_string(),
            "Validation failed: 2 of 5 commits have errors"
        );
    }

    #[test]
    fn test_cklint_error_from_git_error() {
        let err: CklintError = GitError::InvalidReference {
            reference: "HEAD~99".to_string(),
        }
        .into();
        assert!(err.to_string().contains("HEAD~99"));
    }

    #[test]
    fn test_result_ext_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("reading message file").unwrap_err();
        assert_eq!(err.to_string(), "reading message file: missing");
    }
}
