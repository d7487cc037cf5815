// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cklint - Git commit message linter
//!
//! Validates commit messages, trailers and signatures against a configurable
//! set of rules.
//!
//! # Features
//!
//! - **Conventional Commits**: type, scope, breaking marker and description checks
//! - **Subject and body rules**: length, case, punctuation, imperative mood, spelling
//! - **Trailers**: DCO sign-off and Jira references
//! - **Signatures**: GPG/SSH envelope validation and signer verification
//! - **Reporting**: text, JSON and GitHub Actions annotations
//! - **Git Hooks**: a managed `commit-msg` hook
//!
//! # Example
//!
//! ```
//! use cklint::config::CklintConfig;
//! use cklint::rules::{ErrorCode, ValidationEngine};
//!
//! let mut config = CklintConfig::default();
//! config.rules.disabled = vec!["signoff".into(), "signature".into()];
//!
//! let engine = ValidationEngine::new(&config);
//! let result = engine.validate_message("Added login.");
//!
//! assert!(!result.passed());
//! assert!(result.errors().any(|e| e.code == ErrorCode::InvalidSuffix));
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod conventional;
pub mod error;
pub mod git;
pub mod hooks;
pub mod ports;
pub mod report;
pub mod rules;
pub mod signature;

// Re-exports for convenience
pub use commit::Commit;
pub use config::CklintConfig;
pub use error::{CklintError, Result};
pub use rules::ValidationEngine;

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cklint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
