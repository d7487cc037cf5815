// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Narrow interfaces to the collaborators rules depend on.
//!
//! Only the repository-dependent rules (`commitsahead`, `signedidentity`) see
//! these ports. Every other rule is a pure function of the commit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::commit::Commit;

/// Failure reported by a [`RepositoryPort`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The reference branch does not exist.
    #[error("reference '{reference}' not found")]
    ReferenceNotFound { reference: String },

    /// The operation observed a cancellation request.
    #[error("operation cancelled")]
    Cancelled,

    /// Any other repository failure.
    #[error("{message}")]
    Other { message: String },
}

/// Repository operations needed by the rules.
pub trait RepositoryPort {
    /// Number of commits reachable from HEAD but not from `reference`.
    fn commits_ahead_count(
        &self,
        cancel: &Cancellation,
        reference: &str,
    ) -> Result<usize, RepositoryError>;
}

/// The identity that produced a verified signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerIdentity {
    /// Name or SSH principal of the signer.
    pub name: String,
    /// Email address, when the verifier reports one.
    pub email: Option<String>,
    /// Key identifier or fingerprint.
    pub key_id: Option<String>,
}

impl SignerIdentity {
    /// Whether any of the identity fields equals `candidate` (case-insensitive).
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        self.name.eq_ignore_ascii_case(candidate)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(candidate))
            || self
                .key_id
                .as_deref()
                .is_some_and(|k| k.eq_ignore_ascii_case(candidate))
    }
}

impl std::fmt::Display for SignerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Failure reported by a [`SignatureVerifier`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("bad signature")]
    BadSignature,

    #[error("signing key is not known: {0}")]
    UnknownKey(String),

    #[error("verification cancelled")]
    Cancelled,

    #[error("verification unavailable: {0}")]
    Unavailable(String),
}

/// Cryptographic signature verification against trusted key material.
pub trait SignatureVerifier {
    /// Verify the commit's signature and report who made it.
    fn verify(
        &self,
        cancel: &Cancellation,
        commit: &Commit,
    ) -> Result<SignerIdentity, VerificationError>;
}

/// Cooperative cancellation signal for I/O-bound rules.
///
/// Cloning shares the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A signal that never fires on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that fires once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested or the deadline passed.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cancellation_shared_between_clones() {
        let cancel = Cancellation::new();
        let clone = cancel.clone();
        assert!(!clone.is_cancelled());
        cancel.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancellation_deadline() {
        let past = Instant::now()
            .checked_sub(Duration::from_millis(1))
            .unwrap_or_else(Instant::now);
        assert!(Cancellation::with_deadline(past).is_cancelled());
        let future = Instant::now() + Duration::from_secs(3600);
        assert!(!Cancellation::with_deadline(future).is_cancelled());
    }

    #[test]
    fn test_signer_identity_matches() {
        let identity = SignerIdentity {
            name: "Dev One".to_string(),
            email: Some("d1@example.com".to_string()),
            key_id: Some("ABCD1234".to_string()),
        };
        assert!(identity.matches("D1@EXAMPLE.COM"));
        assert!(identity.matches("abcd1234"));
        assert!(identity.matches("dev one"));
        assert!(!identity.matches("someone@else"));
        assert_eq!(identity.to_string(), "Dev One <d1@example.com>");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::ReferenceNotFound {
            reference: "main".to_string(),
        };
        assert_eq!(err.to_string(), "reference 'main' not found");
    }
}
