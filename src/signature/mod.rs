// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Signature envelope validation.
//!
//! Classifies a raw signature blob as GPG, SSH or unknown and checks that its
//! envelope is structurally sound. Trust and cryptographic verification are
//! handled elsewhere, behind [`crate::ports::SignatureVerifier`].

pub mod armor;
pub mod ssh;

use serde::Serialize;
use thiserror::Error;

const PGP_BEGIN_MARKER: &str = "-----BEGIN PGP SIGNATURE-----";

/// Kind of signature, determined by marker sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    Gpg,
    Ssh,
    Unknown,
}

impl SignatureKind {
    /// Stable lowercase name, as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Gpg => "gpg",
            SignatureKind::Ssh => "ssh",
            SignatureKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a signature envelope was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("signature is empty")]
    Empty,

    #[error("signature is neither a PGP nor an SSH signature")]
    UnknownFormat,

    #[error("signature has a BEGIN marker but no matching END marker")]
    MissingEndMarker,

    #[error("malformed armor: {0}")]
    MalformedArmor(String),

    #[error("armor checksum does not match the payload")]
    ChecksumMismatch,

    #[error("armor block type is '{0}', expected 'PGP SIGNATURE'")]
    WrongBlockType(String),

    #[error("no parseable packet: {0}")]
    NoPacket(String),

    #[error("content is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("decoded blob does not start with the SSHSIG prefix")]
    MissingSshsigPrefix,

    #[error("decoded blob is {len} bytes, shorter than the minimum of 50")]
    TooShort { len: usize },
}

impl FormatError {
    /// Stable machine-readable identifier for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::Empty => "empty",
            FormatError::UnknownFormat => "unknown_format",
            FormatError::MissingEndMarker => "missing_end_marker",
            FormatError::MalformedArmor(_) => "malformed_armor",
            FormatError::ChecksumMismatch => "checksum_mismatch",
            FormatError::WrongBlockType(_) => "wrong_block_type",
            FormatError::NoPacket(_) => "no_packet",
            FormatError::InvalidBase64(_) => "invalid_base64",
            FormatError::MissingSshsigPrefix => "missing_sshsig_prefix",
            FormatError::TooShort { .. } => "too_short",
        }
    }

    /// Remediation advice for this failure.
    pub fn help(&self) -> &'static str {
        match self {
            FormatError::Empty => "Sign the commit with 'git commit -S'.",
            FormatError::UnknownFormat => {
                "Use a GPG or SSH signing key (git config gpg.format openpgp|ssh)."
            }
            FormatError::MissingEndMarker => {
                "The signature is truncated; re-sign the commit with 'git commit --amend -S'."
            }
            FormatError::MalformedArmor(_) | FormatError::ChecksumMismatch => {
                "The PGP armor is corrupted; re-sign the commit with 'git commit --amend -S'."
            }
            FormatError::WrongBlockType(_) => {
                "The armored block is not a signature; check that gpg is producing detached signatures."
            }
            FormatError::NoPacket(_) => {
                "The PGP payload holds no readable packet; re-sign with a working gpg installation."
            }
            FormatError::InvalidBase64(_) => {
                "The signature body is not valid base64; re-sign the commit."
            }
            FormatError::MissingSshsigPrefix | FormatError::TooShort { .. } => {
                "The SSH signature blob is corrupted or truncated; re-sign with 'git commit --amend -S'."
            }
        }
    }
}

/// Result of classifying and validating a signature blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureFormat {
    /// Detected kind.
    pub kind: SignatureKind,
    /// Rejection reason, `None` when the envelope is well formed.
    pub error: Option<FormatError>,
}

impl SignatureFormat {
    /// Whether the envelope is well formed.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Stable code of the rejection reason, if any.
    pub fn error_code(&self) -> Option<&'static str> {
        self.error.as_ref().map(FormatError::code)
    }

    /// Human-readable rejection detail, if any.
    pub fn error_detail(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Classify a signature by its markers.
pub fn classify(signature: &str) -> SignatureKind {
    if signature.contains(PGP_BEGIN_MARKER) {
        SignatureKind::Gpg
    } else if signature.contains(ssh::BEGIN_MARKER) || ssh::is_shorthand(signature) {
        SignatureKind::Ssh
    } else {
        SignatureKind::Unknown
    }
}

/// Classify and validate a signature blob.
pub fn validate(signature: &str) -> SignatureFormat {
    if signature.trim().is_empty() {
        return SignatureFormat {
            kind: SignatureKind::Unknown,
            error: Some(FormatError::Empty),
        };
    }

    let kind = classify(signature);
    let result = match kind {
        SignatureKind::Gpg => validate_gpg(signature),
        SignatureKind::Ssh if signature.contains(ssh::BEGIN_MARKER) => {
            ssh::validate_armored(signature)
        }
        SignatureKind::Ssh => ssh::validate_shorthand(signature),
        SignatureKind::Unknown => Err(FormatError::UnknownFormat),
    };

    SignatureFormat {
        kind,
        error: result.err(),
    }
}

fn validate_gpg(signature: &str) -> Result<(), FormatError> {
    let block = armor::decode(signature)?;
    if !block.is_signature {
        return Err(FormatError::WrongBlockType(block.block_type));
    }
    armor::first_packet_tag(&block.data)?;
    Ok(())
}
