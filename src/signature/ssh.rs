// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! SSH signature envelope checks (`ssh-keygen -Y sign` output).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::FormatError;

pub(super) const BEGIN_MARKER: &str = "-----BEGIN SSH SIGNATURE-----";
pub(super) const END_MARKER: &str = "-----END SSH SIGNATURE-----";

/// Magic preamble of every SSHSIG blob.
pub const MAGIC_PREAMBLE: &[u8] = b"SSHSIG";

/// Smallest blob that can hold the preamble, version, key, namespace and signature fields.
pub const MIN_BLOB_LEN: usize = 50;

/// Algorithm prefixes accepted in the `algorithm:base64` shorthand.
const SHORTHAND_PREFIXES: &[&str] = &["ssh-", "ecdsa-", "sk-"];

/// Whether `text` uses the `algorithm:base64blob` shorthand.
pub fn is_shorthand(text: &str) -> bool {
    let Some((algorithm, blob)) = text.trim().split_once(':') else {
        return false;
    };
    SHORTHAND_PREFIXES.iter().any(|p| algorithm.starts_with(p))
        && algorithm.len() > 4
        && !algorithm.contains(char::is_whitespace)
        && !blob.is_empty()
}

/// Validate an armored SSH signature.
pub fn validate_armored(text: &str) -> Result<(), FormatError> {
    let start = text.find(BEGIN_MARKER).ok_or(FormatError::UnknownFormat)?;
    let after_begin = &text[start + BEGIN_MARKER.len()..];
    let end = after_begin
        .find(END_MARKER)
        .ok_or(FormatError::MissingEndMarker)?;

    let payload: String = after_begin[..end]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if payload.is_empty() {
        return Err(FormatError::InvalidBase64(
            "no content between markers".to_string(),
        ));
    }

    let blob = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| FormatError::InvalidBase64(e.to_string()))?;

    if !blob.starts_with(MAGIC_PREAMBLE) {
        return Err(FormatError::MissingSshsigPrefix);
    }
    if blob.len() < MIN_BLOB_LEN {
        return Err(FormatError::TooShort { len: blob.len() });
    }
    Ok(())
}

/// Validate the `algorithm:base64blob` shorthand.
pub fn validate_shorthand(text: &str) -> Result<(), FormatError> {
    let (_, blob) = text
        .trim()
        .split_once(':')
        .ok_or(FormatError::UnknownFormat)?;
    let decoded = STANDARD
        .decode(blob.trim().as_bytes())
        .map_err(|e| FormatError::InvalidBase64(e.to_string()))?;
    if decoded.is_empty() {
        return Err(FormatError::InvalidBase64("empty signature blob".to_string()));
    }
    if decoded.len() < MIN_BLOB_LEN {
        return Err(FormatError::TooShort { len: decoded.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armored(blob: &[u8]) -> String {
        format!(
            "{}\n{}\n{}",
            BEGIN_MARKER,
            STANDARD.encode(blob),
            END_MARKER
        )
    }

    fn valid_blob() -> Vec<u8> {
        let mut blob = MAGIC_PREAMBLE.to_vec();
        blob.extend_from_slice(&[0u8; 60]);
        blob
    }

    #[test]
    fn test_valid_armored() {
        assert_eq!(validate_armored(&armored(&valid_blob())), Ok(()));
    }

    #[test]
    fn test_missing_prefix() {
        let text = "-----BEGIN SSH SIGNATURE-----\nSW52YWxpZFByZWZpeA==\n-----END SSH SIGNATURE-----";
        assert_eq!(validate_armored(text), Err(FormatError::MissingSshsigPrefix));
    }

    #[test]
    fn test_too_short() {
        let blob = b"SSHSIG\x00\x00\x00\x01";
        assert_eq!(
            validate_armored(&armored(blob)),
            Err(FormatError::TooShort { len: blob.len() })
        );
    }

    #[test]
    fn test_missing_end_marker() {
        let text = format!("{}\nU1NIU0lH\n", BEGIN_MARKER);
        assert_eq!(validate_armored(&text), Err(FormatError::MissingEndMarker));
    }

    #[test]
    fn test_invalid_base64() {
        let text = format!("{}\n***\n{}", BEGIN_MARKER, END_MARKER);
        assert!(matches!(
            validate_armored(&text),
            Err(FormatError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_shorthand_too_short() {
        assert_eq!(
            validate_shorthand("ssh-ed25519:AAAA"),
            Err(FormatError::TooShort { len: 3 })
        );
        assert_eq!(
            validate_shorthand("sk-ssh-ed25519@openssh.com:AA=="),
            Err(FormatError::TooShort { len: 1 })
        );
    }

    #[test]
    fn test_shorthand_detection() {
        assert!(is_shorthand("ssh-ed25519:AAAAC3NzaC1lZDI1NTE5"));
        assert!(is_shorthand("ecdsa-sha2-nistp256:AAAA"));
        assert!(is_shorthand("sk-ssh-ed25519@openssh.com:AAAA"));
        assert!(!is_shorthand("rsa:AAAA"));
        assert!(!is_shorthand("ssh-ed25519:"));
        assert!(!is_shorthand("just text"));
    }

    #[test]
    fn test_shorthand_validation() {
        let blob = STANDARD.encode(valid_blob());
        assert_eq!(validate_shorthand(&format!("ssh-ed25519:{}", blob)), Ok(()));
        assert!(matches!(
            validate_shorthand("ssh-ed25519:@@@"),
            Err(FormatError::InvalidBase64(_))
        ));
    }
}
