// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit signature verification through `git verify-commit`.

use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::commit::Commit;
use crate::ports::{Cancellation, SignatureVerifier, SignerIdentity, VerificationError};

/// Verifies commit signatures with the user's git, gpg and ssh setup.
#[derive(Debug, Clone)]
pub struct GitSignatureVerifier {
    workdir: PathBuf,
}

impl GitSignatureVerifier {
    /// Create a verifier running git in `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl SignatureVerifier for GitSignatureVerifier {
    fn verify(
        &self,
        cancel: &Cancellation,
        commit: &Commit,
    ) -> Result<SignerIdentity, VerificationError> {
        if cancel.is_cancelled() {
            return Err(VerificationError::Cancelled);
        }
        if commit.hash().is_empty() {
            return Err(VerificationError::Unavailable(
                "commit has no hash to verify".to_string(),
            ));
        }

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(["verify-commit", "--raw", commit.hash()])
            .output()
            .map_err(|e| VerificationError::Unavailable(format!("Git command failed: {}", e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(
            "git verify-commit {} exited with {}",
            commit.short_hash(),
            output.status
        );
        parse_verify_output(output.status.success(), &stderr)
    }
}

/// Interpret the status lines `git verify-commit --raw` writes to stderr.
fn parse_verify_output(success: bool, output: &str) -> Result<SignerIdentity, VerificationError> {
    if let Some(identity) = gpg_signer(output).or_else(|| ssh_signer(output)) {
        if success {
            return Ok(identity);
        }
    }

    for line in output.lines() {
        let mut parts = line.split_whitespace();
        if parts.next() != Some("[GNUPG:]") {
            continue;
        }
        match parts.next() {
            Some("BADSIG") => return Err(VerificationError::BadSignature),
            Some("NO_PUBKEY") | Some("ERRSIG") => {
                let key = parts.next().unwrap_or_default().to_string();
                return Err(VerificationError::UnknownKey(key));
            }
            _ => {}
        }
    }

    if output.contains("Signature verification failed") {
        return Err(VerificationError::BadSignature);
    }
    if output.contains("No principal matched") || output.contains("allowedSignersFile") {
        return Err(VerificationError::UnknownKey(
            "no matching principal in gpg.ssh.allowedSignersFile".to_string(),
        ));
    }
    if output.contains("no signature found") {
        return Err(VerificationError::Unavailable("no signature found".to_string()));
    }

    let reason = output.trim();
    Err(VerificationError::Unavailable(if reason.is_empty() {
        "unrecognised verifier output".to_string()
    } else {
        reason.to_string()
    }))
}

/// `[GNUPG:] GOODSIG <keyid> <name> <email>` plus the `VALIDSIG` fingerprint.
fn gpg_signer(output: &str) -> Option<SignerIdentity> {
    let rest = output.lines().find_map(|line| {
        line.trim()
            .strip_prefix("[GNUPG:] GOODSIG ")
            .map(str::to_string)
    })?;
    let (key_id, user) = rest.split_once(' ').unwrap_or((rest.as_str(), ""));

    let fingerprint = output.lines().find_map(|line| {
        line.trim()
            .strip_prefix("[GNUPG:] VALIDSIG ")
            .and_then(|r| r.split_whitespace().next())
            .map(str::to_string)
    });

    let (name, email) = split_user_id(user);
    Some(SignerIdentity {
        name,
        email,
        key_id: Some(fingerprint.unwrap_or_else(|| key_id.to_string())),
    })
}

/// `Good "git" signature for <principal> with <ALG> key <fingerprint>`.
fn ssh_signer(output: &str) -> Option<SignerIdentity> {
    let rest = output.lines().find_map(|line| {
        line.trim()
            .strip_prefix("Good \"git\" signature for ")
            .map(str::to_string)
    })?;
    let (principal, key) = match rest.split_once(" with ") {
        Some((principal, key)) => (principal.to_string(), key.rsplit(' ').next()),
        None => (rest.clone(), None),
    };

    Some(SignerIdentity {
        email: principal.contains('@').then(|| principal.clone()),
        name: principal,
        key_id: key.map(str::to_string),
    })
}

/// Split `Name <email>` into its parts.
fn split_user_id(user: &str) -> (String, Option<String>) {
    match user.rsplit_once(" <") {
        Some((name, email)) => (
            name.trim().to_string(),
            Some(email.trim_end_matches('>').to_string()),
        ),
        None => (user.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_good_gpg_signature() {
        let output = "[GNUPG:] NEWSIG\n\
            [GNUPG:] GOODSIG ABCD1234 John Doe <john@example.com>\n\
            [GNUPG:] VALIDSIG 0123456789ABCDEF 2024-01-01 0 4 0 1 10 00 0123456789ABCDEF\n";
        let identity = parse_verify_output(true, output).unwrap();
        assert_eq!(identity.name, "John Doe");
        assert_eq!(identity.email.as_deref(), Some("john@example.com"));
        assert_eq!(identity.key_id.as_deref(), Some("0123456789ABCDEF"));
    }

    #[test]
    fn test_good_ssh_signature() {
        let output =
            "Good \"git\" signature for dev@example.com with ED25519 key SHA256:abcdef\n";
        let identity = parse_verify_output(true, output).unwrap();
        assert_eq!(identity.name, "dev@example.com");
        assert_eq!(identity.email.as_deref(), Some("dev@example.com"));
        assert_eq!(identity.key_id.as_deref(), Some("SHA256:abcdef"));
    }

    #[test]
    fn test_failures() {
        assert_eq!(
            parse_verify_output(false, "[GNUPG:] BADSIG ABCD1234 John Doe"),
            Err(VerificationError::BadSignature)
        );
        assert_eq!(
            parse_verify_output(false, "[GNUPG:] ERRSIG ABCD1234 1 10 00 1 9\n[GNUPG:] NO_PUBKEY ABCD1234"),
            Err(VerificationError::UnknownKey("ABCD1234".to_string()))
        );
        assert!(matches!(
            parse_verify_output(false, "error: no signature found"),
            Err(VerificationError::Unavailable(_))
        ));
        assert!(matches!(
            parse_verify_output(false, ""),
            Err(VerificationError::Unavailable(_))
        ));
    }

    #[test]
    fn test_good_line_requires_success_status() {
        let output = "[GNUPG:] GOODSIG ABCD1234 John Doe <john@example.com>\n[GNUPG:] EXPKEYSIG x";
        assert!(parse_verify_output(false, output).is_err());
    }

    #[test]
    fn test_split_user_id() {
        assert_eq!(
            split_user_id("Jane Roe <jane@example.com>"),
            ("Jane Roe".to_string(), Some("jane@example.com".to_string()))
        );
        assert_eq!(split_user_id("Jane"), ("Jane".to_string(), None));
    }

    #[test]
    fn test_cancelled_before_spawn() {
        let verifier = GitSignatureVerifier::new(".");
        let cancel = Cancellation::new();
        cancel.cancel();
        let commit = Commit::new("feat: x").with_hash("abc");
        assert_eq!(
            verifier.verify(&cancel, &commit),
            Err(VerificationError::Cancelled)
        );
    }
}
