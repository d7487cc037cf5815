// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit signature rules.
//!
//! `signature` checks that a signature exists and that its envelope is well
//! formed. `signedidentity` additionally asks the injected verifier who made
//! the signature and compares the answer against the allowed signers.

use crate::commit::Commit;
use crate::config::{IdentityConfig, SignatureConfig};
use crate::ports::VerificationError;
use crate::signature::{self, FormatError, SignatureFormat, SignatureKind};

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::validator::{ErrorCode, ValidationError};

/// Check presence and envelope shape; `Err` holds the finding.
fn check_envelope(rule: RuleName, commit: &Commit) -> Result<SignatureFormat, ValidationError> {
    let raw = commit.signature();
    if raw.trim().is_empty() {
        return Err(ValidationError::new(
            rule,
            ErrorCode::MissingSignature,
            "Commit is not signed",
        ));
    }

    let format = signature::validate(raw);
    let Some(error) = &format.error else {
        return Ok(format);
    };

    let code = match (format.kind, error) {
        (_, FormatError::UnknownFormat) | (SignatureKind::Unknown, _) => {
            ErrorCode::UnknownSignatureFormat
        }
        (SignatureKind::Gpg, _) => ErrorCode::InvalidGpgFormat,
        (SignatureKind::Ssh, _) => ErrorCode::InvalidSshFormat,
    };
    Err(ValidationError::new(
        rule,
        code,
        format!("Invalid {} signature: {}", format.kind, error),
    )
    .with_help(error.help())
    .with_context("reason", error.code()))
}

/// Commit must carry a structurally valid signature of an allowed kind.
#[derive(Debug, Clone)]
pub struct SignatureRule {
    allowed_types: Vec<String>,
}

impl SignatureRule {
    pub fn new(config: &SignatureConfig) -> Self {
        Self {
            allowed_types: config
                .allowed_types
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
        }
    }
}

impl Rule for SignatureRule {
    fn name(&self) -> RuleName {
        RuleName::Signature
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        let format = match check_envelope(self.name(), commit) {
            Ok(format) => format,
            Err(error) => {
                let kind = signature::classify(commit.signature());
                return RuleOutcome::fail(error).with_detail("signature_type", kind);
            }
        };

        let outcome = RuleOutcome::pass(self.name()).with_detail("signature_type", format.kind);
        if self.allowed_types.is_empty()
            || self.allowed_types.iter().any(|t| t == format.kind.as_str())
        {
            return outcome;
        }

        let mut outcome = outcome;
        outcome.push(
            ValidationError::new(
                self.name(),
                ErrorCode::DisallowedSignatureType,
                format!("{} signatures are not allowed", format.kind.as_str().to_uppercase()),
            )
            .with_context("actual", format.kind)
            .with_context("expected", self.allowed_types.join(",")),
        );
        outcome
    }
}

/// Commit signature must verify and belong to an allowed signer.
#[derive(Debug, Clone)]
pub struct SignedIdentityRule {
    allowed_signers: Vec<String>,
}

impl SignedIdentityRule {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            allowed_signers: config.allowed_signers.clone(),
        }
    }
}

impl Rule for SignedIdentityRule {
    fn name(&self) -> RuleName {
        RuleName::SignedIdentity
    }

    fn validate(&self, commit: &Commit, env: &RuleEnv<'_>) -> RuleOutcome {
        if let Err(error) = check_envelope(self.name(), commit) {
            return RuleOutcome::fail(error);
        }

        let Some(verifier) = env.verifier else {
            return RuleOutcome::pass(self.name()).with_detail("status", "skipped");
        };
        if env.cancel.is_cancelled() {
            return RuleOutcome::fail(ValidationError::new(
                self.name(),
                ErrorCode::Cancelled,
                "Signature verification was cancelled",
            ));
        }

        let identity = match verifier.verify(env.cancel, commit) {
            Ok(identity) => identity,
            Err(VerificationError::Cancelled) => {
                return RuleOutcome::fail(ValidationError::new(
                    self.name(),
                    ErrorCode::Cancelled,
                    "Signature verification was cancelled",
                ));
            }
            Err(err) => {
                return RuleOutcome::fail(
                    ValidationError::new(
                        self.name(),
                        ErrorCode::VerificationFailed,
                        format!("Signature verification failed: {}", err),
                    )
                    .with_context("reason", &err),
                );
            }
        };

        let mut outcome = RuleOutcome::pass(self.name())
            .with_detail("status", "verified")
            .with_detail("signer", &identity);
        if let Some(key) = &identity.key_id {
            outcome.set_detail("key_id", key);
        }

        if !self.allowed_signers.is_empty()
            && !self.allowed_signers.iter().any(|s| identity.matches(s))
        {
            outcome.push(
                ValidationError::new(
                    self.name(),
                    ErrorCode::UnauthorizedSigner,
                    format!("Signer '{}' is not an allowed signer", identity),
                )
                .with_context("actual", &identity)
                .with_context("expected", self.allowed_signers.join(",")),
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Cancellation, SignatureVerifier, SignerIdentity};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    const SCENARIO_SSH: &str =
        "-----BEGIN SSH SIGNATURE-----\nSW52YWxpZFByZWZpeA==\n-----END SSH SIGNATURE-----";

    fn valid_ssh() -> String {
        let mut blob = b"SSHSIG".to_vec();
        blob.extend(std::iter::repeat(7u8).take(64));
        format!(
            "-----BEGIN SSH SIGNATURE-----\n{}\n-----END SSH SIGNATURE-----",
            STANDARD.encode(blob)
        )
    }

    fn signed(signature: &str) -> Commit {
        Commit::new("feat: add login").with_signature(signature)
    }

    fn run(rule: &dyn Rule, commit: &Commit) -> RuleOutcome {
        let cancel = Cancellation::new();
        rule.validate(commit, &RuleEnv::offline(&cancel))
    }

    #[derive(Debug)]
    struct FixedVerifier(Result<SignerIdentity, VerificationError>);

    impl SignatureVerifier for FixedVerifier {
        fn verify(
            &self,
            _cancel: &Cancellation,
            _commit: &Commit,
        ) -> Result<SignerIdentity, VerificationError> {
            self.0.clone()
        }
    }

    fn dev_one() -> SignerIdentity {
        SignerIdentity {
            name: "Dev One".to_string(),
            email: Some("d1@example.com".to_string()),
            key_id: Some("SHA256:abc".to_string()),
        }
    }

    fn verify_with(
        rule: &SignedIdentityRule,
        verifier: &FixedVerifier,
        commit: &Commit,
    ) -> RuleOutcome {
        let cancel = Cancellation::new();
        let env = RuleEnv {
            repository: None,
            verifier: Some(verifier),
            cancel: &cancel,
        };
        rule.validate(commit, &env)
    }

    #[test]
    fn test_missing_signature() {
        let rule = SignatureRule::new(&SignatureConfig::default());
        let outcome = run(&rule, &Commit::new("feat: x"));
        assert_eq!(outcome.errors[0].code, ErrorCode::MissingSignature);
    }

    #[test]
    fn test_valid_ssh_signature() {
        let rule = SignatureRule::new(&SignatureConfig::default());
        let outcome = run(&rule, &signed(&valid_ssh()));
        assert!(outcome.passed(), "{:?}", outcome.errors);
        assert_eq!(outcome.details["signature_type"], "ssh");
    }

    #[test]
    fn test_ssh_missing_prefix() {
        let rule = SignatureRule::new(&SignatureConfig::default());
        let outcome = run(&rule, &signed(SCENARIO_SSH));
        assert_eq!(outcome.errors.len(), 1);
        let err = &outcome.errors[0];
        assert_eq!(err.code, ErrorCode::InvalidSshFormat);
        assert_eq!(err.context_value("reason"), Some("missing_sshsig_prefix"));
        assert!(err.message.contains("SSHSIG"));
    }

    #[test]
    fn test_unknown_and_gpg_formats() {
        let rule = SignatureRule::new(&SignatureConfig::default());
        assert_eq!(
            run(&rule, &signed("just some text")).errors[0].code,
            ErrorCode::UnknownSignatureFormat
        );
        assert_eq!(
            run(&rule, &signed("-----BEGIN PGP SIGNATURE-----\n\nAAAA")).errors[0].code,
            ErrorCode::InvalidGpgFormat
        );
    }

    #[test]
    fn test_disallowed_type() {
        let rule = SignatureRule::new(&SignatureConfig {
            allowed_types: vec!["GPG".to_string()],
        });
        let outcome = run(&rule, &signed(&valid_ssh()));
        assert_eq!(outcome.errors[0].code, ErrorCode::DisallowedSignatureType);
        assert_eq!(outcome.errors[0].context_value("actual"), Some("ssh"));
    }

    #[test]
    fn test_identity_skipped_without_verifier() {
        let rule = SignedIdentityRule::new(&IdentityConfig::default());
        let outcome = run(&rule, &signed(&valid_ssh()));
        assert!(outcome.passed());
        assert_eq!(outcome.details["status"], "skipped");
    }

    #[test]
    fn test_identity_checks_envelope_first() {
        let rule = SignedIdentityRule::new(&IdentityConfig::default());
        let verifier = FixedVerifier(Ok(dev_one()));
        let outcome = verify_with(&rule, &verifier, &signed(SCENARIO_SSH));
        assert_eq!(outcome.errors[0].code, ErrorCode::InvalidSshFormat);
    }

    #[test]
    fn test_identity_allowed_signers() {
        let verifier = FixedVerifier(Ok(dev_one()));
        let commit = signed(&valid_ssh());

        let open = SignedIdentityRule::new(&IdentityConfig::default());
        let outcome = verify_with(&open, &verifier, &commit);
        assert!(outcome.passed());
        assert_eq!(outcome.details["signer"], "Dev One <d1@example.com>");

        let allowed = SignedIdentityRule::new(&IdentityConfig {
            allowed_signers: vec!["d1@example.com".to_string()],
        });
        assert!(verify_with(&allowed, &verifier, &commit).passed());

        let denied = SignedIdentityRule::new(&IdentityConfig {
            allowed_signers: vec!["d2@example.com".to_string()],
        });
        assert_eq!(
            verify_with(&denied, &verifier, &commit).errors[0].code,
            ErrorCode::UnauthorizedSigner
        );
    }

    #[test]
    fn test_identity_verification_failures() {
        let rule = SignedIdentityRule::new(&IdentityConfig::default());
        let commit = signed(&valid_ssh());

        let bad = FixedVerifier(Err(VerificationError::BadSignature));
        assert_eq!(
            verify_with(&rule, &bad, &commit).errors[0].code,
            ErrorCode::VerificationFailed
        );

        let cancelled = FixedVerifier(Err(VerificationError::Cancelled));
        assert_eq!(
            verify_with(&rule, &cancelled, &commit).errors[0].code,
            ErrorCode::Cancelled
        );
    }
}
