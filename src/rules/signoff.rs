// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Developer Certificate of Origin sign-off.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::Commit;
use crate::config::SignoffConfig;

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::validator::{ErrorCode, ValidationError};

lazy_static! {
    static ref SIGNOFF: Regex =
        Regex::new(r"^Signed-off-by: ([^<]+) <([^<>\s]+@[^<>\s]+)>$").unwrap();
}

/// Whether `line` is a well-formed `Signed-off-by: Name <email>` trailer.
pub(super) fn is_valid_signoff(line: &str) -> bool {
    SIGNOFF.is_match(line.trim())
}

/// Whether `line` looks like an attempt at a sign-off, well-formed or not.
pub(super) fn is_signoff_attempt(line: &str) -> bool {
    line.contains("Signed") && line.contains("by:")
}

/// Body must carry a `Signed-off-by` trailer.
#[derive(Debug, Clone)]
pub struct SignOffRule {
    allow_multiple: bool,
}

impl SignOffRule {
    pub fn new(config: &SignoffConfig) -> Self {
        Self {
            allow_multiple: config.allow_multiple,
        }
    }
}

impl Rule for SignOffRule {
    fn name(&self) -> RuleName {
        RuleName::SignOff
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        let body = commit.body();
        let count = body.lines().filter(|line| is_valid_signoff(line)).count();
        let mut outcome = RuleOutcome::pass(self.name()).with_detail("signoff_count", count);

        if count == 0 {
            let error = if body.lines().any(is_signoff_attempt) {
                ValidationError::new(
                    self.name(),
                    ErrorCode::InvalidSignoffFormat,
                    "Sign-off line is malformed",
                )
                .with_context("expected", "Signed-off-by: Name <email@example.com>")
            } else {
                ValidationError::new(self.name(), ErrorCode::MissingSignoff, "Missing sign-off")
            };
            outcome.push(error);
            return outcome;
        }

        if count > 1 && !self.allow_multiple {
            outcome.push(
                ValidationError::new(
                    self.name(),
                    ErrorCode::MultipleSignoffs,
                    format!("Found {} sign-off lines, only one is allowed", count),
                )
                .with_context("signoff_count", count),
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Cancellation;

    fn run(rule: &SignOffRule, message: &str) -> RuleOutcome {
        let cancel = Cancellation::new();
        rule.validate(&Commit::new(message), &RuleEnv::offline(&cancel))
    }

    fn strict() -> SignOffRule {
        SignOffRule::new(&SignoffConfig {
            allow_multiple: false,
        })
    }

    #[test]
    fn test_valid_signoff() {
        let rule = SignOffRule::new(&SignoffConfig::default());
        let outcome = run(
            &rule,
            "feat: add login\n\nSigned-off-by: Dev One <d1@example.com>",
        );
        assert!(outcome.passed());
        assert_eq!(outcome.details["signoff_count"], "1");
    }

    #[test]
    fn test_missing_signoff() {
        let rule = SignOffRule::new(&SignoffConfig::default());
        let outcome = run(&rule, "feat: add login\n\nJust a body.");
        assert_eq!(outcome.errors[0].code, ErrorCode::MissingSignoff);
    }

    #[test]
    fn test_malformed_signoff() {
        let rule = SignOffRule::new(&SignoffConfig::default());
        for body in [
            "Signed-off-by: Dev One",
            "Signed-off-by: Dev One <not-an-email>",
            "Signed-off-by:Dev One <d1@example.com>",
            "signed-off-by: Dev One <d1@example.com>",
        ] {
            let message = format!("feat: x\n\n{}", body);
            let outcome = run(&rule, &message);
            let expected = if body.contains("Signed") {
                ErrorCode::InvalidSignoffFormat
            } else {
                ErrorCode::MissingSignoff
            };
            assert_eq!(outcome.errors[0].code, expected, "{body}");
        }
    }

    #[test]
    fn test_multiple_signoffs_disallowed() {
        let outcome = run(
            &strict(),
            "Fix bug\nSigned-off-by: Dev One <d1@x.com>\nSigned-off-by: Dev Two <d2@x.com>",
        );
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].code, ErrorCode::MultipleSignoffs);
        assert_eq!(outcome.errors[0].context_value("signoff_count"), Some("2"));
    }

    #[test]
    fn test_multiple_signoffs_allowed_by_default() {
        let rule = SignOffRule::new(&SignoffConfig::default());
        assert!(run(
            &rule,
            "Fix bug\n\nSigned-off-by: Dev One <d1@x.com>\nSigned-off-by: Dev Two <d2@x.com>",
        )
        .passed());
    }
}
