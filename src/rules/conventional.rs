// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Conventional Commits compliance.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::Commit;
use crate::config::ConventionalConfig;
use crate::conventional::{spaces_after_colon, ConventionalCommit, STANDARD_TYPES};

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::validator::{ErrorCode, ValidationError};

lazy_static! {
    /// Text before the colon that looks like a conventional header.
    static ref HEADER_PREFIX: Regex = Regex::new(r"^[A-Za-z0-9_]+(?:\([^()]*\))?!?$").unwrap();

    /// A single well-formed scope token.
    static ref SCOPE_TOKEN: Regex = Regex::new(r"^[\w/-]+$").unwrap();
}

/// Subject must follow `type(scope)!: description` with allowed values.
#[derive(Debug, Clone)]
pub struct ConventionalCommitRule {
    types: Vec<String>,
    scopes: Vec<String>,
    max_description_length: usize,
    allow_breaking: bool,
    require_scope: bool,
}

impl ConventionalCommitRule {
    pub fn new(config: &ConventionalConfig) -> Self {
        let types = if config.types.is_empty() {
            STANDARD_TYPES.iter().map(|t| t.to_string()).collect()
        } else {
            config.types.clone()
        };
        Self {
            types,
            scopes: config.scopes.clone(),
            max_description_length: config.max_description_length,
            allow_breaking: config.allow_breaking,
            require_scope: config.require_scope,
        }
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> ValidationError {
        ValidationError::new(self.name(), code, message)
    }

    fn check_type(&self, parsed: &ConventionalCommit, outcome: &mut RuleOutcome) {
        if self.types.iter().any(|t| t == &parsed.commit_type) {
            return;
        }
        outcome.push(
            self.error(
                ErrorCode::InvalidConventionalType,
                format!("Commit type '{}' is not allowed", parsed.commit_type),
            )
            .with_help(format!("Use one of: {}", self.types.join(", ")))
            .with_context("actual", &parsed.commit_type)
            .with_context("expected", self.types.join(",")),
        );
    }

    fn check_scopes(&self, parsed: &ConventionalCommit, outcome: &mut RuleOutcome) {
        if let Some(raw) = &parsed.raw_scope {
            let well_formed = raw.split(',').all(|piece| SCOPE_TOKEN.is_match(piece));
            if !well_formed {
                outcome.push(
                    self.error(
                        ErrorCode::InvalidScopeFormat,
                        format!("Scope '{}' is not a comma-separated list of scopes", raw),
                    )
                    .with_context("actual", raw)
                    .with_context("expected", "scope[,scope...]"),
                );
            }
        }

        if self.require_scope && !parsed.has_scope() {
            outcome.push(self.error(ErrorCode::MissingScope, "Scope is required but not provided"));
        }

        if self.scopes.is_empty() {
            return;
        }
        for scope in &parsed.scopes {
            if !self.scopes.iter().any(|s| s == scope) {
                outcome.push(
                    self.error(
                        ErrorCode::InvalidConventionalScope,
                        format!("Scope '{}' is not allowed", scope),
                    )
                    .with_help(format!("Use one of: {}", self.scopes.join(", ")))
                    .with_context("actual", scope)
                    .with_context("expected", self.scopes.join(",")),
                );
            }
        }
    }

    fn check_description(&self, parsed: &ConventionalCommit, outcome: &mut RuleOutcome) {
        if parsed.description.trim().is_empty() {
            outcome.push(self.error(ErrorCode::EmptyDescription, "Description is empty"));
            return;
        }

        let length = parsed.description.chars().count();
        if length > self.max_description_length {
            outcome.push(
                self.error(
                    ErrorCode::DescriptionTooLong,
                    format!(
                        "Description is too long: {} characters (max: {})",
                        length, self.max_description_length
                    ),
                )
                .with_context("actual_length", length)
                .with_context("max_length", self.max_description_length),
            );
        }
    }

    /// Exactly one space must separate the header from a non-empty description.
    fn check_spacing(&self, subject: &str, outcome: &mut RuleOutcome) {
        let Some((prefix, rest)) = subject.split_once(':') else {
            return;
        };
        if !HEADER_PREFIX.is_match(prefix) || rest.trim().is_empty() {
            return;
        }
        let spaces = spaces_after_colon(subject).unwrap_or(0);
        if spaces != 1 {
            outcome.push(
                self.error(
                    ErrorCode::SpacingError,
                    format!(
                        "Expected exactly one space after the colon, found {}",
                        spaces
                    ),
                )
                .with_context("actual", spaces)
                .with_context("expected", 1),
            );
        }
    }
}

impl Rule for ConventionalCommitRule {
    fn name(&self) -> RuleName {
        RuleName::ConventionalCommit
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        if commit.is_empty() {
            return RuleOutcome::fail(self.error(ErrorCode::EmptyMessage, "Commit message is empty"));
        }

        let subject = commit.subject();
        let parsed = ConventionalCommit::parse(subject);
        let mut outcome = RuleOutcome::pass(self.name());

        if parsed.is_valid() {
            outcome.set_detail("type", &parsed.commit_type);
            outcome.set_detail("scopes", parsed.scopes.join(","));
            outcome.set_detail("breaking", parsed.breaking);
            outcome.set_detail("description", &parsed.description);

            self.check_type(&parsed, &mut outcome);
            self.check_scopes(&parsed, &mut outcome);
            if parsed.breaking && !self.allow_breaking {
                outcome.push(self.error(
                    ErrorCode::BreakingNotAllowed,
                    "Breaking change marker '!' is not allowed",
                ));
            }
            self.check_description(&parsed, &mut outcome);
        } else {
            outcome.push(
                self.error(
                    ErrorCode::InvalidConventionalFormat,
                    "Subject does not follow the Conventional Commits format",
                )
                .with_context("actual", subject)
                .with_context("expected", "type(scope): description"),
            );
        }

        self.check_spacing(subject, &mut outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Cancellation;

    fn run(rule: &ConventionalCommitRule, message: &str) -> RuleOutcome {
        let cancel = Cancellation::new();
        rule.validate(&Commit::new(message), &RuleEnv::offline(&cancel))
    }

    fn codes(outcome: &RuleOutcome) -> Vec<ErrorCode> {
        outcome.errors.iter().map(|e| e.code).collect()
    }

    fn rule_with(types: &[&str], scopes: &[&str]) -> ConventionalCommitRule {
        ConventionalCommitRule::new(&ConventionalConfig {
            types: types.iter().map(|s| s.to_string()).collect(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            ..ConventionalConfig::default()
        })
    }

    #[test]
    fn test_valid_with_allow_lists() {
        let rule = rule_with(&["feat", "fix"], &["auth"]);
        let outcome = run(&rule, "feat(auth): add login functionality");
        assert!(outcome.passed(), "{:?}", outcome.errors);
        assert_eq!(outcome.details["type"], "feat");
        assert_eq!(outcome.details["scopes"], "auth");
        assert_eq!(outcome.details["breaking"], "false");
    }

    #[test]
    fn test_standard_types_by_default() {
        let rule = rule_with(&[], &[]);
        assert!(run(&rule, "chore: bump deps").passed());
        assert_eq!(
            codes(&run(&rule, "Feat: add login")),
            vec![ErrorCode::InvalidConventionalType]
        );
        assert_eq!(
            codes(&run(&rule, "feature: add login")),
            vec![ErrorCode::InvalidConventionalType]
        );
    }

    #[test]
    fn test_invalid_format() {
        let rule = rule_with(&[], &[]);
        let outcome = run(&rule, "add login functionality");
        assert_eq!(codes(&outcome), vec![ErrorCode::InvalidConventionalFormat]);
        assert_eq!(
            outcome.errors[0].context_value("actual"),
            Some("add login functionality")
        );
    }

    #[test]
    fn test_missing_space_reported_with_format() {
        let rule = rule_with(&[], &[]);
        assert_eq!(
            codes(&run(&rule, "feat:add login")),
            vec![
                ErrorCode::InvalidConventionalFormat,
                ErrorCode::SpacingError
            ]
        );
    }

    #[test]
    fn test_extra_space_is_spacing_error() {
        let rule = rule_with(&[], &[]);
        let outcome = run(&rule, "feat:  extra space");
        assert_eq!(codes(&outcome), vec![ErrorCode::SpacingError]);
        assert_eq!(outcome.errors[0].context_value("actual"), Some("2"));
        assert!(ConventionalCommit::parse("feat:  extra space").is_valid());
    }

    #[test]
    fn test_scope_allow_list_checks_every_scope() {
        let rule = rule_with(&[], &["ui", "api"]);
        assert!(run(&rule, "feat(ui,api): share tokens").passed());
        let outcome = run(&rule, "feat(ui,db,cache): share tokens");
        assert_eq!(
            codes(&outcome),
            vec![
                ErrorCode::InvalidConventionalScope,
                ErrorCode::InvalidConventionalScope
            ]
        );
        assert_eq!(outcome.errors[0].context_value("actual"), Some("db"));
    }

    #[test]
    fn test_scope_formatting() {
        let rule = rule_with(&[], &[]);
        for subject in [
            "feat(ui, api): x",
            "feat(,ui): x",
            "feat(ui,): x",
            "feat(ui,,api): x",
            "feat(): x",
        ] {
            assert_eq!(
                codes(&run(&rule, subject)),
                vec![ErrorCode::InvalidScopeFormat],
                "{subject}"
            );
        }
    }

    #[test]
    fn test_require_scope() {
        let rule = ConventionalCommitRule::new(&ConventionalConfig {
            require_scope: true,
            ..ConventionalConfig::default()
        });
        assert_eq!(
            codes(&run(&rule, "feat: add login")),
            vec![ErrorCode::MissingScope]
        );
    }

    #[test]
    fn test_breaking_not_allowed() {
        let rule = ConventionalCommitRule::new(&ConventionalConfig {
            allow_breaking: false,
            ..ConventionalConfig::default()
        });
        assert_eq!(
            codes(&run(&rule, "feat!: drop v1")),
            vec![ErrorCode::BreakingNotAllowed]
        );
    }

    #[test]
    fn test_empty_description() {
        let rule = rule_with(&[], &[]);
        for subject in ["feat:", "feat: ", "feat:   "] {
            assert_eq!(
                codes(&run(&rule, subject)),
                vec![ErrorCode::EmptyDescription],
                "{subject:?}"
            );
        }
    }

    #[test]
    fn test_description_too_long() {
        let rule = ConventionalCommitRule::new(&ConventionalConfig {
            max_description_length: 10,
            ..ConventionalConfig::default()
        });
        assert!(run(&rule, "fix: 0123456789").passed());
        let outcome = run(&rule, "fix: 0123456789a");
        assert_eq!(codes(&outcome), vec![ErrorCode::DescriptionTooLong]);
        assert_eq!(outcome.errors[0].context_value("actual_length"), Some("11"));
    }

    #[test]
    fn test_empty_message() {
        let rule = rule_with(&[], &[]);
        assert_eq!(codes(&run(&rule, "")), vec![ErrorCode::EmptyMessage]);
    }
}
