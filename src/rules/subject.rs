// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Subject line rules: length, case and suffix.

use crate::commit::Commit;
use crate::config::{SubjectCase, SubjectConfig};
use crate::conventional::ConventionalCommit;

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::validator::{ErrorCode, ValidationError};

/// Character that lossy UTF-8 decoding leaves in place of invalid bytes.
const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Subject must not exceed the configured number of characters.
#[derive(Debug, Clone)]
pub struct SubjectLengthRule {
    max_length: usize,
}

impl SubjectLengthRule {
    pub fn new(config: &SubjectConfig) -> Self {
        Self {
            max_length: config.max_length,
        }
    }
}

impl Rule for SubjectLengthRule {
    fn name(&self) -> RuleName {
        RuleName::SubjectLength
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        let length = commit.subject().chars().count();
        let mut outcome = RuleOutcome::pass(self.name())
            .with_detail("length", length)
            .with_detail("max_length", self.max_length);

        if length > self.max_length {
            outcome.push(
                ValidationError::new(
                    self.name(),
                    ErrorCode::SubjectTooLong,
                    format!(
                        "Subject is too long: {} characters (max: {})",
                        length, self.max_length
                    ),
                )
                .with_help(format!(
                    "Shorten the subject to {} characters or less; move details into the body",
                    self.max_length
                ))
                .with_context("actual_length", length)
                .with_context("max_length", self.max_length),
            );
        }
        outcome
    }
}

/// First letter of the subject (or conventional description) must have the configured case.
#[derive(Debug, Clone)]
pub struct SubjectCaseRule {
    case: SubjectCase,
}

impl SubjectCaseRule {
    pub fn new(config: &SubjectConfig) -> Self {
        Self { case: config.case }
    }
}

impl Rule for SubjectCaseRule {
    fn name(&self) -> RuleName {
        RuleName::SubjectCase
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        let subject = commit.subject();
        if subject.trim().is_empty() {
            return RuleOutcome::fail(ValidationError::new(
                self.name(),
                ErrorCode::EmptySubject,
                "Subject is empty",
            ));
        }

        let parsed = ConventionalCommit::parse(subject);
        let text = if parsed.is_valid() {
            parsed.description.as_str()
        } else {
            subject
        };

        let Some(first) = text.chars().next() else {
            return RuleOutcome::pass(self.name());
        };

        let (wrong, expected) = match self.case {
            SubjectCase::Lower => (first.is_uppercase(), "lowercase"),
            SubjectCase::Upper => (first.is_lowercase(), "uppercase"),
            SubjectCase::Ignore => (false, "any"),
        };

        let outcome = RuleOutcome::pass(self.name()).with_detail("expected_case", expected);
        if !wrong {
            return outcome;
        }

        let mut outcome = outcome;
        outcome.push(
            ValidationError::new(
                self.name(),
                ErrorCode::InvalidCase,
                format!("Subject should start with a {} letter, found '{}'", expected, first),
            )
            .with_help(format!("Start the subject with a {} letter", expected))
            .with_context("actual", first)
            .with_context("expected", expected),
        );
        outcome
    }
}

/// Subject must not end with one of the configured characters.
#[derive(Debug, Clone)]
pub struct SubjectSuffixRule {
    disallowed: String,
}

impl SubjectSuffixRule {
    pub fn new(config: &SubjectConfig) -> Self {
        Self {
            disallowed: config.disallowed_suffixes.clone(),
        }
    }
}

impl Rule for SubjectSuffixRule {
    fn name(&self) -> RuleName {
        RuleName::SubjectSuffix
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        let Some(last) = commit.subject().trim_end().chars().last() else {
            return RuleOutcome::fail(ValidationError::new(
                self.name(),
                ErrorCode::EmptySubject,
                "Subject is empty",
            ));
        };

        if last == REPLACEMENT_CHAR {
            return RuleOutcome::fail(ValidationError::new(
                self.name(),
                ErrorCode::InvalidUtf8,
                "Subject ends with an invalid UTF-8 sequence",
            ));
        }

        if self.disallowed.contains(last) {
            return RuleOutcome::fail(
                ValidationError::new(
                    self.name(),
                    ErrorCode::InvalidSuffix,
                    format!("Subject should not end with '{}'", last),
                )
                .with_help(format!("Remove the trailing '{}'", last))
                .with_context("actual", last)
                .with_context("expected", format!("none of \"{}\"", self.disallowed)),
            );
        }

        RuleOutcome::pass(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Cancellation;

    fn run(rule: &dyn Rule, message: &str) -> RuleOutcome {
        let cancel = Cancellation::new();
        rule.validate(&Commit::new(message), &RuleEnv::offline(&cancel))
    }

    fn config() -> SubjectConfig {
        SubjectConfig::default()
    }

    #[test]
    fn test_length_boundary() {
        let rule = SubjectLengthRule::new(&config());
        assert!(run(&rule, &"a".repeat(72)).passed());

        let outcome = run(&rule, &"a".repeat(73));
        assert_eq!(outcome.errors.len(), 1);
        let err = &outcome.errors[0];
        assert_eq!(err.code, ErrorCode::SubjectTooLong);
        assert_eq!(err.context_value("actual_length"), Some("73"));
        assert_eq!(err.context_value("max_length"), Some("72"));
    }

    #[test]
    fn test_length_counts_code_points() {
        let rule = SubjectLengthRule::new(&SubjectConfig {
            max_length: 5,
            ..config()
        });
        // Five code points, fifteen bytes.
        assert!(run(&rule, "日本語日本").passed());
        assert!(!run(&rule, "日本語日本語").passed());
    }

    #[test]
    fn test_case_lower() {
        let rule = SubjectCaseRule::new(&config());
        assert!(run(&rule, "feat: add login").passed());
        assert!(run(&rule, "add login").passed());
        assert!(run(&rule, "123 things").passed());

        let outcome = run(&rule, "feat: Add login");
        assert_eq!(outcome.errors[0].code, ErrorCode::InvalidCase);
        assert_eq!(outcome.errors[0].context_value("actual"), Some("A"));
    }

    #[test]
    fn test_case_upper_and_ignore() {
        let upper = SubjectCaseRule::new(&SubjectConfig {
            case: SubjectCase::Upper,
            ..config()
        });
        assert!(run(&upper, "Add login").passed());
        assert!(!run(&upper, "add login").passed());

        let ignore = SubjectCaseRule::new(&SubjectConfig {
            case: SubjectCase::Ignore,
            ..config()
        });
        assert!(run(&ignore, "aDD login").passed());
    }

    #[test]
    fn test_case_empty_subject() {
        let rule = SubjectCaseRule::new(&config());
        assert_eq!(run(&rule, "").errors[0].code, ErrorCode::EmptySubject);
    }

    #[test]
    fn test_suffix() {
        let rule = SubjectSuffixRule::new(&config());
        assert!(run(&rule, "feat: add login").passed());
        for bad in ["add login.", "add login?", "add login!", "add login;"] {
            let outcome = run(&rule, bad);
            assert_eq!(outcome.errors[0].code, ErrorCode::InvalidSuffix, "{bad}");
        }
    }

    #[test]
    fn test_suffix_edge_cases() {
        let rule = SubjectSuffixRule::new(&config());
        assert_eq!(run(&rule, "").errors[0].code, ErrorCode::EmptySubject);
        assert_eq!(
            run(&rule, "add login\u{FFFD}").errors[0].code,
            ErrorCode::InvalidUtf8
        );
        assert!(run(&rule, "añadir función ✓").passed());
    }
}
