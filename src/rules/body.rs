// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit body structure.

use crate::commit::Commit;
use crate::config::BodyConfig;

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::signoff::{is_signoff_attempt, is_valid_signoff};
use super::validator::{ErrorCode, ValidationError};

/// Trailers that may follow a sign-off line.
const TRAILERS_AFTER_SIGNOFF: &[&str] = &[
    "signed-off-by",
    "co-authored-by",
    "reviewed-by",
    "acked-by",
    "tested-by",
    "reported-by",
    "fixes",
    "closes",
    "resolves",
];

/// Whether `line` is a `Key: value` trailer permitted after a sign-off.
fn is_permitted_trailer(line: &str) -> bool {
    let Some((key, value)) = line.split_once(':') else {
        return false;
    };
    let key = key.trim().to_lowercase();
    TRAILERS_AFTER_SIGNOFF.contains(&key.as_str()) && !value.trim().is_empty()
}

/// Body must be separated from the subject and, when required, substantive.
#[derive(Debug, Clone)]
pub struct CommitBodyRule {
    required: bool,
    min_length: usize,
    allow_signoff_only: bool,
}

impl CommitBodyRule {
    pub fn new(config: &BodyConfig) -> Self {
        Self {
            required: config.required,
            min_length: config.min_length,
            allow_signoff_only: config.allow_signoff_only,
        }
    }

    fn check_required(&self, body: &str, outcome: &mut RuleOutcome) {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            outcome.push(ValidationError::new(
                self.name(),
                ErrorCode::MissingBody,
                "Commit body is required but missing",
            ));
            return;
        }

        let only_signoffs = trimmed
            .lines()
            .filter(|line| !line.trim().is_empty())
            .all(|line| is_signoff_attempt(line.trim()));
        if only_signoffs && !self.allow_signoff_only {
            outcome.push(ValidationError::new(
                self.name(),
                ErrorCode::SignoffOnlyBody,
                "Commit body contains only sign-off lines",
            ));
            return;
        }

        let length = trimmed.chars().count();
        if length < self.min_length {
            outcome.push(
                ValidationError::new(
                    self.name(),
                    ErrorCode::BodyTooShort,
                    format!(
                        "Commit body is too short: {} characters (min: {})",
                        length, self.min_length
                    ),
                )
                .with_context("actual_length", length)
                .with_context("min_length", self.min_length),
            );
        }
    }

    /// Malformed sign-off lines are reported by the signoff rule, not here.
    fn check_after_signoff(&self, body: &str, outcome: &mut RuleOutcome) {
        let offending = body
            .lines()
            .map(str::trim)
            .skip_while(|line| !is_valid_signoff(line))
            .filter(|line| !line.is_empty())
            .find(|line| !is_permitted_trailer(line) && !is_signoff_attempt(line));

        if let Some(line) = offending {
            outcome.push(
                ValidationError::new(
                    self.name(),
                    ErrorCode::ContentAfterSignoff,
                    "Only trailers may follow the Signed-off-by line",
                )
                .with_context("actual", line),
            );
        }
    }
}

impl Rule for CommitBodyRule {
    fn name(&self) -> RuleName {
        RuleName::CommitBody
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        if commit.is_empty() {
            return RuleOutcome::fail(ValidationError::new(
                self.name(),
                ErrorCode::EmptyMessage,
                "Commit message is empty",
            ));
        }

        let body = commit.body();
        let mut outcome =
            RuleOutcome::pass(self.name()).with_detail("body_length", body.trim().chars().count());

        let second_line = commit.message().lines().nth(1);
        if second_line.is_some_and(|line| !line.trim().is_empty()) {
            outcome.push(ValidationError::new(
                self.name(),
                ErrorCode::MissingBlankLine,
                "Subject and body must be separated by a blank line",
            ));
        }

        if self.required {
            self.check_required(body, &mut outcome);
        }
        self.check_after_signoff(body, &mut outcome);
        outcome
    }
}
