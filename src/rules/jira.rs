// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Jira issue references.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::Commit;
use crate::config::JiraConfig;
use crate::conventional::ConventionalCommit;

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::signoff::is_signoff_attempt;
use super::validator::{ErrorCode, ValidationError};

lazy_static! {
    static ref JIRA_KEY: Regex = Regex::new(r"\b[A-Z]+-\d+\b").unwrap();
    static ref JIRA_KEY_EXACT: Regex = Regex::new(r"^[A-Z]+-\d+$").unwrap();
}

const REFS_PREFIX: &str = "Refs:";

/// Commit must reference a Jira issue in the subject or a `Refs:` body line.
#[derive(Debug, Clone)]
pub struct JiraReferenceRule {
    projects: Vec<String>,
    check_body: bool,
}

impl JiraReferenceRule {
    pub fn new(config: &JiraConfig) -> Self {
        Self {
            projects: config
                .projects
                .iter()
                .map(|p| p.trim().to_uppercase())
                .collect(),
            check_body: config.check_body,
        }
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> ValidationError {
        ValidationError::new(self.name(), code, message)
    }

    /// Keys found in the subject; in conventional mode the key must close the subject.
    fn check_subject(&self, subject: &str, outcome: &mut RuleOutcome) -> Vec<String> {
        let keys: Vec<String> = JIRA_KEY
            .find_iter(subject)
            .map(|m| m.as_str().to_string())
            .collect();
        if keys.is_empty() {
            outcome.push(
                self.error(ErrorCode::MissingJira, "No Jira issue key found in the subject")
                    .with_context("expected", "PROJ-123"),
            );
            return keys;
        }

        if ConventionalCommit::parse(subject).is_valid() {
            let last = subject.split_whitespace().last().unwrap_or_default();
            let unwrapped = last
                .strip_prefix('[')
                .and_then(|t| t.strip_suffix(']'))
                .or_else(|| last.strip_prefix('(').and_then(|t| t.strip_suffix(')')))
                .unwrap_or(last);
            if !JIRA_KEY_EXACT.is_match(unwrapped) {
                outcome.push(
                    self.error(
                        ErrorCode::MisplacedJira,
                        "Jira issue key must be the last token of the subject",
                    )
                    .with_context("actual", last)
                    .with_context("expected", format!("[{}]", keys[0])),
                );
            }
        }
        keys
    }

    /// Keys found on the `Refs:` line, which must precede any sign-off.
    fn check_refs(&self, body: &str, outcome: &mut RuleOutcome) -> Vec<String> {
        let lines: Vec<&str> = body.lines().map(str::trim).collect();
        let Some(refs_index) = lines.iter().position(|l| l.starts_with(REFS_PREFIX)) else {
            outcome.push(
                self.error(ErrorCode::MissingJira, "No 'Refs:' line found in the body")
                    .with_context("expected", "Refs: PROJ-123"),
            );
            return Vec::new();
        };

        if let Some(signoff_index) = lines.iter().position(|l| is_signoff_attempt(l)) {
            if signoff_index < refs_index {
                outcome.push(self.error(
                    ErrorCode::RefsAfterSignoff,
                    "'Refs:' line must appear before the Signed-off-by line",
                ));
            }
        }

        let line = lines[refs_index];
        let value = line[REFS_PREFIX.len()..].trim();
        let keys: Vec<String> = value.split(',').map(|k| k.trim().to_string()).collect();
        if value.is_empty() || !keys.iter().all(|k| JIRA_KEY_EXACT.is_match(k)) {
            outcome.push(
                self.error(ErrorCode::InvalidRefsFormat, "Malformed 'Refs:' line")
                    .with_context("actual", line)
                    .with_context("expected", "Refs: PROJ-123[, PROJ-456]"),
            );
        }
        keys.into_iter()
            .filter(|k| JIRA_KEY_EXACT.is_match(k))
            .collect()
    }

    fn check_projects(&self, keys: &[String], outcome: &mut RuleOutcome) {
        if self.projects.is_empty() {
            return;
        }
        for key in keys {
            let project = key.split('-').next().unwrap_or_default();
            if !self.projects.iter().any(|p| p == project) {
                outcome.push(
                    self.error(
                        ErrorCode::InvalidProject,
                        format!("Jira project '{}' is not allowed", project),
                    )
                    .with_context("actual", key)
                    .with_context("expected", self.projects.join(",")),
                );
            }
        }
    }
}

impl Rule for JiraReferenceRule {
    fn name(&self) -> RuleName {
        RuleName::JiraReference
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        if commit.is_empty() {
            return RuleOutcome::fail(self.error(ErrorCode::EmptyMessage, "Commit message is empty"));
        }

        let mut outcome = RuleOutcome::pass(self.name())
            .with_detail("mode", if self.check_body { "body" } else { "subject" });
        let keys = if self.check_body {
            self.check_refs(commit.body(), &mut outcome)
        } else {
            self.check_subject(commit.subject(), &mut outcome)
        };
        self.check_projects(&keys, &mut outcome);
        outcome.set_detail("found_keys", keys.join(", "));
        outcome
    }
}
