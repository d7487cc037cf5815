// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation engine: runs the active rules over commits.

use tracing::debug;

use crate::commit::Commit;
use crate::config::CklintConfig;
use crate::ports::{Cancellation, RepositoryPort, SignatureVerifier};

use super::builtin::{active_rules, Rule, RuleEnv};
use super::name::RuleName;
use super::result::{RunSummary, ValidationResult};

/// Validation engine for commit messages.
///
/// Holds the rule set chosen at construction time and the optional
/// collaborators handed to repository-dependent rules.
pub struct ValidationEngine {
    rules: Vec<Box<dyn Rule>>,
    repository: Option<Box<dyn RepositoryPort>>,
    verifier: Option<Box<dyn SignatureVerifier>>,
    cancel: Cancellation,
}

impl ValidationEngine {
    /// Create an engine running the rules active under `config`.
    pub fn new(config: &CklintConfig) -> Self {
        let rules = active_rules(config);
        debug!(
            "Active rules: {}",
            rules
                .iter()
                .map(|r| r.name().as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self::from_rules(rules)
    }

    /// Create an engine running exactly `rules`.
    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules,
            repository: None,
            verifier: None,
            cancel: Cancellation::new(),
        }
    }

    /// Inject the repository used by `commitsahead`.
    pub fn with_repository(mut self, repository: impl RepositoryPort + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Inject the verifier used by `signedidentity`.
    pub fn with_verifier(mut self, verifier: impl SignatureVerifier + 'static) -> Self {
        self.verifier = Some(Box::new(verifier));
        self
    }

    /// Share a cancellation signal with the collaborators.
    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }

    /// Names of the rules this engine runs, in name order.
    pub fn active_rule_names(&self) -> Vec<RuleName> {
        let mut names: Vec<_> = self.rules.iter().map(|r| r.name()).collect();
        names.sort();
        names
    }

    fn env(&self) -> RuleEnv<'_> {
        RuleEnv {
            repository: self.repository.as_deref(),
            verifier: self.verifier.as_deref(),
            cancel: &self.cancel,
        }
    }

    /// Validate a single commit.
    pub fn validate_commit(&self, commit: &Commit) -> ValidationResult {
        let env = self.env();
        let outcomes = self
            .rules
            .iter()
            .map(|rule| rule.validate(commit, &env))
            .collect();
        let result = ValidationResult::new(commit.clone(), outcomes);

        debug!(
            "Validated commit {}: {} errors",
            if commit.hash().is_empty() {
                "<message>"
            } else {
                commit.short_hash()
            },
            result.error_count()
        );
        result
    }

    /// Validate a raw commit message.
    pub fn validate_message(&self, message: &str) -> ValidationResult {
        self.validate_commit(&Commit::new(message))
    }

    /// Validate every commit and aggregate the results, preserving input order.
    pub fn validate_commits<I>(&self, commits: I) -> RunSummary
    where
        I: IntoIterator<Item = Commit>,
    {
        let results = commits
            .into_iter()
            .map(|commit| self.validate_commit(&commit))
            .collect();
        RunSummary::from_results(results)
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("rules", &self.active_rule_names())
            .field("repository", &self.repository.is_some())
            .field("verifier", &self.verifier.is_some())
            .finish()
    }
}
