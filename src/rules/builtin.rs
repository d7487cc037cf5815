// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The rule contract and the built-in rule registry.

use crate::commit::Commit;
use crate::config::CklintConfig;
use crate::ports::{Cancellation, RepositoryPort, SignatureVerifier};

use super::activation::is_active;
use super::body::CommitBodyRule;
use super::commits_ahead::CommitsAheadRule;
use super::conventional::ConventionalCommitRule;
use super::imperative::ImperativeVerbRule;
use super::jira::JiraReferenceRule;
use super::name::RuleName;
use super::result::RuleOutcome;
use super::signature::{SignatureRule, SignedIdentityRule};
use super::signoff::SignOffRule;
use super::spell::SpellRule;
use super::subject::{SubjectCaseRule, SubjectLengthRule, SubjectSuffixRule};

/// Collaborators available to rules during a validation pass.
///
/// Pure rules ignore it entirely.
#[derive(Clone, Copy)]
pub struct RuleEnv<'a> {
    pub repository: Option<&'a dyn RepositoryPort>,
    pub verifier: Option<&'a dyn SignatureVerifier>,
    pub cancel: &'a Cancellation,
}

impl<'a> RuleEnv<'a> {
    /// An environment without any collaborators.
    pub fn offline(cancel: &'a Cancellation) -> Self {
        Self {
            repository: None,
            verifier: None,
            cancel,
        }
    }
}

impl std::fmt::Debug for RuleEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEnv")
            .field("repository", &self.repository.is_some())
            .field("verifier", &self.verifier.is_some())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

/// A single commit validation rule.
///
/// Implementations are deterministic for a given commit and environment, do
/// not mutate shared state, and report every problem through the returned
/// outcome rather than by panicking.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name.
    fn name(&self) -> RuleName;

    /// Validate a commit.
    fn validate(&self, commit: &Commit, env: &RuleEnv<'_>) -> RuleOutcome;
}

/// Construct every built-in rule from configuration, in name order.
pub fn build_rules(config: &CklintConfig) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(CommitBodyRule::new(&config.body)),
        Box::new(CommitsAheadRule::new(&config.repository)),
        Box::new(ConventionalCommitRule::new(&config.conventional)),
        Box::new(ImperativeVerbRule::new(&config.imperative)),
        Box::new(JiraReferenceRule::new(&config.jira)),
        Box::new(SignatureRule::new(&config.signature)),
        Box::new(SignedIdentityRule::new(&config.identity)),
        Box::new(SignOffRule::new(&config.signoff)),
        Box::new(SpellRule::new(&config.spell)),
        Box::new(SubjectCaseRule::new(&config.subject)),
        Box::new(SubjectLengthRule::new(&config.subject)),
        Box::new(SubjectSuffixRule::new(&config.subject)),
    ]
}

/// Construct only the rules active under the configuration's activation lists.
pub fn active_rules(config: &CklintConfig) -> Vec<Box<dyn Rule>> {
    build_rules(config)
        .into_iter()
        .filter(|rule| {
            is_active(
                rule.name().as_str(),
                &config.rules.enabled,
                &config.rules.disabled,
            )
        })
        .collect()
}
