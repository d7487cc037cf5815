// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Branch divergence from the reference branch.

use tracing::debug;

use crate::commit::Commit;
use crate::config::RepositoryConfig;
use crate::ports::RepositoryError;

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::validator::{ErrorCode, ValidationError};

/// HEAD must not be too far ahead of the reference branch.
#[derive(Debug, Clone)]
pub struct CommitsAheadRule {
    reference: String,
    max_commits_ahead: usize,
}

impl CommitsAheadRule {
    pub fn new(config: &RepositoryConfig) -> Self {
        Self {
            reference: config.reference_branch.clone(),
            max_commits_ahead: config.max_commits_ahead,
        }
    }

    fn cancelled(&self) -> RuleOutcome {
        RuleOutcome::fail(ValidationError::new(
            self.name(),
            ErrorCode::Cancelled,
            "Counting commits ahead was cancelled",
        ))
    }
}

impl Rule for CommitsAheadRule {
    fn name(&self) -> RuleName {
        RuleName::CommitsAhead
    }

    fn validate(&self, _commit: &Commit, env: &RuleEnv<'_>) -> RuleOutcome {
        let Some(repository) = env.repository else {
            return RuleOutcome::pass(self.name()).with_detail("status", "skipped");
        };
        if env.cancel.is_cancelled() {
            return self.cancelled();
        }

        let ahead = match repository.commits_ahead_count(env.cancel, &self.reference) {
            Ok(ahead) => ahead,
            Err(RepositoryError::ReferenceNotFound { reference }) => {
                debug!("Reference '{}' not found, treating as 0 commits ahead", reference);
                0
            }
            Err(RepositoryError::Cancelled) => return self.cancelled(),
            Err(RepositoryError::Other { message }) => {
                return RuleOutcome::fail(
                    ValidationError::new(
                        self.name(),
                        ErrorCode::RepositoryFailure,
                        format!("Failed to count commits ahead of '{}': {}", self.reference, message),
                    )
                    .with_context("reference", &self.reference),
                );
            }
        };

        let mut outcome = RuleOutcome::pass(self.name())
            .with_detail("ahead_count", ahead)
            .with_detail("reference", &self.reference);
        if ahead > self.max_commits_ahead {
            outcome.push(
                ValidationError::new(
                    self.name(),
                    ErrorCode::TooManyCommits,
                    format!(
                        "HEAD is {} commits ahead of '{}' (max: {})",
                        ahead, self.reference, self.max_commits_ahead
                    ),
                )
                .with_context("actual", ahead)
                .with_context("expected", self.max_commits_ahead)
                .with_context("reference", &self.reference),
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Cancellation, RepositoryPort};

    struct FixedRepository(Result<usize, RepositoryError>);

    impl RepositoryPort for FixedRepository {
        fn commits_ahead_count(
            &self,
            _cancel: &Cancellation,
            _reference: &str,
        ) -> Result<usize, RepositoryError> {
            self.0.clone()
        }
    }

    fn run_with(result: Result<usize, RepositoryError>, cancel: &Cancellation) -> RuleOutcome {
        let rule = CommitsAheadRule::new(&RepositoryConfig {
            max_commits_ahead: 5,
            ..RepositoryConfig::default()
        });
        let repository = FixedRepository(result);
        let env = RuleEnv {
            repository: Some(&repository),
            verifier: None,
            cancel,
        };
        rule.validate(&Commit::new("feat: x"), &env)
    }

    fn run(result: Result<usize, RepositoryError>) -> RuleOutcome {
        run_with(result, &Cancellation::new())
    }

    #[test]
    fn test_within_limit() {
        let outcome = run(Ok(5));
        assert!(outcome.passed());
        assert_eq!(outcome.details["ahead_count"], "5");
    }

    #[test]
    fn test_too_many_commits() {
        let outcome = run(Ok(6));
        assert_eq!(outcome.errors[0].code, ErrorCode::TooManyCommits);
        assert_eq!(outcome.errors[0].context_value("actual"), Some("6"));
    }

    #[test]
    fn test_reference_not_found_is_zero() {
        let outcome = run(Err(RepositoryError::ReferenceNotFound {
            reference: "main".to_string(),
        }));
        assert!(outcome.passed());
        assert_eq!(outcome.details["ahead_count"], "0");
    }

    #[test]
    fn test_repository_failure() {
        let outcome = run(Err(RepositoryError::Other {
            message: "corrupt object".to_string(),
        }));
        assert_eq!(outcome.errors[0].code, ErrorCode::RepositoryFailure);
        assert!(outcome.errors[0].message.contains("corrupt object"));
    }

    #[test]
    fn test_cancelled() {
        assert_eq!(
            run(Err(RepositoryError::Cancelled)).errors[0].code,
            ErrorCode::Cancelled
        );

        let cancel = Cancellation::new();
        cancel.cancel();
        assert_eq!(run_with(Ok(1), &cancel).errors[0].code, ErrorCode::Cancelled);
    }

    #[test]
    fn test_skipped_without_repository() {
        let rule = CommitsAheadRule::new(&RepositoryConfig::default());
        let cancel = Cancellation::new();
        let outcome = rule.validate(&Commit::new("feat: x"), &RuleEnv::offline(&cancel));
        assert!(outcome.passed());
        assert_eq!(outcome.details["status"], "skipped");
    }
}
