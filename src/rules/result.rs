// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::commit::Commit;

use super::name::RuleName;
use super::validator::ValidationError;

/// Everything one rule produced for one commit.
///
/// `details` carries verbose context (parsed type, matched keys, counts) so
/// reporters never have to query the rule again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: RuleName,
    pub errors: Vec<ValidationError>,
    pub details: BTreeMap<String, String>,
}

impl RuleOutcome {
    /// An outcome with no findings.
    pub fn pass(rule: RuleName) -> Self {
        Self {
            rule,
            errors: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    /// An outcome with a single finding.
    pub fn fail(error: ValidationError) -> Self {
        let mut outcome = Self::pass(error.rule);
        outcome.errors.push(error);
        outcome
    }

    /// Add a finding.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a verbose detail.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.details.insert(key.into(), value.to_string());
        self
    }

    /// Add a verbose detail in place.
    pub fn set_detail(&mut self, key: impl Into<String>, value: impl ToString) {
        self.details.insert(key.into(), value.to_string());
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of validating one commit.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The commit that was validated.
    pub commit: Commit,
    /// One outcome per executed rule, ordered by rule name.
    pub outcomes: Vec<RuleOutcome>,
}

impl ValidationResult {
    /// Build a result; outcomes are sorted by rule name.
    pub fn new(commit: Commit, mut outcomes: Vec<RuleOutcome>) -> Self {
        outcomes.sort_by_key(|o| o.rule);
        Self { commit, outcomes }
    }

    /// Check if the validation passed (no errors).
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::passed)
    }

    /// All findings, in rule order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.outcomes.iter().flat_map(|o| o.errors.iter())
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.errors.len()).sum()
    }

    /// Outcome of a given rule, if it ran.
    pub fn outcome(&self, rule: RuleName) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule == rule)
    }
}

/// Aggregate over a validation run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Per-commit results, in the order the commits were given.
    pub results: Vec<ValidationResult>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Number of findings per rule.
    pub rule_failures: BTreeMap<RuleName, usize>,
}

impl RunSummary {
    /// Aggregate a list of results.
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let mut rule_failures = BTreeMap::new();
        for error in results.iter().flat_map(ValidationResult::errors) {
            *rule_failures.entry(error.rule).or_insert(0) += 1;
        }

        Self {
            results,
            total,
            passed,
            failed: total - passed,
            rule_failures,
        }
    }

    /// Whether every commit passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.all_passed() {
            format!("{} of {} commits passed", self.passed, self.total)
        } else {
            format!(
                "{} of {} commits failed ({} errors)",
                self.failed,
                self.total,
                self.rule_failures.values().sum::<usize>()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ErrorCode;

    fn error(rule: RuleName) -> ValidationError {
        ValidationError::new(rule, ErrorCode::EmptyMessage, "empty")
    }

    #[test]
    fn test_validation_result_passed() {
        let result = ValidationResult::new(
            Commit::new("feat: test"),
            vec![RuleOutcome::pass(RuleName::SubjectLength)],
        );
        assert!(result.passed());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_outcomes_sorted_by_rule() {
        let result = ValidationResult::new(
            Commit::new("x"),
            vec![
                RuleOutcome::pass(RuleName::SubjectSuffix),
                RuleOutcome::fail(error(RuleName::CommitBody)),
                RuleOutcome::pass(RuleName::Signature),
            ],
        );
        let order: Vec<_> = result.outcomes.iter().map(|o| o.rule).collect();
        assert_eq!(
            order,
            vec![RuleName::CommitBody, RuleName::Signature, RuleName::SubjectSuffix]
        );
        assert!(!result.passed());
        assert!(result.outcome(RuleName::Signature).unwrap().passed());
    }

    #[test]
    fn test_run_summary_counts() {
        let ok = ValidationResult::new(Commit::new("a"), vec![RuleOutcome::pass(RuleName::Spell)]);
        let mut outcome = RuleOutcome::fail(error(RuleName::SignOff));
        outcome.push(error(RuleName::SignOff));
        let bad = ValidationResult::new(
            Commit::new("b"),
            vec![outcome, RuleOutcome::fail(error(RuleName::Spell))],
        );

        let summary = RunSummary::from_results(vec![ok, bad]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.rule_failures[&RuleName::SignOff], 2);
        assert_eq!(summary.rule_failures[&RuleName::Spell], 1);
        assert!(!summary.all_passed());
        assert!(summary.summary().contains("1 of 2 commits failed"));
    }
}
