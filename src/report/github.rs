// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! GitHub Actions workflow annotations.

use std::fmt::Write;

use crate::rules::RunSummary;

use super::commit_label;

/// Escape the message part of a workflow command.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow command property value.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

pub(super) fn render(summary: &RunSummary) -> String {
    let mut out = String::new();
    for result in &summary.results {
        let label = commit_label(&result.commit);
        for error in result.errors() {
            let title = format!("cklint {}", error.rule);
            let message = format!(
                "{} {}: {} ({})",
                label,
                result.commit.subject(),
                error.message,
                error.code
            );
            let _ = writeln!(
                out,
                "::error title={}::{}",
                escape_property(&title),
                escape_data(&message)
            );
        }
    }
    let _ = writeln!(out, "{}", summary.summary());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Commit;
    use crate::rules::{ErrorCode, RuleName, RuleOutcome, ValidationError, ValidationResult};

    #[test]
    fn test_annotations() {
        let summary = RunSummary::from_results(vec![ValidationResult::new(
            Commit::new("feat: 100% done").with_hash("abcdef123456"),
            vec![RuleOutcome::fail(ValidationError::new(
                RuleName::SubjectLength,
                ErrorCode::SubjectTooLong,
                "Subject is too long:\nshorten it",
            ))],
        )]);
        let out = render(&summary);
        let first = out.lines().next().unwrap();
        assert_eq!(
            first,
            "::error title=cklint subjectlength::abcdef1 feat: 100%25 done: Subject is too long:%0Ashorten it (subject_too_long)"
        );
        assert!(out.ends_with("1 of 1 commits failed (1 errors)\n"));
    }

    #[test]
    fn test_property_escaping() {
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }
}
