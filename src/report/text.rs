// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Human-readable report.

use console::style;
use std::fmt::Write;

use crate::rules::{RuleOutcome, RunSummary, ValidationResult};

use super::commit_label;

pub(super) fn render(summary: &RunSummary, verbose: bool, color: bool) -> String {
    let mut out = String::new();

    for result in &summary.results {
        render_result(&mut out, result, verbose, color);
    }

    if summary.total > 1 || !summary.all_passed() {
        let line = if summary.all_passed() {
            style(summary.summary()).green().bold()
        } else {
            style(summary.summary()).red().bold()
        };
        let _ = writeln!(out, "\n{}", line.force_styling(color));
        for (rule, count) in &summary.rule_failures {
            let _ = writeln!(out, "  {}: {}", rule, count);
        }
    }
    out
}

fn render_result(out: &mut String, result: &ValidationResult, verbose: bool, color: bool) {
    let status = if result.passed() {
        style("✓").green().bold()
    } else {
        style("✗").red().bold()
    };
    let _ = writeln!(
        out,
        "{} {} {}",
        status.force_styling(color),
        style(commit_label(&result.commit)).cyan().force_styling(color),
        result.commit.subject()
    );

    for outcome in &result.outcomes {
        for error in &outcome.errors {
            let _ = writeln!(
                out,
                "  {} {}: {} {}",
                style("✗").red().force_styling(color),
                style(error.rule).bold().force_styling(color),
                error.message,
                style(format!("[{}]", error.code)).dim().force_styling(color)
            );
            if !error.help.is_empty() {
                let _ = writeln!(
                    out,
                    "    {} {}",
                    style("help:").yellow().force_styling(color),
                    error.help
                );
            }
        }
        if verbose {
            render_details(out, outcome, color);
        }
    }
}

fn render_details(out: &mut String, outcome: &RuleOutcome, color: bool) {
    if outcome.passed() {
        let _ = write!(
            out,
            "  {} {}",
            style("✓").green().force_styling(color),
            outcome.rule
        );
    } else if outcome.details.is_empty() {
        return;
    } else {
        let _ = write!(out, "    {}", style(outcome.rule).dim().force_styling(color));
    }

    if !outcome.details.is_empty() {
        let details = outcome
            .details
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(out, " {}", style(format!("({})", details)).dim().force_styling(color));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Commit;
    use crate::rules::{ErrorCode, RuleName, ValidationError};

    fn summary() -> RunSummary {
        let ok = ValidationResult::new(
            Commit::new("feat: add login").with_hash("1234567890abcdef"),
            vec![RuleOutcome::pass(RuleName::SubjectLength).with_detail("length", 15)],
        );
        let bad = ValidationResult::new(
            Commit::new("bad subject."),
            vec![RuleOutcome::fail(ValidationError::new(
                RuleName::SubjectSuffix,
                ErrorCode::InvalidSuffix,
                "Subject should not end with '.'",
            ))],
        );
        RunSummary::from_results(vec![ok, bad])
    }

    #[test]
    fn test_plain_output() {
        let out = render(&summary(), false, false);
        assert!(out.contains("✓ 1234567 feat: add login"));
        assert!(out.contains("✗ <message> bad subject."));
        assert!(out.contains("  ✗ subjectsuffix: Subject should not end with '.' [invalid_suffix]"));
        assert!(out.contains("    help: "));
        assert!(out.contains("1 of 2 commits failed (1 errors)"));
        assert!(out.contains("  subjectsuffix: 1"));
        assert!(!out.contains("length=15"));
    }

    #[test]
    fn test_verbose_output() {
        let out = render(&summary(), true, false);
        assert!(out.contains("  ✓ subjectlength (length=15)"));
    }

    #[test]
    fn test_color_toggle() {
        assert!(!render(&summary(), false, false).contains('\u{1b}'));
        assert!(render(&summary(), false, true).contains('\u{1b}'));
    }
}
