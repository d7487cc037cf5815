// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Machine-readable report.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Result, ResultExt};
use crate::rules::{RuleName, RunSummary, ValidationError, ValidationResult};

#[derive(Serialize)]
struct JsonReport<'a> {
    valid: bool,
    total: usize,
    passed: usize,
    failed: usize,
    rule_failures: &'a BTreeMap<RuleName, usize>,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    commit: Option<&'a str>,
    subject: &'a str,
    author: Option<&'a str>,
    date: Option<String>,
    valid: bool,
    errors: Vec<&'a ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<RuleName, &'a BTreeMap<String, String>>>,
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

impl<'a> JsonResult<'a> {
    fn new(result: &'a ValidationResult, verbose: bool) -> Self {
        let commit = &result.commit;
        Self {
            commit: non_empty(commit.hash()),
            subject: commit.subject(),
            author: non_empty(commit.author()),
            date: commit.commit_date().map(|d| d.to_rfc3339()),
            valid: result.passed(),
            errors: result.errors().collect(),
            details: verbose.then(|| {
                result
                    .outcomes
                    .iter()
                    .filter(|o| !o.details.is_empty())
                    .map(|o| (o.rule, &o.details))
                    .collect()
            }),
        }
    }
}

pub(super) fn render(summary: &RunSummary, verbose: bool) -> Result<String> {
    let report = JsonReport {
        valid: summary.all_passed(),
        total: summary.total,
        passed: summary.passed,
        failed: summary.failed,
        rule_failures: &summary.rule_failures,
        results: summary
            .results
            .iter()
            .map(|r| JsonResult::new(r, verbose))
            .collect(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}
