// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rendering of validation runs.
//!
//! Reporters turn a [`RunSummary`] into text; printing is left to the caller.

mod github;
mod json;
mod text;

use crate::commit::Commit;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::rules::RunSummary;

/// How a run is rendered.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Show passing rules and rule details.
    pub verbose: bool,
    /// Emit ANSI styling (text format only).
    pub color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
            color: true,
        }
    }
}

/// Render a run in the requested format.
pub fn render(summary: &RunSummary, options: &ReportOptions) -> Result<String> {
    match options.format {
        OutputFormat::Text => Ok(text::render(summary, options.verbose, options.color)),
        OutputFormat::Json => json::render(summary, options.verbose),
        OutputFormat::Github => Ok(github::render(summary)),
    }
}

/// Short label for a commit: its abbreviated hash, or a placeholder for bare messages.
fn commit_label(commit: &Commit) -> &str {
    if commit.hash().is_empty() {
        "<message>"
    } else {
        commit.short_hash()
    }
}
