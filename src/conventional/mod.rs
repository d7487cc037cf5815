// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Conventional Commits subject parsing.
//!
//! The parser only answers whether a subject has the
//! `type(scope)!: description` shape. Whether that shape is acceptable (known
//! type, allowed scope, spacing, description length) is decided by the rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Subject grammar. The text after the colon is either empty or starts with a space.
    static ref SUBJECT_REGEX: Regex = Regex::new(
        r"^(?P<type>[A-Za-z0-9_]+)(?:\((?P<scope>[^():\r\n]*)\))?(?P<breaking>!)?:(?P<rest>(?: .*)?)$"
    )
    .unwrap();
}

/// The 11 standard Conventional Commits types.
pub const STANDARD_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// Parsed form of a conventional subject line.
///
/// When `is_valid` is false every other field holds its zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConventionalCommit {
    /// Commit type, exactly as written.
    pub commit_type: String,
    /// Individual scopes in order of appearance.
    pub scopes: Vec<String>,
    /// Whether `!` marked a breaking change.
    pub breaking: bool,
    /// Text after the colon, without the separating whitespace.
    pub description: String,
    /// Scope text between the parentheses, unsplit. `None` when no parentheses were written.
    pub raw_scope: Option<String>,
    /// Whether the subject matched the grammar at all.
    pub is_valid: bool,
}

impl ConventionalCommit {
    /// Parse a subject line.
    pub fn parse(subject: &str) -> Self {
        let Some(captures) = SUBJECT_REGEX.captures(subject) else {
            return Self::default();
        };

        let commit_type = captures
            .name("type")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let raw_scope = captures.name("scope").map(|m| m.as_str().to_string());
        let scopes = raw_scope
            .as_deref()
            .map(split_scopes)
            .unwrap_or_default();
        let description = captures
            .name("rest")
            .map(|m| m.as_str().trim_start_matches(' ').to_string())
            .unwrap_or_default();

        Self {
            commit_type,
            scopes,
            breaking: captures.name("breaking").is_some(),
            description,
            raw_scope,
            is_valid: true,
        }
    }

    /// Whether the subject matched the grammar.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Whether a scope was given.
    pub fn has_scope(&self) -> bool {
        !self.scopes.is_empty()
    }
}

/// Split a raw scope on commas, dropping empty pieces.
fn split_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of spaces directly after the header colon.
///
/// Returns `None` when the subject has no colon.
pub fn spaces_after_colon(subject: &str) -> Option<usize> {
    let idx = subject.find(':')?;
    Some(
        subject[idx + 1..]
            .chars()
            .take_while(|c| *c == ' ')
            .count(),
    )
}
