// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Stable rule identifiers.

use serde::{Serialize, Serializer};

use super::activation::clean_name;

/// Every rule cklint knows about.
///
/// Variants are declared in alphabetical order of their names, so the derived
/// ordering is the report ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleName {
    CommitBody,
    CommitsAhead,
    ConventionalCommit,
    ImperativeVerb,
    JiraReference,
    Signature,
    SignedIdentity,
    SignOff,
    Spell,
    SubjectCase,
    SubjectLength,
    SubjectSuffix,
}

impl RuleName {
    /// All rules, alphabetically.
    pub const ALL: [RuleName; 12] = [
        RuleName::CommitBody,
        RuleName::CommitsAhead,
        RuleName::ConventionalCommit,
        RuleName::ImperativeVerb,
        RuleName::JiraReference,
        RuleName::Signature,
        RuleName::SignedIdentity,
        RuleName::SignOff,
        RuleName::Spell,
        RuleName::SubjectCase,
        RuleName::SubjectLength,
        RuleName::SubjectSuffix,
    ];

    /// The configuration name. Renaming any of these breaks existing configs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::CommitBody => "commitbody",
            RuleName::CommitsAhead => "commitsahead",
            RuleName::ConventionalCommit => "conventionalcommit",
            RuleName::ImperativeVerb => "imperativeverb",
            RuleName::JiraReference => "jirareference",
            RuleName::Signature => "signature",
            RuleName::SignedIdentity => "signedidentity",
            RuleName::SignOff => "signoff",
            RuleName::Spell => "spell",
            RuleName::SubjectCase => "subjectcase",
            RuleName::SubjectLength => "subjectlength",
            RuleName::SubjectSuffix => "subjectsuffix",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            RuleName::CommitBody => "Body is separated by a blank line and well formed",
            RuleName::CommitsAhead => "Branch is not too far ahead of the reference branch",
            RuleName::ConventionalCommit => "Subject follows Conventional Commits",
            RuleName::ImperativeVerb => "Subject starts with an imperative verb",
            RuleName::JiraReference => "Message references a Jira issue",
            RuleName::Signature => "Commit carries a well-formed GPG or SSH signature",
            RuleName::SignedIdentity => "Signature verifies and comes from an allowed signer",
            RuleName::SignOff => "Body carries a Signed-off-by trailer",
            RuleName::Spell => "Message has no common misspellings",
            RuleName::SubjectCase => "Subject starts with the configured letter case",
            RuleName::SubjectLength => "Subject fits the maximum length",
            RuleName::SubjectSuffix => "Subject does not end with punctuation",
        }
    }

    /// Look up a rule from a (possibly sloppy) configuration entry.
    pub fn from_config_name(name: &str) -> Option<Self> {
        let clean = clean_name(name);
        Self::ALL.into_iter().find(|rule| rule.as_str() == clean)
    }
}

impl std::fmt::Display for RuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RuleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
