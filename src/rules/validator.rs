// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation error types.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::name::RuleName;

/// Stable machine-readable identifiers for rule findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Shared
    EmptyMessage,
    EmptySubject,

    // Subject
    SubjectTooLong,
    InvalidCase,
    InvalidSuffix,
    InvalidUtf8,

    // Conventional Commits
    InvalidConventionalFormat,
    InvalidConventionalType,
    InvalidConventionalScope,
    InvalidScopeFormat,
    MissingScope,
    BreakingNotAllowed,
    EmptyDescription,
    DescriptionTooLong,
    SpacingError,

    // Body
    MissingBody,
    BodyTooShort,
    MissingBlankLine,
    SignoffOnlyBody,
    ContentAfterSignoff,

    // Sign-off
    MissingSignoff,
    InvalidSignoffFormat,
    MultipleSignoffs,

    // Signature and identity
    MissingSignature,
    InvalidGpgFormat,
    InvalidSshFormat,
    UnknownSignatureFormat,
    DisallowedSignatureType,
    VerificationFailed,
    UnauthorizedSigner,

    // Jira
    MissingJira,
    MisplacedJira,
    InvalidProject,
    InvalidRefsFormat,
    RefsAfterSignoff,

    // Imperative mood
    PastTense,
    Gerund,
    ThirdPerson,
    NonVerb,

    // Spelling
    Misspelling,

    // Repository
    TooManyCommits,
    RepositoryFailure,
    Cancelled,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyMessage => "empty_message",
            ErrorCode::EmptySubject => "empty_subject",
            ErrorCode::SubjectTooLong => "subject_too_long",
            ErrorCode::InvalidCase => "invalid_case",
            ErrorCode::InvalidSuffix => "invalid_suffix",
            ErrorCode::InvalidUtf8 => "invalid_utf8",
            ErrorCode::InvalidConventionalFormat => "invalid_conventional_format",
            ErrorCode::InvalidConventionalType => "invalid_conventional_type",
            ErrorCode::InvalidConventionalScope => "invalid_conventional_scope",
            ErrorCode::InvalidScopeFormat => "invalid_scope_format",
            ErrorCode::MissingScope => "missing_scope",
            ErrorCode::BreakingNotAllowed => "breaking_not_allowed",
            ErrorCode::EmptyDescription => "empty_description",
            ErrorCode::DescriptionTooLong => "description_too_long",
            ErrorCode::SpacingError => "spacing_error",
            ErrorCode::MissingBody => "missing_body",
            ErrorCode::BodyTooShort => "body_too_short",
            ErrorCode::MissingBlankLine => "missing_blank_line",
            ErrorCode::SignoffOnlyBody => "only_signoff",
            ErrorCode::ContentAfterSignoff => "content_after_signoff",
            ErrorCode::MissingSignoff => "missing_signoff",
            ErrorCode::InvalidSignoffFormat => "invalid_format",
            ErrorCode::MultipleSignoffs => "multiple_signoffs",
            ErrorCode::MissingSignature => "missing_signature",
            ErrorCode::InvalidGpgFormat => "invalid_gpg_format",
            ErrorCode::InvalidSshFormat => "invalid_ssh_format",
            ErrorCode::UnknownSignatureFormat => "unknown_signature_format",
            ErrorCode::DisallowedSignatureType => "disallowed_signature_type",
            ErrorCode::VerificationFailed => "verification_failed",
            ErrorCode::UnauthorizedSigner => "unauthorized_signer",
            ErrorCode::MissingJira => "missing_jira",
            ErrorCode::MisplacedJira => "misplaced_jira",
            ErrorCode::InvalidProject => "invalid_project",
            ErrorCode::InvalidRefsFormat => "invalid_refs_format",
            ErrorCode::RefsAfterSignoff => "refs_after_signoff",
            ErrorCode::PastTense => "past_tense",
            ErrorCode::Gerund => "gerund",
            ErrorCode::ThirdPerson => "third_person",
            ErrorCode::NonVerb => "non_verb",
            ErrorCode::Misspelling => "misspelling",
            ErrorCode::TooManyCommits => "too_many_commits",
            ErrorCode::RepositoryFailure => "git_error",
            ErrorCode::Cancelled => "cancelled",
        }
    }

    /// Default remediation text.
    pub fn help(&self) -> &'static str {
        match self {
            ErrorCode::EmptyMessage => "Write a commit message.",
            ErrorCode::EmptySubject => "Write a subject line summarizing the change.",
            ErrorCode::SubjectTooLong => {
                "Shorten the subject; move details into the body."
            }
            ErrorCode::InvalidCase => "Change the case of the first letter of the subject.",
            ErrorCode::InvalidSuffix => "Remove the trailing punctuation from the subject.",
            ErrorCode::InvalidUtf8 => "Re-encode the commit message as UTF-8.",
            ErrorCode::InvalidConventionalFormat => {
                "Use the form 'type(scope): description', e.g. 'feat(auth): add login'."
            }
            ErrorCode::InvalidConventionalType => "Use one of the allowed commit types.",
            ErrorCode::InvalidConventionalScope => "Use one of the allowed scopes.",
            ErrorCode::InvalidScopeFormat => {
                "Separate multiple scopes with single commas and no spaces, e.g. 'feat(ui,api): ...'."
            }
            ErrorCode::MissingScope => "Add a scope in parentheses: 'type(scope): description'.",
            ErrorCode::BreakingNotAllowed => {
                "Remove the '!' marker; breaking changes are not accepted here."
            }
            ErrorCode::EmptyDescription => "Add a description after 'type: '.",
            ErrorCode::DescriptionTooLong => {
                "Shorten the description; move details into the body."
            }
            ErrorCode::SpacingError => "Put exactly one space after the colon.",
            ErrorCode::MissingBody => "Add a body explaining what changed and why.",
            ErrorCode::BodyTooShort => "Expand the body with more detail.",
            ErrorCode::MissingBlankLine => "Separate the subject from the body with a blank line.",
            ErrorCode::SignoffOnlyBody => {
                "Describe the change in the body, not just sign-off lines."
            }
            ErrorCode::ContentAfterSignoff => {
                "Move descriptive text above the Signed-off-by line; only trailers may follow it."
            }
            ErrorCode::MissingSignoff => "Add a sign-off with 'git commit -s'.",
            ErrorCode::InvalidSignoffFormat => {
                "Use the exact form 'Signed-off-by: Name <email@example.com>'."
            }
            ErrorCode::MultipleSignoffs => "Keep a single Signed-off-by line.",
            ErrorCode::MissingSignature => "Sign the commit with 'git commit -S'.",
            ErrorCode::InvalidGpgFormat | ErrorCode::InvalidSshFormat => {
                "Re-sign the commit with 'git commit --amend -S'."
            }
            ErrorCode::UnknownSignatureFormat => {
                "Sign with a GPG or SSH key (git config gpg.format openpgp|ssh)."
            }
            ErrorCode::DisallowedSignatureType => "Sign with one of the allowed key types.",
            ErrorCode::VerificationFailed => {
                "Make sure the signing key is trusted by the verifier and re-sign the commit."
            }
            ErrorCode::UnauthorizedSigner => "Sign the commit with an allowed identity.",
            ErrorCode::MissingJira => "Reference a Jira issue, e.g. 'PROJ-123'.",
            ErrorCode::MisplacedJira => {
                "Put the Jira key at the end of the subject, e.g. 'feat: add login [PROJ-123]'."
            }
            ErrorCode::InvalidProject => "Reference an issue from one of the allowed projects.",
            ErrorCode::InvalidRefsFormat => "Use the form 'Refs: PROJ-123, PROJ-456'.",
            ErrorCode::RefsAfterSignoff => "Move the Refs line above the Signed-off-by line.",
            ErrorCode::PastTense | ErrorCode::Gerund | ErrorCode::ThirdPerson => {
                "Use the imperative mood, e.g. 'add' instead of 'added', 'adding' or 'adds'."
            }
            ErrorCode::NonVerb => "Start the subject with a verb, e.g. 'fix', 'add', 'remove'.",
            ErrorCode::Misspelling => "Fix the spelling.",
            ErrorCode::TooManyCommits => "Rebase onto the reference branch or split the work.",
            ErrorCode::RepositoryFailure => "Check that the repository and reference branch are readable.",
            ErrorCode::Cancelled => "Re-run validation with a longer timeout.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The rule that produced it.
    pub rule: RuleName,
    /// Stable identifier.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Remediation text.
    pub help: String,
    /// Structured details such as `actual` and `expected`.
    pub context: BTreeMap<String, String>,
}

impl ValidationError {
    /// Create an error with the code's default help text.
    pub fn new(rule: RuleName, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            rule,
            code,
            message: message.into(),
            help: code.help().to_string(),
            context: BTreeMap::new(),
        }
    }

    /// Replace the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Add a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Look up a context entry.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.rule, self.code, self.message)
    }
}
