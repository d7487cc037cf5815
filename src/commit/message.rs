// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The commit value object consumed by every rule.

use chrono::{DateTime, Utc};

/// Line git places above the diff in `commit --verbose` templates.
const SCISSORS_LINE: &str = "# ------------------------ >8 ------------------------";

/// An immutable view of a single commit.
///
/// The full `message` is authoritative; `subject` and `body` are derived from
/// it when the commit is constructed and never drift apart afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    hash: String,
    subject: String,
    body: String,
    message: String,
    author: String,
    author_email: String,
    commit_date: Option<DateTime<Utc>>,
    signature: String,
    is_merge_commit: bool,
}

impl Commit {
    /// Create a commit from its raw message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let (subject, body) = split_message(&message);
        Self {
            subject,
            body,
            message,
            ..Default::default()
        }
    }

    /// Create a commit from the contents of a `COMMIT_EDITMSG`-style file.
    ///
    /// Comment lines are dropped and everything below the scissors line is
    /// ignored, matching what git itself stores.
    pub fn from_message_file(contents: &str) -> Self {
        Self::new(clean_message_file(contents))
    }

    /// Set the commit hash.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Set the author name and email.
    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = name.into();
        self.author_email = email.into();
        self
    }

    /// Set the commit date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.commit_date = Some(date);
        self
    }

    /// Attach the raw signature blob.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Mark the commit as a merge commit.
    pub fn with_merge(mut self, is_merge: bool) -> Self {
        self.is_merge_commit = is_merge;
        self
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Abbreviated hash for display.
    pub fn short_hash(&self) -> &str {
        &self.hash[..7.min(self.hash.len())]
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    pub fn commit_date(&self) -> Option<DateTime<Utc>> {
        self.commit_date
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn is_merge_commit(&self) -> bool {
        self.is_merge_commit
    }

    /// Whether the message has no visible content at all.
    pub fn is_empty(&self) -> bool {
        self.message.trim().is_empty()
    }
}

/// Split a message into subject (first line) and body.
///
/// Blank lines between the subject and the body are not part of the body.
fn split_message(message: &str) -> (String, String) {
    let mut lines = message.lines();
    let subject = lines.next().unwrap_or("").trim_end().to_string();
    let body = lines
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string();
    (subject, body)
}

/// Strip git comment lines and the verbose diff section from a message file.
pub fn clean_message_file(contents: &str) -> String {
    let mut kept = Vec::new();
    for line in contents.lines() {
        if line == SCISSORS_LINE {
            break;
        }
        if line.starts_with('#') {
            continue;
        }
        kept.push(line.trim_end());
    }
    kept.join("\n").trim().to_string()
}
