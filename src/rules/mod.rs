// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! Every rule implements [`Rule`] and is constructed from its own slice of
//! the configuration by [`build_rules`]. [`ValidationEngine`] runs the rules
//! that survive activation over one or more commits.

pub mod activation;
mod body;
mod builtin;
mod commits_ahead;
mod conventional;
mod engine;
mod imperative;
mod jira;
mod name;
mod result;
mod signature;
mod signoff;
mod spell;
mod subject;
mod validator;

pub use activation::{is_active, DEFAULT_DISABLED};
pub use body::CommitBodyRule;
pub use builtin::{active_rules, build_rules, Rule, RuleEnv};
pub use commits_ahead::CommitsAheadRule;
pub use conventional::ConventionalCommitRule;
pub use engine::ValidationEngine;
pub use imperative::ImperativeVerbRule;
pub use jira::JiraReferenceRule;
pub use name::RuleName;
pub use result::{RuleOutcome, RunSummary, ValidationResult};
pub use signature::{SignatureRule, SignedIdentityRule};
pub use signoff::SignOffRule;
pub use spell::SpellRule;
pub use subject::{SubjectCaseRule, SubjectLengthRule, SubjectSuffixRule};
pub use validator::{ErrorCode, ValidationError};
