// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from cklint.toml.
//! Every section defaults independently, so partial files are valid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::ports::Cancellation;

/// The main configuration structure for cklint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CklintConfig {
    /// Rule activation lists.
    pub rules: RulesConfig,

    /// Subject line settings.
    pub subject: SubjectConfig,

    /// Conventional Commits settings.
    pub conventional: ConventionalConfig,

    /// Commit body settings.
    pub body: BodyConfig,

    /// Sign-off settings.
    pub signoff: SignoffConfig,

    /// Signature format settings.
    pub signature: SignatureConfig,

    /// Signer identity settings.
    pub identity: IdentityConfig,

    /// Jira reference settings.
    pub jira: JiraConfig,

    /// Imperative mood heuristics.
    pub imperative: ImperativeConfig,

    /// Spell checking settings.
    pub spell: SpellConfig,

    /// Repository settings.
    pub repository: RepositoryConfig,

    /// Output settings.
    pub output: OutputConfig,
}

impl CklintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Rule activation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    /// Rules to run even if disabled elsewhere or disabled by default.
    pub enabled: Vec<String>,

    /// Rules to skip.
    pub disabled: Vec<String>,
}

/// Letter case expected at the start of the subject (or description).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubjectCase {
    #[default]
    Lower,
    Upper,
    Ignore,
}

/// Subject line configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubjectConfig {
    /// Maximum subject length in characters.
    pub max_length: usize,

    /// Expected case of the first letter.
    pub case: SubjectCase,

    /// Characters the subject must not end with.
    pub disallowed_suffixes: String,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            max_length: 72,
            case: SubjectCase::Lower,
            disallowed_suffixes: ".,;:!?".to_string(),
        }
    }
}

/// Conventional Commits configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConventionalConfig {
    /// Allowed types. Empty means the 11 standard types.
    pub types: Vec<String>,

    /// Allowed scopes. Empty means any scope.
    pub scopes: Vec<String>,

    /// Maximum description length in characters.
    pub max_description_length: usize,

    /// Whether the `!` breaking marker is accepted.
    pub allow_breaking: bool,

    /// Whether a scope must be present.
    pub require_scope: bool,
}

impl Default for ConventionalConfig {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            scopes: Vec::new(),
            max_description_length: 72,
            allow_breaking: true,
            require_scope: false,
        }
    }
}

/// Commit body configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BodyConfig {
    /// Whether a body is required.
    pub required: bool,

    /// Minimum body length in characters when required.
    pub min_length: usize,

    /// Whether a body holding only sign-off lines satisfies `required`.
    pub allow_signoff_only: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            required: false,
            min_length: 10,
            allow_signoff_only: false,
        }
    }
}

/// Sign-off configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SignoffConfig {
    /// Whether more than one valid sign-off is accepted.
    pub allow_multiple: bool,
}

impl Default for SignoffConfig {
    fn default() -> Self {
        Self {
            allow_multiple: true,
        }
    }
}

/// Signature configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SignatureConfig {
    /// Accepted signature kinds (`gpg`, `ssh`).
    pub allowed_types: Vec<String>,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            allowed_types: vec!["gpg".to_string(), "ssh".to_string()],
        }
    }
}

/// Signer identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IdentityConfig {
    /// Accepted signers (names, emails or key ids). Empty accepts any verified signer.
    pub allowed_signers: Vec<String>,
}

/// Jira reference configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct JiraConfig {
    /// Accepted project keys. Empty accepts any project.
    pub projects: Vec<String>,

    /// Look for `Refs:` lines in the body instead of the subject.
    pub check_body: bool,
}

/// Extensions to the imperative mood heuristics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ImperativeConfig {
    /// Imperatives ending in `ed` (e.g. `embed`).
    pub base_forms_ed: Vec<String>,

    /// Imperatives ending in `s` (e.g. `process`).
    pub base_forms_s: Vec<String>,

    /// Imperatives ending in `ing` (e.g. `bring`).
    pub base_forms_ing: Vec<String>,

    /// Words that are never verbs.
    pub non_verbs: Vec<String>,
}

/// Spelling locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpellLocale {
    #[default]
    Us,
    Uk,
}

/// Spell checking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SpellConfig {
    /// Spelling variant to enforce.
    pub locale: SpellLocale,

    /// Words never reported.
    pub ignore_words: Vec<String>,

    /// Additional misspelling to correction pairs.
    pub custom_words: BTreeMap<String, String>,
}

/// Repository configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Branch used to count commits ahead.
    pub reference_branch: String,

    /// Maximum commits HEAD may be ahead of the reference branch.
    pub max_commits_ahead: usize,

    /// Whether merge commits are left out of validation.
    pub skip_merge_commits: bool,

    /// Seconds repository-backed rules may spend per run; 0 disables the limit.
    pub timeout_secs: u64,
}

impl RepositoryConfig {
    /// Cancellation signal for one run, bounded by `timeout_secs`.
    pub fn cancellation(&self) -> Cancellation {
        if self.timeout_secs == 0 {
            return Cancellation::new();
        }
        Cancellation::with_deadline(Instant::now() + Duration::from_secs(self.timeout_secs))
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            reference_branch: "main".to_string(),
            max_commits_ahead: 20,
            skip_merge_commits: true,
            timeout_secs: 30,
        }
    }
}

/// Output format for reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON output for machine parsing
    Json,
    /// GitHub Actions workflow annotations
    Github,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format.
    pub format: OutputFormat,

    /// Whether passing rules and rule details are shown.
    pub verbose: bool,

    /// Whether to use colors.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CklintConfig::default();
        assert_eq!(config.subject.max_length, 72);
        assert_eq!(config.subject.case, SubjectCase::Lower);
        assert_eq!(config.conventional.max_description_length, 72);
        assert!(config.conventional.types.is_empty());
        assert!(config.signoff.allow_multiple);
        assert_eq!(config.repository.reference_branch, "main");
    }

    #[test]
    fn test_enum_spellings() {
        let config: CklintConfig = toml::from_str(
            r#"
[subject]
case = "upper"

[spell]
locale = "UK"

[output]
format = "github"
"#,
        )
        .unwrap();
        assert_eq!(config.subject.case, SubjectCase::Upper);
        assert_eq!(config.spell.locale, SpellLocale::Uk);
        assert_eq!(config.output.format, OutputFormat::Github);
    }

    #[test]
    fn test_repository_timeout() {
        let mut repository = RepositoryConfig::default();
        assert_eq!(repository.timeout_secs, 30);
        assert!(!repository.cancellation().is_cancelled());

        repository.timeout_secs = 0;
        assert!(!repository.cancellation().is_cancelled());
    }

    #[test]
    fn test_config_serialization() {
        let config = CklintConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("max_length"));
        assert!(toml_str.contains("reference_branch"));
    }
}
