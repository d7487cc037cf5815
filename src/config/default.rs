// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::CklintConfig;

/// Get the default configuration.
pub fn default_config() -> CklintConfig {
    CklintConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# cklint configuration file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Rule activation. Explicit enables win over disables.
# Disabled unless enabled here: jirareference, commitbody, spell.
[rules]
enabled = []
disabled = []

[subject]
max_length = 72
case = "lower"            # lower | upper | ignore
disallowed_suffixes = ".,;:!?"

[conventional]
types = ["feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert"]
scopes = []               # empty allows any scope
max_description_length = 72
allow_breaking = true
require_scope = false

[body]
required = false
min_length = 10
allow_signoff_only = false

[signoff]
allow_multiple = true

[signature]
allowed_types = ["gpg", "ssh"]

[identity]
allowed_signers = []      # names, emails or key ids

[jira]
projects = []
check_body = false        # look for "Refs: KEY-1" lines instead of the subject

[imperative]
base_forms_ed = []
base_forms_s = []
base_forms_ing = []
non_verbs = []

[spell]
locale = "US"             # US | UK
ignore_words = []

[spell.custom_words]
# teh = "the"

[repository]
reference_branch = "main"
max_commits_ahead = 20
skip_merge_commits = true
timeout_secs = 30         # limit for repository and signature checks; 0 disables

[output]
format = "text"           # text | json | github
verbose = false
color = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.subject.max_length, 72);
        assert_eq!(config.body.min_length, 10);
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: CklintConfig = toml::from_str(example).expect("Example config should parse");
        assert_eq!(config.conventional.types.len(), 11);
    }
}
