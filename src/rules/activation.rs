// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule activation.
//!
//! Priority, highest first: explicit enable, explicit disable, default set.

/// Rules that only run when explicitly enabled.
pub const DEFAULT_DISABLED: &[&str] = &["jirareference", "commitbody", "spell"];

/// Normalize a rule name: trimmed, quotes stripped, lowercased.
pub fn clean_name(name: &str) -> String {
    name.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim()
        .to_lowercase()
}

/// Decide whether `rule_name` runs given the configured lists.
///
/// A rule listed in both `enabled` and `disabled` is active.
pub fn is_active<S: AsRef<str>>(rule_name: &str, enabled: &[S], disabled: &[S]) -> bool {
    let name = clean_name(rule_name);
    let listed = |list: &[S]| list.iter().any(|entry| clean_name(entry.as_ref()) == name);

    if listed(enabled) {
        return true;
    }
    if listed(disabled) {
        return false;
    }
    !DEFAULT_DISABLED.contains(&name.as_str())
}
