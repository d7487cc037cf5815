// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

/// Name of the hook file cklint manages.
pub const COMMIT_MSG_HOOK: &str = "commit-msg";

/// Marker line identifying scripts written by cklint.
pub const HOOK_MARKER: &str = "# Generated by cklint";

/// Generate the `commit-msg` hook script.
pub fn commit_msg_script() -> String {
    format!(
        r#"#!/bin/sh
{marker} v{version}
# Validates the commit message with cklint. Remove with 'cklint hooks uninstall'.

if ! command -v cklint >/dev/null 2>&1; then
    echo "cklint: not found in PATH, skipping commit message validation" >&2
    exit 0
fi

exec cklint validate --message-file "$1"
"#,
        marker = HOOK_MARKER,
        version = crate::version::VERSION,
    )
}

/// Whether a hook script was generated by cklint.
pub fn is_generated(content: &str) -> bool {
    content.lines().any(|line| line.starts_with(HOOK_MARKER))
}
