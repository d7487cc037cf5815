// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook manager for installing and removing the commit-msg hook.

use crate::error::{CklintError, HookError, Result};
use crate::git::Repository;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::templates::{commit_msg_script, is_generated, COMMIT_MSG_HOOK};

/// State of the commit-msg hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// The cklint hook is installed.
    Installed,
    /// Another tool's hook occupies the slot.
    Foreign,
    /// No hook is installed.
    Missing,
}

impl HookStatus {
    pub fn description(&self) -> &'static str {
        match self {
            HookStatus::Installed => "installed",
            HookStatus::Foreign => "foreign hook present",
            HookStatus::Missing => "not installed",
        }
    }
}

/// Manager for the commit-msg hook.
pub struct HookManager {
    hooks_dir: PathBuf,
}

impl HookManager {
    /// Create a new hook manager for the current repository.
    pub fn new() -> Result<Self> {
        let repo = Repository::open_current()?;
        Self::for_git_dir(repo.git_dir())
    }

    /// Create a hook manager for a `.git` directory.
    pub fn for_git_dir(git_dir: &Path) -> Result<Self> {
        let hooks_dir = git_dir.join("hooks");

        // Ensure hooks directory exists
        if !hooks_dir.exists() {
            fs::create_dir_all(&hooks_dir).map_err(|e| {
                CklintError::Hook(HookError::InstallFailed {
                    hook: COMMIT_MSG_HOOK.to_string(),
                    message: format!("Failed to create hooks directory: {}", e),
                })
            })?;
        }

        Ok(Self { hooks_dir })
    }

    fn hook_path(&self) -> PathBuf {
        self.hooks_dir.join(COMMIT_MSG_HOOK)
    }

    fn backup_path(&self) -> PathBuf {
        self.hooks_dir.join(format!("{}.backup", COMMIT_MSG_HOOK))
    }

    /// Install the hook; a foreign hook is backed up only with `force`.
    pub fn install(&self, force: bool) -> Result<PathBuf> {
        let hook_path = self.hook_path();
        let install_failed = |message: String| {
            CklintError::Hook(HookError::InstallFailed {
                hook: COMMIT_MSG_HOOK.to_string(),
                message,
            })
        };

        if self.status()? == HookStatus::Foreign {
            if !force {
                return Err(CklintError::Hook(HookError::AlreadyExists {
                    hook: COMMIT_MSG_HOOK.to_string(),
                }));
            }
            fs::rename(&hook_path, self.backup_path())
                .map_err(|e| install_failed(format!("Failed to backup existing hook: {}", e)))?;
            debug!("Backed up existing hook to {}", self.backup_path().display());
        }

        fs::write(&hook_path, commit_msg_script())
            .map_err(|e| install_failed(format!("Failed to write hook: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&hook_path)
                .map_err(|e| install_failed(format!("Failed to get permissions: {}", e)))?
                .permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&hook_path, perms)
                .map_err(|e| install_failed(format!("Failed to set permissions: {}", e)))?;
        }

        Ok(hook_path)
    }

    /// Remove the hook and restore any backup. Returns whether a hook was removed.
    pub fn uninstall(&self) -> Result<bool> {
        let hook_path = self.hook_path();
        match self.status()? {
            HookStatus::Missing => return Ok(false),
            HookStatus::Foreign => {
                return Err(CklintError::Hook(HookError::RemoveFailed {
                    hook: COMMIT_MSG_HOOK.to_string(),
                    message: "Hook was not installed by cklint".to_string(),
                }));
            }
            HookStatus::Installed => {}
        }

        fs::remove_file(&hook_path).map_err(|e| {
            CklintError::Hook(HookError::RemoveFailed {
                hook: COMMIT_MSG_HOOK.to_string(),
                message: format!("Failed to remove hook: {}", e),
            })
        })?;

        // Restore backup if exists
        let backup_path = self.backup_path();
        if backup_path.exists() {
            fs::rename(&backup_path, &hook_path)?;
            debug!("Restored previous hook from {}", backup_path.display());
        }

        Ok(true)
    }

    /// Get the status of the hook.
    pub fn status(&self) -> Result<HookStatus> {
        let hook_path = self.hook_path();
        if !hook_path.exists() {
            return Ok(HookStatus::Missing);
        }
        let content = fs::read_to_string(&hook_path)?;
        Ok(if is_generated(&content) {
            HookStatus::Installed
        } else {
            HookStatus::Foreign
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, HookManager) {
        let dir = TempDir::new().unwrap();
        let manager = HookManager::for_git_dir(dir.path()).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_install_and_uninstall() {
        let (dir, manager) = manager();
        assert_eq!(manager.status().unwrap(), HookStatus::Missing);

        let path = manager.install(false).unwrap();
        assert_eq!(path, dir.path().join("hooks").join("commit-msg"));
        assert_eq!(manager.status().unwrap(), HookStatus::Installed);

        // Reinstalling over our own hook is fine.
        manager.install(false).unwrap();

        assert!(manager.uninstall().unwrap());
        assert_eq!(manager.status().unwrap(), HookStatus::Missing);
        assert!(!manager.uninstall().unwrap());
    }

    #[test]
    fn test_foreign_hook_backed_up_and_restored() {
        let (dir, manager) = manager();
        let hook = dir.path().join("hooks").join("commit-msg");
        fs::write(&hook, "#!/bin/sh\nexit 0\n").unwrap();
        assert_eq!(manager.status().unwrap(), HookStatus::Foreign);

        assert!(matches!(
            manager.install(false),
            Err(CklintError::Hook(HookError::AlreadyExists { .. }))
        ));
        assert!(matches!(
            manager.uninstall(),
            Err(CklintError::Hook(HookError::RemoveFailed { .. }))
        ));

        manager.install(true).unwrap();
        assert_eq!(manager.status().unwrap(), HookStatus::Installed);

        manager.uninstall().unwrap();
        assert_eq!(fs::read_to_string(&hook).unwrap(), "#!/bin/sh\nexit 0\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_hook_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, manager) = manager();
        let path = manager.install(false).unwrap();
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
