// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use chrono::{DateTime, TimeZone, Utc};
use git2::{BranchType, Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::commit::Commit;
use crate::error::{CklintError, GitError, Result};
use crate::ports::{Cancellation, RepositoryError, RepositoryPort};

fn command_failed(command: &str, err: git2::Error) -> CklintError {
    CklintError::Git(GitError::CommandFailed {
        command: command.to_string(),
        message: err.message().to_string(),
    })
}

fn invalid_reference(reference: &str, err: git2::Error) -> CklintError {
    CklintError::Git(GitError::InvalidReference {
        reference: format!("{}: {}", reference, err.message()),
    })
}

/// Wrapper around git2::Repository that loads commits for validation.
pub struct Repository {
    inner: Git2Repo,
    workdir: PathBuf,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CklintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                CklintError::Git(GitError::NotARepository)
            } else {
                CklintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                CklintError::Git(GitError::OpenFailed {
                    message: "Repository has no working directory (bare repository)".to_string(),
                })
            })?
            .to_path_buf();

        debug!("Opened repository at {}", workdir.display());
        Ok(Self {
            inner: repo,
            workdir,
        })
    }

    /// Get the working directory path.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    fn resolve(&self, reference: &str) -> Result<git2::Commit<'_>> {
        self.inner
            .revparse_single(reference)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| invalid_reference(reference, e))
    }

    /// Build a [`Commit`] from a git2 commit.
    fn load(&self, commit: &git2::Commit<'_>) -> Commit {
        let oid = commit.id();
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let author = commit.author();
        let name = String::from_utf8_lossy(author.name_bytes()).into_owned();
        let email = String::from_utf8_lossy(author.email_bytes()).into_owned();

        let mut loaded = Commit::new(message)
            .with_hash(oid.to_string())
            .with_author(name, email)
            .with_signature(self.signature_of(oid))
            .with_merge(commit.parent_count() > 1);
        if let Some(date) = commit_date(commit) {
            loaded = loaded.with_date(date);
        }
        loaded
    }

    /// Raw signature blob of a commit; empty when unsigned.
    fn signature_of(&self, oid: Oid) -> String {
        match self.inner.extract_signature(&oid, None) {
            Ok((signature, _)) => String::from_utf8_lossy(&signature).into_owned(),
            Err(e) => {
                if e.code() != git2::ErrorCode::NotFound {
                    debug!("Failed to extract signature of {}: {}", oid, e.message());
                }
                String::new()
            }
        }
    }

    /// Load the commit a reference points at.
    pub fn commit(&self, reference: &str) -> Result<Commit> {
        let commit = self.resolve(reference)?;
        Ok(self.load(&commit))
    }

    /// Load the last `count` commits reachable from `reference`, newest first.
    pub fn recent_commits(&self, reference: &str, count: usize) -> Result<Vec<Commit>> {
        let tip = self.resolve(reference)?;
        let mut revwalk = self.inner.revwalk().map_err(|e| command_failed("revwalk", e))?;
        revwalk
            .push(tip.id())
            .map_err(|e| command_failed("revwalk.push", e))?;
        self.walk(revwalk, Some(count))
    }

    /// Load the commits in `from..to`, newest first.
    pub fn commits_in_range(&self, range: &str) -> Result<Vec<Commit>> {
        let Some((from, to)) = range.split_once("..") else {
            return Err(CklintError::Git(GitError::InvalidReference {
                reference: format!("{}: expected a range of the form A..B", range),
            }));
        };
        let to = if to.is_empty() { "HEAD" } else { to };

        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        let mut revwalk = self.inner.revwalk().map_err(|e| command_failed("revwalk", e))?;
        revwalk
            .push(to.id())
            .map_err(|e| command_failed("revwalk.push", e))?;
        revwalk
            .hide(from.id())
            .map_err(|e| command_failed("revwalk.hide", e))?;
        self.walk(revwalk, None)
    }

    /// Load the commits on HEAD that are not on `base`.
    pub fn commits_since(&self, base: &str) -> Result<Vec<Commit>> {
        let base = self.resolve_branch(base).ok_or_else(|| {
            CklintError::Git(GitError::InvalidReference {
                reference: base.to_string(),
            })
        })?;
        self.commits_in_range(&format!("{}..HEAD", base))
    }

    fn walk(&self, revwalk: git2::Revwalk<'_>, limit: Option<usize>) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        for oid_result in revwalk {
            if limit.is_some_and(|limit| commits.len() >= limit) {
                break;
            }
            let oid = oid_result.map_err(|e| command_failed("revwalk", e))?;
            let commit = self
                .inner
                .find_commit(oid)
                .map_err(|e| invalid_reference(&oid.to_string(), e))?;
            commits.push(self.load(&commit));
        }
        debug!("Loaded {} commits", commits.len());
        Ok(commits)
    }

    /// Resolve a branch name to a rev-parseable spec, trying local then `origin/`.
    fn resolve_branch(&self, branch: &str) -> Option<String> {
        if self.inner.find_branch(branch, BranchType::Local).is_ok() {
            return Some(branch.to_string());
        }
        let remote = format!("origin/{}", branch);
        if self.inner.find_branch(&remote, BranchType::Remote).is_ok() {
            return Some(remote);
        }
        None
    }
}

fn commit_date(commit: &git2::Commit<'_>) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(commit.time().seconds(), 0).single()
}

impl RepositoryPort for Repository {
    fn commits_ahead_count(
        &self,
        cancel: &Cancellation,
        reference: &str,
    ) -> std::result::Result<usize, RepositoryError> {
        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        let Some(spec) = self.resolve_branch(reference) else {
            return Err(RepositoryError::ReferenceNotFound {
                reference: reference.to_string(),
            });
        };
        let other = |e: git2::Error| RepositoryError::Other {
            message: e.message().to_string(),
        };

        let base = self
            .inner
            .revparse_single(&spec)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(other)?;
        let head = self
            .inner
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(other)?;

        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }
        let (ahead, _behind) = self
            .inner
            .graph_ahead_behind(head.id(), base.id())
            .map_err(other)?;
        debug!("HEAD is {} commits ahead of {}", ahead, spec);
        Ok(ahead)
    }
}
