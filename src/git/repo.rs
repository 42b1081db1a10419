//! git2-backed repository operations for the website working tree
//!
//! The workflow only needs a handful of operations: detect uncommitted
//! changes, stage-and-commit everything, make sure a remote exists, and
//! push. They are behind the `SiteRepo` trait so tests can drive the
//! workflow with a recording fake instead of a live repository.

use crate::error::{Error, GitError, Result};
use git2::{
    Cred, CredentialType, IndexAddOption, PushOptions, RemoteCallbacks, Repository,
    RepositoryInitOptions, Signature, StatusOptions,
};
use std::path::Path;

/// Version-control operations the sync workflow depends on.
pub trait SiteRepo {
    /// Any staged or unstaged modification, including untracked files.
    fn has_uncommitted_changes(&mut self) -> Result<bool>;

    /// One line per changed path, for showing the operator before the
    /// commit-first gate.
    fn status_summary(&mut self) -> Result<Vec<String>>;

    /// Stage every change (adds, modifications, deletions) and commit.
    fn commit_all(&mut self, message: &str) -> Result<()>;

    /// Make sure the named remote exists, creating it with `url` if
    /// entirely absent. Returns true when the remote was bootstrapped.
    fn ensure_remote(&mut self, name: &str, url: &str) -> Result<bool>;

    /// Push the branch to the named remote.
    fn push(&mut self, remote: &str, branch: &str) -> Result<()>;
}

/// Live implementation over a git2 [`Repository`].
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open an existing repository at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|e| {
            Error::Git(GitError::OpenFailed {
                path: path.to_path_buf(),
                source: e.message().to_string(),
            })
        })?;
        Ok(Self { repo })
    }

    /// Open `path`, initializing a fresh repository with the given initial
    /// branch when it is not one yet. The bootstrap path for a website
    /// directory that has never been published.
    pub fn open_or_init(path: &Path, branch: &str) -> Result<Self> {
        if let Ok(repo) = Repository::open(path) {
            return Ok(Self { repo });
        }
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(&format!("refs/heads/{}", branch));
        let repo = Repository::init_opts(path, &opts).map_err(|e| {
            Error::Git(GitError::OpenFailed {
                path: path.to_path_buf(),
                source: e.message().to_string(),
            })
        })?;
        Ok(Self { repo })
    }

    fn signature(&self) -> Result<Signature<'static>> {
        // Fall back to a tool identity when user.name/user.email are unset
        self.repo
            .signature()
            .or_else(|_| Signature::now("bbsync", "bbsync@bbmap.org"))
            .map_err(|e| op_failed("signature", &e))
    }

    fn changed_paths(&mut self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .exclude_submodules(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| op_failed("status", &e))?;

        let mut paths = Vec::new();
        for entry in statuses.iter() {
            let status = entry.status();
            if status.is_ignored() {
                continue;
            }
            let label = if status.is_wt_new() || status.is_index_new() {
                "new"
            } else if status.is_wt_deleted() || status.is_index_deleted() {
                "deleted"
            } else {
                "modified"
            };
            paths.push(format!("{:>9}  {}", label, entry.path().unwrap_or("?")));
        }
        Ok(paths)
    }
}

impl SiteRepo for GitRepo {
    fn has_uncommitted_changes(&mut self) -> Result<bool> {
        Ok(!self.changed_paths()?.is_empty())
    }

    fn status_summary(&mut self) -> Result<Vec<String>> {
        self.changed_paths()
    }

    fn commit_all(&mut self, message: &str) -> Result<()> {
        let mut index = self.repo.index().map_err(|e| op_failed("index", &e))?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .map_err(|e| op_failed("stage", &e))?;
        // add_all does not record deletions
        index
            .update_all(["*"].iter(), None)
            .map_err(|e| op_failed("stage", &e))?;
        index.write().map_err(|e| op_failed("stage", &e))?;

        let tree_id = index.write_tree().map_err(|e| op_failed("write-tree", &e))?;
        let tree = self
            .repo
            .find_tree(tree_id)
            .map_err(|e| op_failed("write-tree", &e))?;

        let signature = self.signature()?;
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| op_failed("commit", &e))?;
        Ok(())
    }

    fn ensure_remote(&mut self, name: &str, url: &str) -> Result<bool> {
        if self.repo.find_remote(name).is_ok() {
            return Ok(false);
        }
        self.repo
            .remote(name, url)
            .map_err(|e| op_failed("remote-add", &e))?;
        Ok(true)
    }

    fn push(&mut self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| op_failed("remote-lookup", &e))?;

        let git_config = self
            .repo
            .config()
            .map_err(|e| op_failed("config", &e))?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            if allowed_types.contains(CredentialType::SSH_KEY) {
                Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
            } else if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                Cred::credential_helper(&git_config, url, username_from_url)
            } else {
                Cred::default()
            }
        });

        let mut opts = PushOptions::new();
        opts.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        remote
            .push(&[refspec.as_str()], Some(&mut opts))
            .map_err(|e| Error::Git(GitError::PushRejected(e.message().to_string())))
    }
}

fn op_failed(operation: &str, e: &git2::Error) -> Error {
    Error::Git(GitError::OperationFailed {
        operation: operation.to_string(),
        source: e.message().to_string(),
    })
}
