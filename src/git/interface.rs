//! git::interface
//!
//! Scratch clones of remote repositories.
//!
//! # Architecture
//!
//! A [`Workspace`] is a clone of one remote repository in a temporary
//! directory. The directory is removed when the workspace is dropped, on
//! success and failure alike.
//!
//! Network operations (clone, push) run the `git` CLI so they pick up the
//! user's credential helpers and SSH configuration. Everything local
//! (branches, checkout, index, commits) goes through `git2`.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::CommandFailed`]: the `git` CLI exited unsuccessfully
//! - [`GitError::BranchNotFound`]: neither a local nor a remote branch exists
//! - [`GitError::BranchExists`]: refusing to overwrite a local branch
//! - [`GitError::MissingIdentity`]: no author configured for commits
//!
//! # Example
//!
//! ```ignore
//! use ros2_release_branches::git::Workspace;
//!
//! let ws = Workspace::clone("https://github.com/ros2/rclcpp", None)?;
//! ws.checkout("rolling")?;
//! ws.create_and_checkout("kappa")?;
//! ws.push_current()?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::build::CheckoutBuilder;
use git2::{BranchType, ErrorCode, IndexAddOption, Repository, Signature};
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

use crate::core::config::CommitIdentity;

/// Name of the remote created by `git clone`.
pub const REMOTE: &str = "origin";

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` CLI failed.
    #[error("{command} failed: {stderr}")]
    CommandFailed {
        /// The command line, without credentials
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// The `git` CLI could not be started.
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// The branch exists neither locally nor on the remote.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },

    /// A local branch with this name already exists.
    #[error("branch already exists: {branch}")]
    BranchExists { branch: String },

    /// HEAD does not point at a branch.
    #[error("HEAD is detached")]
    DetachedHead,

    /// No commit identity in config or git configuration.
    #[error("no commit identity: set user.name/user.email in git config or [commit] in the config file")]
    MissingIdentity,

    /// Reading or writing a file in the working tree failed.
    #[error("file access error for {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal { message: String },
}

impl GitError {
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            ErrorCode::NotFound => GitError::BranchNotFound {
                branch: context.to_string(),
            },
            ErrorCode::Exists => GitError::BranchExists {
                branch: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// A scratch clone in a temporary directory.
pub struct Workspace {
    // Declared before `dir` so the handle is closed before the directory
    // is removed.
    repo: Repository,
    dir: TempDir,
    url: String,
    identity: Option<CommitIdentity>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("url", &self.url)
            .field("path", &self.dir.path())
            .finish()
    }
}

impl Workspace {
    /// Clone `url` into a new temporary directory.
    ///
    /// `identity` overrides the git configuration for commits made in this
    /// workspace.
    pub fn clone(url: &str, identity: Option<&CommitIdentity>) -> Result<Self, GitError> {
        let dir = TempDir::new().map_err(|e| GitError::File {
            path: std::env::temp_dir(),
            source: e,
        })?;

        debug!("Cloning {} into {}", url, dir.path().display());
        let target = dir.path().to_string_lossy().into_owned();
        run_git(None, &["clone", "--quiet", url, &target])?;

        let repo = Repository::open(dir.path())?;
        Ok(Self {
            repo,
            dir,
            url: url.to_string(),
            identity: identity.cloned(),
        })
    }

    /// Root of the working tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The URL this workspace was cloned from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Name of the checked-out branch.
    pub fn current_branch(&self) -> Result<String, GitError> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(GitError::DetachedHead);
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or(GitError::DetachedHead)
    }

    /// Check whether the remote has a branch named `branch`.
    ///
    /// Reflects the remote as of the clone.
    pub fn remote_branch_exists(&self, branch: &str) -> bool {
        self.repo
            .find_branch(&format!("{}/{}", REMOTE, branch), BranchType::Remote)
            .is_ok()
    }

    /// Check out `branch`, creating a local tracking branch from the remote
    /// one if needed.
    pub fn checkout(&self, branch: &str) -> Result<(), GitError> {
        let local = match self.repo.find_branch(branch, BranchType::Local) {
            Ok(local) => local,
            Err(e) if e.code() == ErrorCode::NotFound => {
                let upstream = format!("{}/{}", REMOTE, branch);
                let remote = self
                    .repo
                    .find_branch(&upstream, BranchType::Remote)
                    .map_err(|e| GitError::from_git2(e, branch))?;
                let commit = remote.get().peel_to_commit()?;
                let mut local = self
                    .repo
                    .branch(branch, &commit, false)
                    .map_err(|e| GitError::from_git2(e, branch))?;
                local.set_upstream(Some(&upstream))?;
                local
            }
            Err(e) => return Err(GitError::from_git2(e, branch)),
        };

        let refname = local
            .get()
            .name()
            .ok_or_else(|| GitError::Internal {
                message: format!("branch name is not UTF-8: {}", branch),
            })?
            .to_string();
        self.switch_to(&refname)
    }

    /// Create `branch` at HEAD without switching to it.
    pub fn create_branch(&self, branch: &str) -> Result<(), GitError> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .branch(branch, &head, false)
            .map_err(|e| GitError::from_git2(e, branch))?;
        Ok(())
    }

    /// Create `branch` at HEAD and check it out.
    pub fn create_and_checkout(&self, branch: &str) -> Result<(), GitError> {
        self.create_branch(branch)?;
        self.switch_to(&format!("refs/heads/{}", branch))
    }

    /// Read a file relative to the working tree root.
    pub fn read_file(&self, relative: &str) -> Result<String, GitError> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).map_err(|source| GitError::File { path, source })
    }

    /// Write a file relative to the working tree root, creating parent
    /// directories.
    pub fn write_file(&self, relative: &str, contents: &str) -> Result<(), GitError> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GitError::File {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, contents).map_err(|source| GitError::File { path, source })
    }

    /// Stage every change in the working tree and commit it on HEAD.
    ///
    /// Returns the new commit id.
    pub fn commit_all(&self, message: &str) -> Result<String, GitError> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let parent = self.repo.head()?.peel_to_commit()?;
        let signature = self.signature()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        debug!("Committed {} in {}", oid, self.url);
        Ok(oid.to_string())
    }

    /// Push the current branch and set its upstream.
    pub fn push_current(&self) -> Result<(), GitError> {
        let branch = self.current_branch()?;
        run_git(
            Some(self.path()),
            &["push", "--quiet", "--set-upstream", REMOTE, &branch],
        )
    }

    fn switch_to(&self, refname: &str) -> Result<(), GitError> {
        let target = self.repo.revparse_single(refname)?;
        self.repo
            .checkout_tree(&target, Some(CheckoutBuilder::new().force()))?;
        self.repo.set_head(refname)?;
        Ok(())
    }

    fn signature(&self) -> Result<Signature<'static>, GitError> {
        match &self.identity {
            Some(identity) => Ok(Signature::now(&identity.name, &identity.email)?),
            None => self.repo.signature().map_err(|_| GitError::MissingIdentity),
        }
    }
}

/// Run the `git` CLI, optionally inside `cwd`.
fn run_git(cwd: Option<&Path>, args: &[&str]) -> Result<(), GitError> {
    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().map_err(GitError::Spawn)?;
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: format!("git {}", args.first().copied().unwrap_or_default()),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
