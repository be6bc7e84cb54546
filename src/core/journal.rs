//! core::journal
//!
//! Record of the remote side effects a run has completed.
//!
//! Nothing a run does remotely is rolled back automatically: if a later step
//! fails, branches already pushed and pull requests already opened stay in
//! place. The journal lists them, in order, so they can be cleaned up by
//! hand or skipped when the run is repeated.
//!
//! # Storage
//!
//! The journal lives in memory. [`Journal::write`] saves it as JSON (the CLI
//! does this for `--journal <path>`, on success and on failure alike).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{ReleaseName, UtcTimestamp};
use super::urls::RepoSlug;

/// Errors from journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// I/O error writing the journal file.
    #[error("journal i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("journal json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A completed remote side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// A new branch was pushed.
    BranchPushed { repo: RepoSlug, branch: String },
    /// The branch already existed on the remote and was left alone.
    BranchSkipped { repo: RepoSlug, branch: String },
    /// A pull request was opened.
    PullRequestOpened {
        repo: RepoSlug,
        number: u64,
        url: String,
    },
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::BranchPushed { repo, branch } => write!(f, "pushed branch {branch} to {repo}"),
            Effect::BranchSkipped { repo, branch } => {
                write!(f, "branch {branch} already existed on {repo}")
            }
            Effect::PullRequestOpened { repo, number, url } => {
                write!(f, "opened {repo}#{number} ({url})")
            }
        }
    }
}

/// A timestamped effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub at: UtcTimestamp,
    #[serde(flatten)]
    pub effect: Effect,
}

/// Ordered log of completed effects for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub release: ReleaseName,
    pub started_at: UtcTimestamp,
    pub entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new(release: ReleaseName) -> Self {
        Self {
            release,
            started_at: UtcTimestamp::now(),
            entries: Vec::new(),
        }
    }

    /// Append an effect stamped with the current time.
    pub fn record(&mut self, effect: Effect) {
        self.entries.push(JournalEntry {
            at: UtcTimestamp::now(),
            effect,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Effects in the order they happened.
    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.entries.iter().map(|e| &e.effect)
    }

    /// Branches this run pushed (not the ones it found already present).
    pub fn pushed_branches(&self) -> Vec<(&RepoSlug, &str)> {
        self.effects()
            .filter_map(|e| match e {
                Effect::BranchPushed { repo, branch } => Some((repo, branch.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Pull requests this run opened, as web URLs.
    pub fn pull_requests(&self) -> Vec<&str> {
        self.effects()
            .filter_map(|e| match e {
                Effect::PullRequestOpened { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Write the journal as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<(), JournalError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a journal written by [`Journal::write`].
    pub fn read(path: &Path) -> Result<Self, JournalError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
