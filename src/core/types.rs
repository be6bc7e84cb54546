//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ReleaseName`] - Validated distribution name, usable as a branch name
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Examples
//!
//! ```
//! use ros2_release_branches::core::types::ReleaseName;
//!
//! let release = ReleaseName::new("kappa").unwrap();
//! assert_eq!(release.tracks_branch(), "kappa/update-devel-branch");
//!
//! assert!(ReleaseName::new("has space").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid release name: {0}")]
    InvalidReleaseName(String),
}

/// A distribution name such as `jazzy`.
///
/// The name becomes a branch name on every source repository, so it must
/// conform to Git's refname rules (see `git check-ref-format`):
/// - Cannot be empty or exactly `@`
/// - Cannot start with `.` or `-`
/// - Cannot end with `.lock` or `/`
/// - Cannot contain `..`, `@{`, `//`, or ASCII control characters
/// - Cannot contain spaces, `~`, `^`, `:`, `\`, `?`, `*`, `[`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReleaseName(String);

impl ReleaseName {
    /// Create a new validated release name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidReleaseName` if the name is not a valid
    /// branch name.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let invalid = |msg: &str| Err(TypeError::InvalidReleaseName(format!("'{name}' {msg}")));

        if name.is_empty() {
            return Err(TypeError::InvalidReleaseName("name cannot be empty".into()));
        }
        if name == "@" {
            return invalid("is reserved");
        }
        if name.starts_with('.') || name.starts_with('-') {
            return invalid("cannot start with '.' or '-'");
        }
        if name.ends_with(".lock") || name.ends_with('/') {
            return invalid("cannot end with '.lock' or '/'");
        }
        for seq in ["..", "@{", "//"] {
            if name.contains(seq) {
                return invalid(&format!("cannot contain '{seq}'"));
            }
        }

        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return invalid(&format!("cannot contain '{c}'"));
        }
        if name.chars().any(|c| c.is_ascii_control()) {
            return invalid("cannot contain control characters");
        }
        if name
            .split('/')
            .any(|part| part.starts_with('.') || part.ends_with(".lock"))
        {
            return invalid("has a path component starting with '.' or ending with '.lock'");
        }

        Ok(())
    }

    /// Get the release name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Branch proposing the `devel_branch` change in a release repository.
    pub fn tracks_branch(&self) -> String {
        format!("{}/update-devel-branch", self.0)
    }

    /// Branch proposing the manifest change.
    pub fn manifest_branch(&self) -> String {
        format!("{}-initial-branches", self.0)
    }

    /// Branch proposing the distribution file change.
    pub fn distribution_branch(&self) -> String {
        format!("{}-update", self.0)
    }
}

impl TryFrom<String> for ReleaseName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ReleaseName> for String {
    fn from(name: ReleaseName) -> Self {
        name.0
    }
}

impl AsRef<str> for ReleaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReleaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An RFC3339 UTC timestamp.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// The current time.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Wrap an existing `DateTime`.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
