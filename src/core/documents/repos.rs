//! core::documents::repos
//!
//! The repository manifest (`ros2.repos`, vcstool format).
//!
//! ```yaml
//! repositories:
//!   ros2/rclcpp:
//!     type: git
//!     url: https://github.com/ros2/rclcpp.git
//!     version: rolling
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{parse_yaml, render_yaml, DocumentError, Extra};

const DOCUMENT: &str = "repository manifest";

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// VCS type (always `git` in practice)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Repository web URL, possibly ending in `.git`
    pub url: String,
    /// Branch, tag or commit the manifest pins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The repository manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReposFile {
    /// Repositories keyed by short name (`owner/name`), in file order
    pub repositories: IndexMap<String, RepoEntry>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ReposFile {
    /// Parse manifest YAML.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        parse_yaml(DOCUMENT, text)
    }

    /// Render the manifest as YAML.
    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        render_yaml(DOCUMENT, self)
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&RepoEntry> {
        self.repositories.get(name)
    }

    /// Return a copy with `name` pinned to `version`.
    pub fn with_version(&self, name: &str, version: &str) -> Result<Self, DocumentError> {
        let mut next = self.clone();
        let entry = next
            .repositories
            .get_mut(name)
            .ok_or_else(|| DocumentError::UnknownRepository(name.to_string()))?;
        entry.version = Some(version.to_string());
        Ok(next)
    }
}
