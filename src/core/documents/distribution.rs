//! core::documents::distribution
//!
//! The distribution descriptor (REP 143 `distribution.yaml`).
//!
//! ```yaml
//! repositories:
//!   rclcpp:
//!     doc: {type: git, url: https://github.com/ros2/rclcpp.git, version: rolling}
//!     release: {url: https://github.com/ros2-gbp/rclcpp-release.git, version: 28.1.0-1}
//!     source: {type: git, url: https://github.com/ros2/rclcpp.git, version: rolling}
//!     status: maintained
//! type: distribution
//! version: 2
//! ```
//!
//! When written back to rosdistro the body is preceded by [`HEADER`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{parse_yaml, render_yaml, DocumentError, Extra};

const DOCUMENT: &str = "distribution file";

/// Fixed preamble of every rosdistro distribution file, ending with the
/// document start marker.
pub const HEADER: &str = "%YAML 1.1\n# ROS distribution file\n# see REP 143: http://ros.org/reps/rep-0143.html\n---\n";

/// A `doc` or `source` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A `release` entry; only the URL of the release-metadata repository is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One package in the distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionRepository {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<SourceEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceEntry>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DistributionRepository {
    /// URL of the release-metadata repository, if any.
    pub fn release_url(&self) -> Option<&str> {
        self.release.as_ref().and_then(|r| r.url.as_deref())
    }
}

/// The distribution descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionFile {
    /// Packages keyed by name, in file order
    pub repositories: IndexMap<String, DistributionRepository>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DistributionFile {
    /// Parse distribution YAML. A leading header is accepted.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        parse_yaml(DOCUMENT, text)
    }

    /// Render the document body as YAML, without the header.
    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        render_yaml(DOCUMENT, self)
    }

    /// Render the file as committed to rosdistro: [`HEADER`] then the body.
    pub fn render(&self) -> Result<String, DocumentError> {
        Ok(format!("{}{}", HEADER, self.to_yaml()?))
    }

    /// Look up a package by name.
    pub fn get(&self, package: &str) -> Option<&DistributionRepository> {
        self.repositories.get(package)
    }

    /// Return a copy where the `doc` and `source` versions of `package`
    /// (whichever exist) equal `version`.
    ///
    /// A package with neither entry is returned unchanged.
    pub fn with_release_version(&self, package: &str, version: &str) -> Result<Self, DocumentError> {
        let mut next = self.clone();
        let repo = next
            .repositories
            .get_mut(package)
            .ok_or_else(|| DocumentError::UnknownPackage(package.to_string()))?;
        for entry in [repo.doc.as_mut(), repo.source.as_mut()].into_iter().flatten() {
            entry.version = Some(version.to_string());
        }
        Ok(next)
    }
}
