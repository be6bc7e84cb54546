//! core::config::schema
//!
//! Configuration schema types.
//!
//! Every field has a default matching the upstream ROS 2 infrastructure, so
//! an empty (or absent) config file describes a real run.
//!
//! # Example
//!
//! ```toml
//! [manifest]
//! repo_url = "https://github.com/my-fork/ros2"
//!
//! [rosdistro]
//! repo_url = "https://github.com/my-fork/rosdistro"
//!
//! [release]
//! skip = ["ros/urdfdom"]
//!
//! [commit]
//! name = "Release Bot"
//! email = "release-bot@example.com"
//! ```

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::urls::{GitHubUrls, DEFAULT_RAW_BASE, DEFAULT_WEB_BASE};

/// Repositories that are never branched: vendored or third-party code not
/// owned by the ROS 2 project.
pub const DEFAULT_SKIP_LIST: &[&str] = &[
    "eProsima/Fast-CDR",
    "eProsima/Fast-DDS",
    "eProsima/foonathan_memory_vendor",
    "eclipse-cyclonedds/cyclonedds",
    "eclipse-iceoryx/iceoryx",
    "osrf/osrf_pycommon",
    "ros/urdfdom",
    "ros/urdfdom_headers",
];

/// Complete configuration for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hosting service endpoints
    pub github: GitHubConfig,
    /// Where the repository manifest lives
    pub manifest: ManifestConfig,
    /// Where the distribution descriptor lives
    pub rosdistro: RosdistroConfig,
    /// Branching policy
    pub release: ReleaseConfig,
    /// Keychain coordinates of the API token
    pub credentials: CredentialsConfig,
    /// Identity used for commits in scratch clones
    pub commit: Option<CommitIdentity>,
}

impl Config {
    /// URL converter for the configured hosts.
    pub fn urls(&self) -> GitHubUrls {
        GitHubUrls::new(&self.github.web_base, &self.github.raw_base)
    }

    /// Check whether a manifest repository is on the skip-list.
    pub fn is_skipped(&self, repo: &str) -> bool {
        self.release.skip.iter().any(|s| s == repo)
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = self.urls();
        for (key, url) in [
            ("manifest.repo_url", &self.manifest.repo_url),
            ("rosdistro.repo_url", &self.rosdistro.repo_url),
        ] {
            if urls.slug_from_url(url).is_err() {
                return Err(ConfigError::InvalidValue(format!(
                    "{} '{}' must be a repository under {}",
                    key,
                    url,
                    urls.web_base()
                )));
            }
        }

        for (key, value) in [
            ("manifest.branch", &self.manifest.branch),
            ("manifest.file", &self.manifest.file),
            ("rosdistro.branch", &self.rosdistro.branch),
            ("release.source_baseline", &self.release.source_baseline),
            ("release.tracks_baseline", &self.release.tracks_baseline),
            ("release.tracks_file", &self.release.tracks_file),
            ("credentials.service", &self.credentials.service),
            ("credentials.account", &self.credentials.account),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue(format!("{} must not be empty", key)));
            }
        }

        if let Some(identity) = &self.commit {
            if identity.name.trim().is_empty() || identity.email.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "commit.name and commit.email must not be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Hosting service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GitHubConfig {
    /// Web host; every repository URL must live under it
    pub web_base: String,
    /// Raw-content host used for document downloads
    pub raw_base: String,
    /// REST API base (GitHub Enterprise: `https://host/api/v3`)
    pub api_base: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            web_base: DEFAULT_WEB_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }
}

/// Repository manifest location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    pub repo_url: String,
    /// Branch the manifest is read from and the release branch is cut from
    pub branch: String,
    /// Manifest path inside the repository
    pub file: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/ros2/ros2".to_string(),
            branch: "rolling".to_string(),
            file: "ros2.repos".to_string(),
        }
    }
}

/// Distribution descriptor location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RosdistroConfig {
    pub repo_url: String,
    /// Branch the descriptor is read from and PRs target
    pub branch: String,
}

impl Default for RosdistroConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/ros/rosdistro".to_string(),
            branch: "master".to_string(),
        }
    }
}

/// Branching policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Branch new source branches are cut from
    pub source_baseline: String,
    /// Default branch of release-metadata repositories
    pub tracks_baseline: String,
    /// Track file path inside release-metadata repositories
    pub tracks_file: String,
    /// Manifest names never branched
    pub skip: Vec<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            source_baseline: "rolling".to_string(),
            tracks_baseline: "master".to_string(),
            tracks_file: "tracks.yaml".to_string(),
            skip: DEFAULT_SKIP_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Keychain coordinates of the API token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialsConfig {
    pub service: String,
    pub account: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            service: "github-api-token".to_string(),
            account: "may-open-prs".to_string(),
        }
    }
}

/// Commit author/committer for scratch clones.
///
/// When absent, the user's git configuration is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}
