//! core::urls
//!
//! GitHub URL helpers.
//!
//! # Design
//!
//! Repositories are identified throughout the tool by their GitHub web URL
//! (`https://github.com/<owner>/<name>`). Two derived forms are needed:
//!
//! - the `owner/name` slug used by the REST API
//! - the raw-content URL used to download a single file at a given ref
//!
//! Both are pure string transforms. The hosts are carried by [`GitHubUrls`]
//! so tests can point the tool at local remotes and mock servers; the free
//! functions [`github_name_from_url`] and [`github_raw_from_url`] use the
//! public GitHub hosts.
//!
//! # Example
//!
//! ```
//! use ros2_release_branches::core::urls::{github_name_from_url, github_raw_from_url};
//!
//! assert_eq!(github_name_from_url("https://github.com/ros2/ros2.git").unwrap(), "ros2/ros2");
//! assert_eq!(
//!     github_raw_from_url("https://github.com/ros2/ros2", "/rolling/ros2.repos").unwrap(),
//!     "https://raw.githubusercontent.com/ros2/ros2/rolling/ros2.repos"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public GitHub web host.
pub const DEFAULT_WEB_BASE: &str = "https://github.com";

/// Public GitHub raw-content host.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Errors from URL conversion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UrlError {
    /// The URL does not live under the configured GitHub web host.
    #[error("URL must start with {prefix}: {url}")]
    NotGitHub {
        /// The offending URL
        url: String,
        /// The required prefix
        prefix: String,
    },

    /// The URL has the right host but no `owner/name` path.
    #[error("URL does not name a repository: {0}")]
    MissingRepository(String),
}

/// An `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Parse an `owner/name` string.
    pub fn parse(slug: &str) -> Result<Self, UrlError> {
        match slug.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(UrlError::MissingRepository(slug.to_string())),
        }
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl TryFrom<String> for RepoSlug {
    type Error = UrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RepoSlug> for String {
    fn from(slug: RepoSlug) -> Self {
        slug.to_string()
    }
}

/// Host configuration for URL conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubUrls {
    web_base: String,
    raw_base: String,
}

impl Default for GitHubUrls {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_BASE, DEFAULT_RAW_BASE)
    }
}

impl GitHubUrls {
    /// Create a converter for the given hosts.
    ///
    /// Trailing slashes are ignored.
    pub fn new(web_base: impl Into<String>, raw_base: impl Into<String>) -> Self {
        let web_base = web_base.into().trim_end_matches('/').to_string();
        let raw_base = raw_base.into().trim_end_matches('/').to_string();
        Self { web_base, raw_base }
    }

    /// The web host prefix (no trailing slash).
    pub fn web_base(&self) -> &str {
        &self.web_base
    }

    /// The raw-content host prefix (no trailing slash).
    pub fn raw_base(&self) -> &str {
        &self.raw_base
    }

    /// Convert a web URL to its `owner/name` string.
    ///
    /// A trailing `.git` is stripped.
    pub fn name_from_url(&self, url: &str) -> Result<String, UrlError> {
        let rest = self.strip_web_base(url)?;
        Ok(strip_git_suffix(rest).to_string())
    }

    /// Convert a web URL to a [`RepoSlug`].
    pub fn slug_from_url(&self, url: &str) -> Result<RepoSlug, UrlError> {
        let name = self.name_from_url(url)?;
        RepoSlug::parse(&name).map_err(|_| UrlError::MissingRepository(url.to_string()))
    }

    /// Rewrite a web URL to the raw-content host and append `path`.
    ///
    /// `path` is appended verbatim, so it should start with `/`.
    pub fn raw_from_url(&self, url: &str, path: &str) -> Result<String, UrlError> {
        let rest = self.strip_web_base(url)?;
        Ok(format!("{}/{}{}", self.raw_base, rest, path))
    }

    fn strip_web_base<'a>(&self, url: &'a str) -> Result<&'a str, UrlError> {
        url.strip_prefix(self.web_base.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| UrlError::NotGitHub {
                url: url.to_string(),
                prefix: format!("{}/", self.web_base),
            })
    }
}

/// Strip a single trailing `.git` from a URL or path.
pub fn strip_git_suffix(url: &str) -> &str {
    url.strip_suffix(".git").unwrap_or(url)
}

/// Convert `https://github.com/<owner>/<name>[.git]` to `<owner>/<name>`.
pub fn github_name_from_url(url: &str) -> Result<String, UrlError> {
    GitHubUrls::default().name_from_url(url)
}

/// Convert `https://github.com/<owner>/<name>` plus `path` to the
/// `raw.githubusercontent.com` URL of that file.
pub fn github_raw_from_url(url: &str, path: &str) -> Result<String, UrlError> {
    GitHubUrls::default().raw_from_url(url, path)
}
