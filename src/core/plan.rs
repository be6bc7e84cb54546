//! core::plan
//!
//! The release plan: which manifest repositories get branched, and where
//! each one's distribution and release metadata lives.
//!
//! # Design
//!
//! The plan is computed from the two downloaded documents before any side
//! effect happens. Every cross-reference lookup is resolved here, so a
//! manifest entry with no matching distribution package aborts the run
//! before a single branch is pushed rather than leaving orphaned branches
//! behind. Every URL the run will clone is checked against the web host
//! here too.

use thiserror::Error;

use super::config::Config;
use super::documents::ReposFile;
use super::types::ReleaseName;
use super::xref::CrossReference;

/// Errors from planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// A manifest repository has no package in the distribution.
    #[error("repository '{repo}' ({url}) has no matching package in the distribution")]
    MissingCrossReference {
        /// Manifest name
        repo: String,
        /// Manifest URL
        url: String,
    },

    /// A repository URL is not under the configured web host.
    #[error("repository '{repo}' has URL {url} outside {host}")]
    ForeignUrl {
        /// Manifest name
        repo: String,
        /// Offending URL (source or release repository)
        url: String,
        /// Configured web host
        host: String,
    },
}

/// One repository to branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRepo {
    /// Manifest name (`owner/name`)
    pub name: String,
    /// Source repository URL from the manifest
    pub url: String,
    /// Matching distribution package
    pub package: String,
    /// Release-metadata repository, if the package is released
    pub release_url: Option<String>,
}

/// Everything the run will touch, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub release: ReleaseName,
    /// Repositories to branch, in manifest order
    pub repos: Vec<PlannedRepo>,
    /// Manifest names excluded by the skip-list
    pub skipped: Vec<String>,
}

impl ReleasePlan {
    /// Build the plan.
    ///
    /// # Errors
    ///
    /// [`PlanError::MissingCrossReference`] for the first non-skipped
    /// manifest entry without a distribution package.
    pub fn build(
        release: ReleaseName,
        repos: &ReposFile,
        xref: &CrossReference,
        config: &Config,
    ) -> Result<Self, PlanError> {
        let urls = config.urls();
        let mut planned = Vec::new();
        let mut skipped = Vec::new();

        for (name, entry) in &repos.repositories {
            if config.is_skipped(name) {
                skipped.push(name.clone());
                continue;
            }

            let found = xref
                .get(name)
                .ok_or_else(|| PlanError::MissingCrossReference {
                    repo: name.clone(),
                    url: entry.url.clone(),
                })?;

            let release_url = found.release_url.as_deref();
            for url in std::iter::once(entry.url.as_str()).chain(release_url) {
                if urls.slug_from_url(url).is_err() {
                    return Err(PlanError::ForeignUrl {
                        repo: name.clone(),
                        url: url.to_string(),
                        host: urls.web_base().to_string(),
                    });
                }
            }

            planned.push(PlannedRepo {
                name: name.clone(),
                url: entry.url.clone(),
                package: found.package.clone(),
                release_url: found.release_url.clone(),
            });
        }

        Ok(Self {
            release,
            repos: planned,
            skipped,
        })
    }

    /// Render a human-readable summary for `--dry-run`.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "Release '{}': {} repositories to branch, {} skipped\n",
            self.release,
            self.repos.len(),
            self.skipped.len()
        );
        for repo in &self.repos {
            let release = repo.release_url.as_deref().unwrap_or("(no release repository)");
            out.push_str(&format!(
                "  {} -> package {} -> {}\n",
                repo.name, repo.package, release
            ));
        }
        for name in &self.skipped {
            out.push_str(&format!("  {} (skip-list)\n", name));
        }
        out
    }
}
