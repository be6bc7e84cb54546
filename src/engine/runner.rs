//! engine::runner
//!
//! The single entry point for a release run.
//!
//! # Architecture
//!
//! ```text
//! prepare:  Fetch -> Cross-reference -> Plan
//! execute:  per repository: branch, mark manifest, mark distribution, tracks PR
//!           -> manifest PR -> distribution PR
//! ```
//!
//! [`prepare`] has no side effects and needs no credentials, so `--dry-run`
//! stops after it. Everything [`Runner::execute`] does is recorded in the
//! runner's [`Journal`], which stays available when the run fails part way.
//!
//! # Example
//!
//! ```ignore
//! use ros2_release_branches::engine::{prepare, Runner};
//!
//! let prepared = prepare(&config, &release).await?;
//! let mut runner = Runner::new(&config, release, &forge);
//! let result = runner.execute(prepared).await;
//! let journal = runner.into_journal();
//! ```

use anyhow::{Context as _, Result};
use tracing::{info, warn};

use super::steps;
use crate::core::config::Config;
use crate::core::documents::{DistributionFile, ReposFile};
use crate::core::journal::Journal;
use crate::core::plan::ReleasePlan;
use crate::core::types::ReleaseName;
use crate::core::xref::CrossReference;
use crate::fetch::Fetcher;
use crate::forge::Forge;

/// The downloaded documents and the plan computed from them.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub plan: ReleasePlan,
    pub repos: ReposFile,
    pub distribution: DistributionFile,
}

/// Download both documents and compute the release plan.
///
/// # Errors
///
/// Download failures, and planning failures such as a manifest repository
/// with no distribution package.
pub async fn prepare(config: &Config, release: &ReleaseName) -> Result<Prepared> {
    let fetcher = Fetcher::new(config);
    let repos = fetcher
        .download_manifest()
        .await
        .context("failed to download the repository manifest")?;
    let distribution = fetcher
        .download_distribution(release)
        .await
        .with_context(|| format!("failed to download the {} distribution", release))?;

    let xref = CrossReference::build(&repos, &distribution);
    let plan = ReleasePlan::build(release.clone(), &repos, &xref, config)?;
    info!(
        "Planned {} repositories for {} ({} on the skip-list)",
        plan.repos.len(),
        release,
        plan.skipped.len()
    );

    Ok(Prepared {
        plan,
        repos,
        distribution,
    })
}

/// Executes a prepared release.
pub struct Runner<'a> {
    config: &'a Config,
    release: ReleaseName,
    forge: &'a dyn Forge,
    journal: Journal,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a Config, release: ReleaseName, forge: &'a dyn Forge) -> Self {
        let journal = Journal::new(release.clone());
        Self {
            config,
            release,
            forge,
            journal,
        }
    }

    /// Side effects completed so far.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn into_journal(self) -> Journal {
        self.journal
    }

    /// Prepare and execute in one go.
    pub async fn run(&mut self) -> Result<ReleasePlan> {
        let prepared = prepare(self.config, &self.release).await?;
        let plan = prepared.plan.clone();
        self.execute(prepared).await?;
        Ok(plan)
    }

    /// Perform every side effect of the plan, in order.
    ///
    /// Stops at the first error; the journal lists what was already done.
    pub async fn execute(&mut self, prepared: Prepared) -> Result<()> {
        let Prepared {
            plan,
            mut repos,
            mut distribution,
        } = prepared;

        for name in &plan.skipped {
            info!("Skipping {}", name);
        }

        let version = self.release.as_str();
        for entry in &plan.repos {
            steps::create_source_branch(self.config, &entry.url, &self.release, &mut self.journal)?;
            repos = repos.with_version(&entry.name, version)?;
            distribution = distribution.with_release_version(&entry.package, version)?;

            match &entry.release_url {
                Some(release_url) => {
                    steps::update_tracks(
                        self.config,
                        &self.release,
                        release_url,
                        self.forge,
                        &mut self.journal,
                    )
                    .await?;
                }
                None => warn!(
                    "Package {} has no release repository, not updating {}",
                    entry.package, self.config.release.tracks_file
                ),
            }
        }

        steps::publish_manifest(
            self.config,
            &self.release,
            &repos,
            self.forge,
            &mut self.journal,
        )
        .await?;
        steps::publish_distribution(
            self.config,
            &self.release,
            &distribution,
            self.forge,
            &mut self.journal,
        )
        .await?;

        Ok(())
    }
}
