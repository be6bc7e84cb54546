//! engine::steps
//!
//! The remote side effects of a run, one function per step.
//!
//! Every step clones what it needs into a fresh [`Workspace`], records each
//! completed push and pull request in the [`Journal`], and returns as soon
//! as anything fails. Steps never retry.

use anyhow::{Context as _, Result};
use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::documents::{DistributionFile, ReposFile, TracksFile};
use crate::core::journal::{Effect, Journal};
use crate::core::types::ReleaseName;
use crate::core::urls::RepoSlug;
use crate::forge::{CreatePrRequest, Forge, PullRequest};
use crate::git::Workspace;

/// What happened to a release branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    /// The branch was created and pushed.
    Created,
    /// The remote already had the branch; nothing was pushed.
    AlreadyExists,
}

/// Cut the release branch on a source repository.
///
/// Clones `url`, checks out the source baseline and pushes a branch named
/// after the release. If the remote already has that branch it is left
/// untouched.
pub fn create_source_branch(
    config: &Config,
    url: &str,
    release: &ReleaseName,
    journal: &mut Journal,
) -> Result<BranchOutcome> {
    let slug = config.urls().slug_from_url(url)?;
    let baseline = &config.release.source_baseline;
    info!(
        "Creating source branch {} from \"{}\" on {}",
        release, baseline, url
    );

    let workspace = clone(config, url)?;
    cut_release_branch(&workspace, &slug, baseline, release, journal)
}

/// Point the release track of a release-metadata repository at the new
/// branch and open a pull request for it.
pub async fn update_tracks(
    config: &Config,
    release: &ReleaseName,
    release_url: &str,
    forge: &dyn Forge,
    journal: &mut Journal,
) -> Result<PullRequest> {
    let slug = config.urls().slug_from_url(release_url)?;
    let baseline = &config.release.tracks_baseline;
    let tracks_file = &config.release.tracks_file;
    let branch = release.tracks_branch();
    info!("Updating {} devel branch on {}", tracks_file, release_url);

    let workspace = clone(config, release_url)?;
    checkout(&workspace, baseline)?;
    workspace
        .create_and_checkout(&branch)
        .with_context(|| format!("failed to create branch {} on {}", branch, slug))?;

    let tracks = TracksFile::parse(&workspace.read_file(tracks_file)?)
        .with_context(|| format!("invalid {} in {}", tracks_file, slug))?;
    let tracks = tracks
        .with_devel_branch(release.as_str(), release.as_str())
        .with_context(|| format!("cannot update {} in {}", tracks_file, slug))?;
    workspace.write_file(tracks_file, &tracks.to_yaml()?)?;

    let title = format!("Update {} devel branch", release);
    let pr = publish(
        &workspace,
        &slug,
        Publication {
            branch: &branch,
            base: baseline,
            message: &title,
            title: &title,
        },
        forge,
        journal,
    )
    .await?;
    info!("Opened PR to update {} devel_branch at {}", tracks_file, pr.url);
    Ok(pr)
}

/// Cut the release branch on the manifest repository from the branch the
/// manifest was read from, and open a pull request against it with the
/// rewritten manifest.
pub async fn publish_manifest(
    config: &Config,
    release: &ReleaseName,
    repos: &ReposFile,
    forge: &dyn Forge,
    journal: &mut Journal,
) -> Result<PullRequest> {
    let url = &config.manifest.repo_url;
    let slug = config.urls().slug_from_url(url)?;
    let branch = release.manifest_branch();
    info!("Creating release branch {} on {}", release, url);

    let workspace = clone(config, url)?;
    cut_release_branch(&workspace, &slug, &config.manifest.branch, release, journal)?;
    checkout(&workspace, release.as_str())?;
    workspace
        .create_and_checkout(&branch)
        .with_context(|| format!("failed to create branch {} on {}", branch, slug))?;
    workspace.write_file(&config.manifest.file, &repos.to_yaml()?)?;

    let title = format!("Update {} source branches", release);
    let pr = publish(
        &workspace,
        &slug,
        Publication {
            branch: &branch,
            base: release.as_str(),
            message: &title,
            title: &title,
        },
        forge,
        journal,
    )
    .await?;
    info!("Opened PR to update {} at {}", config.manifest.file, pr.url);
    Ok(pr)
}

/// Open a pull request on rosdistro with the rewritten distribution file.
pub async fn publish_distribution(
    config: &Config,
    release: &ReleaseName,
    distribution: &DistributionFile,
    forge: &dyn Forge,
    journal: &mut Journal,
) -> Result<PullRequest> {
    let url = &config.rosdistro.repo_url;
    let slug = config.urls().slug_from_url(url)?;
    let base = &config.rosdistro.branch;
    let branch = release.distribution_branch();
    let path = format!("{}/distribution.yaml", release);
    info!("Updating {} on {}", path, url);

    let workspace = clone(config, url)?;
    checkout(&workspace, base)?;
    workspace
        .create_and_checkout(&branch)
        .with_context(|| format!("failed to create branch {} on {}", branch, slug))?;
    workspace.write_file(&path, &distribution.render()?)?;

    let pr = publish(
        &workspace,
        &slug,
        Publication {
            branch: &branch,
            base,
            message: &format!("Update {} information", release),
            title: &format!("Update {}", release),
        },
        forge,
        journal,
    )
    .await?;
    info!("Opened PR to update distribution.yaml at {}", pr.url);
    Ok(pr)
}

fn clone(config: &Config, url: &str) -> Result<Workspace> {
    Workspace::clone(url, config.commit.as_ref()).with_context(|| format!("failed to clone {}", url))
}

fn checkout(workspace: &Workspace, branch: &str) -> Result<()> {
    workspace
        .checkout(branch)
        .with_context(|| format!("failed to check out {} in {}", branch, workspace.url()))
}

/// Check out `baseline` and push a release branch from it unless the remote
/// already has one.
fn cut_release_branch(
    workspace: &Workspace,
    slug: &RepoSlug,
    baseline: &str,
    release: &ReleaseName,
    journal: &mut Journal,
) -> Result<BranchOutcome> {
    let branch = release.as_str();
    checkout(workspace, baseline)?;

    if workspace.remote_branch_exists(branch) {
        warn!("Branch {} already exists on {}, leaving it as is", branch, slug);
        journal.record(Effect::BranchSkipped {
            repo: slug.clone(),
            branch: branch.to_string(),
        });
        return Ok(BranchOutcome::AlreadyExists);
    }

    workspace
        .create_and_checkout(branch)
        .with_context(|| format!("failed to create branch {} on {}", branch, slug))?;
    workspace
        .push_current()
        .with_context(|| format!("failed to push {} to {}", branch, slug))?;
    journal.record(Effect::BranchPushed {
        repo: slug.clone(),
        branch: branch.to_string(),
    });
    Ok(BranchOutcome::Created)
}

/// Branch, commit and pull request coordinates for [`publish`].
struct Publication<'a> {
    branch: &'a str,
    base: &'a str,
    message: &'a str,
    title: &'a str,
}

/// Commit the working tree, push the checked-out branch and open a pull
/// request for it.
async fn publish(
    workspace: &Workspace,
    slug: &RepoSlug,
    publication: Publication<'_>,
    forge: &dyn Forge,
    journal: &mut Journal,
) -> Result<PullRequest> {
    workspace
        .commit_all(publication.message)
        .with_context(|| format!("failed to commit in {}", slug))?;
    workspace
        .push_current()
        .with_context(|| format!("failed to push {} to {}", publication.branch, slug))?;
    journal.record(Effect::BranchPushed {
        repo: slug.clone(),
        branch: publication.branch.to_string(),
    });

    let request = CreatePrRequest::new(publication.branch, publication.base, publication.title);
    let pr = forge
        .create_pr(slug, request)
        .await
        .with_context(|| format!("failed to open a pull request on {}", slug))?;
    journal.record(Effect::PullRequestOpened {
        repo: slug.clone(),
        number: pr.number,
        url: pr.url.clone(),
    });
    Ok(pr)
}
