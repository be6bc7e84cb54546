//! End-to-end release runs.
//!
//! Every remote is a local bare repository, the raw-content host is a
//! wiremock server and pull requests go to `MockForge`.

mod common;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{test_config, Remotes};
use ros2_release_branches::core::config::Config;
use ros2_release_branches::core::documents::{
    DistributionFile, ReposFile, TracksFile, DISTRIBUTION_HEADER,
};
use ros2_release_branches::core::journal::Effect;
use ros2_release_branches::core::types::ReleaseName;
use ros2_release_branches::core::urls::RepoSlug;
use ros2_release_branches::engine::{prepare, Runner};
use ros2_release_branches::forge::mock::{MockForge, MockOperation};
use ros2_release_branches::forge::ForgeError;

const TRACKS: &str = "\
tracks:
  jazzy:
    actions:
    - bloom-export-upstream
    devel_branch: jazzy
    name: upstream
  kappa:
    actions:
    - bloom-export-upstream
    devel_branch: rolling
    name: upstream
";

fn kappa() -> ReleaseName {
    ReleaseName::new("kappa").unwrap()
}

fn slug(s: &str) -> RepoSlug {
    RepoSlug::parse(s).unwrap()
}

/// Remotes, a raw-content server and a config wired to both.
struct Scenario {
    remotes: Remotes,
    server: MockServer,
    config: Config,
}

impl Scenario {
    async fn new() -> Self {
        let remotes = Remotes::new();
        let server = MockServer::start().await;
        let config = test_config(&remotes, &server.uri());
        Self {
            remotes,
            server,
            config,
        }
    }

    fn url(&self, slug: &str) -> String {
        self.remotes.url(slug)
    }

    /// Publish both documents on the raw host and as files in the manifest
    /// and rosdistro remotes.
    async fn publish(&self, manifest: &str, distribution: &str) {
        Mock::given(method("GET"))
            .and(path("/ros2/ros2/rolling/ros2.repos"))
            .respond_with(ResponseTemplate::new(200).set_body_string(manifest))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ros/rosdistro/master/kappa/distribution.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(distribution))
            .mount(&self.server)
            .await;

        self.remotes
            .create("ros2/ros2", "rolling", &[("ros2.repos", manifest)], &[]);
        self.remotes.create(
            "ros/rosdistro",
            "master",
            &[("kappa/distribution.yaml", distribution)],
            &[],
        );
    }

    /// A released package `org/pkgA` plus one skip-list entry.
    async fn kappa(&self, existing_branches: &[&str]) {
        let pkg_a = self
            .remotes
            .create("org/pkgA", "rolling", &[], existing_branches);
        let pkg_a_release = self.remotes.create(
            "org-release/pkgA-release",
            "master",
            &[("tracks.yaml", TRACKS)],
            &[],
        );

        let manifest = format!(
            "\
repositories:
  eProsima/Fast-CDR:
    type: git
    url: https://github.com/eProsima/Fast-CDR.git
    version: 2.2.x
  org/pkgA:
    type: git
    url: {pkg_a}
    version: rolling
"
        );
        let distribution = format!(
            "\
%YAML 1.1
# ROS distribution file
# see REP 143: http://ros.org/reps/rep-0143.html
---
release_platforms:
  ubuntu:
  - noble
repositories:
  pkgA-distro:
    release:
      url: {pkg_a_release}
      version: 1.0.0-1
    source:
      type: git
      url: {pkg_a}.git
      version: rolling
    status: developed
type: distribution
version: 2
"
        );
        self.publish(&manifest, &distribution).await;
    }

    fn manifest_on(&self, branch: &str) -> ReposFile {
        ReposFile::parse(&self.remotes.show("ros2/ros2", branch, "ros2.repos")).unwrap()
    }

    fn distribution_on(&self, branch: &str) -> DistributionFile {
        let text = self
            .remotes
            .show("ros/rosdistro", branch, "kappa/distribution.yaml");
        let body = text
            .strip_prefix(DISTRIBUTION_HEADER)
            .expect("distribution file starts with the REP 143 header");
        DistributionFile::parse(body).unwrap()
    }
}

// =============================================================================
// Full runs
// =============================================================================

#[tokio::test]
async fn kappa_release_end_to_end() {
    let scenario = Scenario::new().await;
    scenario.kappa(&[]).await;
    let forge = MockForge::new();

    let mut runner = Runner::new(&scenario.config, kappa(), &forge);
    let plan = runner.run().await.unwrap();
    let journal = runner.into_journal();

    assert_eq!(plan.repos.len(), 1);
    assert_eq!(plan.skipped, vec!["eProsima/Fast-CDR".to_string()]);

    // Source branch cut from rolling.
    let remotes = &scenario.remotes;
    assert_eq!(remotes.branches("org/pkgA"), vec!["kappa", "rolling"]);
    assert_eq!(
        remotes.rev_parse("org/pkgA", "kappa"),
        remotes.rev_parse("org/pkgA", "rolling")
    );

    // Release track points at the new branch; everything else preserved.
    let release_repo = "org-release/pkgA-release";
    assert_eq!(
        remotes.branches(release_repo),
        vec!["kappa/update-devel-branch", "master"]
    );
    assert_eq!(
        remotes.subject(release_repo, "kappa/update-devel-branch"),
        "Update kappa devel branch"
    );
    let tracks = TracksFile::parse(&remotes.show(
        release_repo,
        "kappa/update-devel-branch",
        "tracks.yaml",
    ))
    .unwrap();
    assert_eq!(tracks.tracks["kappa"].devel_branch.as_deref(), Some("kappa"));
    assert_eq!(tracks.tracks["jazzy"].devel_branch.as_deref(), Some("jazzy"));
    assert!(tracks.tracks["kappa"].extra.contains_key("actions"));

    // Manifest: release branch plus update branch with pinned versions.
    assert_eq!(
        remotes.branches("ros2/ros2"),
        vec!["kappa", "kappa-initial-branches", "rolling"]
    );
    assert_eq!(
        remotes.subject("ros2/ros2", "kappa-initial-branches"),
        "Update kappa source branches"
    );
    let manifest = scenario.manifest_on("kappa-initial-branches");
    assert_eq!(
        manifest.get("org/pkgA").unwrap().version.as_deref(),
        Some("kappa")
    );
    assert_eq!(
        manifest.get("eProsima/Fast-CDR").unwrap().version.as_deref(),
        Some("2.2.x")
    );

    // Distribution: header kept, source version pinned, release untouched.
    assert_eq!(remotes.branches("ros/rosdistro"), vec!["kappa-update", "master"]);
    assert_eq!(
        remotes.subject("ros/rosdistro", "kappa-update"),
        "Update kappa information"
    );
    let distribution = scenario.distribution_on("kappa-update");
    let package = distribution.get("pkgA-distro").unwrap();
    assert_eq!(
        package.source.as_ref().unwrap().version.as_deref(),
        Some("kappa")
    );
    assert_eq!(
        package.release.as_ref().unwrap().extra["version"],
        serde_yaml::Value::from("1.0.0-1")
    );
    assert!(distribution.extra.contains_key("release_platforms"));

    // Three pull requests, in order, against the right bases.
    let prs: Vec<(String, String, String, String)> = forge
        .operations()
        .into_iter()
        .map(|op| match op {
            MockOperation::CreatePr {
                repo,
                head,
                base,
                title,
                ..
            } => (repo.to_string(), head, base, title),
        })
        .collect();
    assert_eq!(
        prs,
        vec![
            (
                "org-release/pkgA-release".to_string(),
                "kappa/update-devel-branch".to_string(),
                "master".to_string(),
                "Update kappa devel branch".to_string(),
            ),
            (
                "ros2/ros2".to_string(),
                "kappa-initial-branches".to_string(),
                "kappa".to_string(),
                "Update kappa source branches".to_string(),
            ),
            (
                "ros/rosdistro".to_string(),
                "kappa-update".to_string(),
                "master".to_string(),
                "Update kappa".to_string(),
            ),
        ]
    );

    assert_eq!(journal.pushed_branches().len(), 5);
    assert_eq!(journal.pull_requests().len(), 3);
}

#[tokio::test]
async fn existing_release_branch_is_left_alone() {
    let scenario = Scenario::new().await;
    scenario.kappa(&["kappa"]).await;
    let before = scenario.remotes.rev_parse("org/pkgA", "kappa");
    let forge = MockForge::new();

    let mut runner = Runner::new(&scenario.config, kappa(), &forge);
    runner.run().await.unwrap();
    let journal = runner.into_journal();

    assert_eq!(scenario.remotes.rev_parse("org/pkgA", "kappa"), before);
    let first = journal.effects().next().unwrap();
    assert_eq!(
        first,
        &Effect::BranchSkipped {
            repo: slug("org/pkgA"),
            branch: "kappa".to_string(),
        }
    );
    assert!(!journal
        .pushed_branches()
        .iter()
        .any(|(repo, _)| repo.to_string() == "org/pkgA"));

    // The rest of the run still happens.
    assert_eq!(forge.operations().len(), 3);
    assert_eq!(
        scenario
            .manifest_on("kappa-initial-branches")
            .get("org/pkgA")
            .unwrap()
            .version
            .as_deref(),
        Some("kappa")
    );
}

#[tokio::test]
async fn manifest_release_branch_is_cut_from_manifest_branch() {
    let mut scenario = Scenario::new().await;
    scenario.config.manifest.branch = "main".to_string();
    let pkg_b = scenario.remotes.create("org/pkgB", "rolling", &[], &[]);
    let manifest = format!("repositories:\n  org/pkgB:\n    type: git\n    url: {pkg_b}\n    version: rolling\n");
    let distribution = format!(
        "repositories:\n  pkg_b:\n    source:\n      type: git\n      url: {pkg_b}\n      version: rolling\ntype: distribution\nversion: 2\n"
    );
    Mock::given(method("GET"))
        .and(path("/ros2/ros2/main/ros2.repos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(manifest.as_str()))
        .mount(&scenario.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ros/rosdistro/master/kappa/distribution.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(distribution.as_str()))
        .mount(&scenario.server)
        .await;
    scenario
        .remotes
        .create("ros2/ros2", "main", &[("ros2.repos", manifest.as_str())], &[]);
    scenario.remotes.create(
        "ros/rosdistro",
        "master",
        &[("kappa/distribution.yaml", distribution.as_str())],
        &[],
    );
    let forge = MockForge::new();

    let mut runner = Runner::new(&scenario.config, kappa(), &forge);
    runner.run().await.unwrap();

    assert_eq!(
        scenario.remotes.branches("ros2/ros2"),
        vec!["kappa", "kappa-initial-branches", "main"]
    );
    assert_eq!(
        scenario.remotes.rev_parse("ros2/ros2", "kappa"),
        scenario.remotes.rev_parse("ros2/ros2", "main")
    );
    assert_eq!(scenario.remotes.branches("org/pkgB"), vec!["kappa", "rolling"]);
}

#[tokio::test]
async fn package_without_release_repository_gets_no_tracks_pr() {
    let scenario = Scenario::new().await;
    let pkg_b = scenario.remotes.create("org/pkgB", "rolling", &[], &[]);
    let manifest = format!("repositories:\n  org/pkgB:\n    type: git\n    url: {pkg_b}\n    version: rolling\n");
    let distribution = format!(
        "repositories:\n  pkg_b:\n    doc:\n      type: git\n      url: {pkg_b}\n      version: rolling\ntype: distribution\nversion: 2\n"
    );
    scenario.publish(&manifest, &distribution).await;
    let forge = MockForge::new();

    let mut runner = Runner::new(&scenario.config, kappa(), &forge);
    runner.run().await.unwrap();

    assert_eq!(scenario.remotes.branches("org/pkgB"), vec!["kappa", "rolling"]);
    assert_eq!(forge.pr_repos(), vec!["ros2/ros2", "ros/rosdistro"]);
    let distribution = scenario.distribution_on("kappa-update");
    assert_eq!(
        distribution.get("pkg_b").unwrap().doc.as_ref().unwrap().version.as_deref(),
        Some("kappa")
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn missing_cross_reference_fails_before_any_branch() {
    let scenario = Scenario::new().await;
    let pkg_a = scenario.remotes.create("org/pkgA", "rolling", &[], &[]);
    let orphan = scenario.remotes.create("org/orphan", "rolling", &[], &[]);
    let manifest = format!(
        "repositories:\n  org/orphan:\n    url: {orphan}\n  org/pkgA:\n    url: {pkg_a}\n"
    );
    let distribution =
        format!("repositories:\n  pkg_a:\n    source:\n      url: {pkg_a}\n");
    scenario.publish(&manifest, &distribution).await;
    let forge = MockForge::new();

    let mut runner = Runner::new(&scenario.config, kappa(), &forge);
    let err = runner.run().await.unwrap_err();

    assert!(format!("{:#}", err).contains("org/orphan"));
    assert!(runner.journal().is_empty());
    assert!(forge.operations().is_empty());
    assert_eq!(scenario.remotes.branches("org/pkgA"), vec!["rolling"]);
    assert_eq!(scenario.remotes.branches("org/orphan"), vec!["rolling"]);
}

#[tokio::test]
async fn forge_failure_keeps_journal_of_pushed_branches() {
    let scenario = Scenario::new().await;
    scenario.kappa(&[]).await;
    let forge = MockForge::new();
    forge.fail_next(ForgeError::RateLimited);

    let mut runner = Runner::new(&scenario.config, kappa(), &forge);
    let err = runner.run().await.unwrap_err();
    let journal = runner.into_journal();

    assert!(format!("{:#}", err).contains("org-release/pkgA-release"));
    assert_eq!(
        journal.pushed_branches(),
        vec![
            (&slug("org/pkgA"), "kappa"),
            (&slug("org-release/pkgA-release"), "kappa/update-devel-branch"),
        ]
    );
    assert!(journal.pull_requests().is_empty());
    assert_eq!(scenario.remotes.branches("ros2/ros2"), vec!["rolling"]);
    assert_eq!(scenario.remotes.branches("ros/rosdistro"), vec!["master"]);
}

#[tokio::test]
async fn prepare_has_no_side_effects() {
    let scenario = Scenario::new().await;
    scenario.kappa(&[]).await;

    let prepared = prepare(&scenario.config, &kappa()).await.unwrap();

    assert_eq!(prepared.plan.repos[0].name, "org/pkgA");
    assert_eq!(prepared.plan.repos[0].package, "pkgA-distro");
    assert_eq!(
        prepared.plan.repos[0].release_url.as_deref(),
        Some(scenario.url("org-release/pkgA-release").as_str())
    );
    assert_eq!(scenario.remotes.branches("org/pkgA"), vec!["rolling"]);
    assert_eq!(scenario.remotes.branches("ros2/ros2"), vec!["rolling"]);
}
