//! Shared fixtures for integration tests.
//!
//! Remotes are bare repositories under one temporary directory. Using
//! `file://<dir>` as the configured web host makes every `owner/name` URL
//! clonable without a network.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use ros2_release_branches::core::config::{CommitIdentity, Config};

/// A directory of bare remotes addressed as `<web_base>/<owner>/<name>`.
pub struct Remotes {
    root: TempDir,
}

impl Remotes {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// The web host to configure.
    pub fn web_base(&self) -> String {
        format!("file://{}", self.root.path().display())
    }

    /// URL of the remote `slug`.
    pub fn url(&self, slug: &str) -> String {
        format!("{}/{}", self.web_base(), slug)
    }

    fn bare(&self, slug: &str) -> PathBuf {
        self.root.path().join(slug)
    }

    /// Create a bare remote whose default branch holds `files`.
    ///
    /// `extra_branches` are created at the same commit.
    pub fn create(
        &self,
        slug: &str,
        default_branch: &str,
        files: &[(&str, &str)],
        extra_branches: &[&str],
    ) -> String {
        let bare = self.bare(slug);
        fs::create_dir_all(&bare).unwrap();
        run_git(&bare, &["init", "--bare", "--quiet"]);

        let seed = TempDir::new().unwrap();
        run_git(seed.path(), &["init", "--quiet"]);
        run_git(seed.path(), &["config", "user.email", "test@example.com"]);
        run_git(seed.path(), &["config", "user.name", "Test User"]);
        run_git(seed.path(), &["checkout", "--quiet", "-b", default_branch]);

        for (path, contents) in files {
            let file = seed.path().join(path);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(file, contents).unwrap();
        }
        if files.is_empty() {
            fs::write(seed.path().join("README.md"), "# Test Repo\n").unwrap();
        }
        run_git(seed.path(), &["add", "-A"]);
        run_git(seed.path(), &["commit", "--quiet", "-m", "Initial commit"]);

        for branch in extra_branches {
            run_git(seed.path(), &["branch", branch]);
        }

        let target = bare.to_string_lossy().into_owned();
        run_git(seed.path(), &["push", "--quiet", &target, "--all"]);
        run_git(
            &bare,
            &["symbolic-ref", "HEAD", &format!("refs/heads/{}", default_branch)],
        );

        self.url(slug)
    }

    /// Branch names on the remote, sorted.
    pub fn branches(&self, slug: &str) -> Vec<String> {
        let out = git_output(
            &self.bare(slug),
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
        );
        let mut branches: Vec<String> = out.lines().map(str::to_string).collect();
        branches.sort();
        branches
    }

    /// Contents of `path` at `rev` on the remote.
    pub fn show(&self, slug: &str, rev: &str, path: &str) -> String {
        git_output(&self.bare(slug), &["show", &format!("{}:{}", rev, path)])
    }

    /// Commit id `rev` resolves to on the remote.
    pub fn rev_parse(&self, slug: &str, rev: &str) -> String {
        git_output(&self.bare(slug), &["rev-parse", rev])
            .trim()
            .to_string()
    }

    /// Subject of the tip commit of `rev`.
    pub fn subject(&self, slug: &str, rev: &str) -> String {
        git_output(&self.bare(slug), &["log", "-1", "--format=%s", rev])
            .trim()
            .to_string()
    }
}

/// Config pointing every host at the fixtures.
pub fn test_config(remotes: &Remotes, raw_base: &str) -> Config {
    let mut config = Config::default();
    config.github.web_base = remotes.web_base();
    config.github.raw_base = raw_base.to_string();
    config.manifest.repo_url = remotes.url("ros2/ros2");
    config.rosdistro.repo_url = remotes.url("ros/rosdistro");
    config.commit = Some(CommitIdentity {
        name: "Release Bot".to_string(),
        email: "release@example.com".to_string(),
    });
    config
}

/// Run a git command in the given directory.
pub fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Run a git command and return its stdout.
pub fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8(output.stdout).unwrap()
}
