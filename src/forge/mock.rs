//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge stores opened PRs in memory, numbered per repository, and
//! records every call. A failure can be injected for the next `create_pr`.
//!
//! # Example
//!
//! ```
//! use ros2_release_branches::core::urls::RepoSlug;
//! use ros2_release_branches::forge::mock::MockForge;
//! use ros2_release_branches::forge::{CreatePrRequest, Forge};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new();
//! let repo = RepoSlug::parse("ros/rosdistro").unwrap();
//!
//! let pr = forge
//!     .create_pr(&repo, CreatePrRequest::new("kappa-update", "master", "Update kappa"))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(pr.number, 1);
//! assert_eq!(pr.url, "https://github.com/ros/rosdistro/pull/1");
//! assert_eq!(forge.operations().len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{CreatePrRequest, Forge, ForgeError, PullRequest};
use crate::core::urls::RepoSlug;

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    inner: Arc<Mutex<MockForgeInner>>,
}

#[derive(Debug, Default)]
struct MockForgeInner {
    /// Last PR number assigned, per repository.
    numbers: HashMap<RepoSlug, u64>,
    /// Error returned by the next create_pr call.
    fail_next: Option<ForgeError>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CreatePr {
        repo: RepoSlug,
        head: String,
        base: String,
        title: String,
        body: Option<String>,
    },
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_pr` call fail with `error`.
    pub fn fail_next(&self, error: ForgeError) {
        self.lock().fail_next = Some(error);
    }

    /// All recorded operations, in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Repositories PRs were requested on, in call order.
    pub fn pr_repos(&self) -> Vec<String> {
        self.lock()
            .operations
            .iter()
            .map(|op| match op {
                MockOperation::CreatePr { repo, .. } => repo.to_string(),
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockForgeInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_pr(
        &self,
        repo: &RepoSlug,
        request: CreatePrRequest,
    ) -> Result<PullRequest, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::CreatePr {
            repo: repo.clone(),
            head: request.head.clone(),
            base: request.base.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
        });

        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }

        let number = inner.numbers.entry(repo.clone()).or_insert(0);
        *number += 1;

        Ok(PullRequest {
            number: *number,
            url: format!("https://github.com/{}/pull/{}", repo, number),
            head: request.head,
            base: request.base,
            title: request.title,
        })
    }
}
