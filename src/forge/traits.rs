//! forge::traits
//!
//! Forge trait definition for opening pull requests on a hosting service.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! A single forge instance serves every repository of a run; the target
//! repository is passed per call.
//!
//! # Example
//!
//! ```ignore
//! use ros2_release_branches::core::urls::RepoSlug;
//! use ros2_release_branches::forge::{CreatePrRequest, Forge, ForgeError};
//!
//! async fn open(forge: &dyn Forge) -> Result<(), ForgeError> {
//!     let repo = RepoSlug::parse("ros/rosdistro").unwrap();
//!     let pr = forge
//!         .create_pr(&repo, CreatePrRequest::new("kappa-update", "master", "Update kappa"))
//!         .await?;
//!     println!("Created PR #{}: {}", pr.number, pr.url);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::urls::RepoSlug;

/// Errors from forge operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForgeError {
    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The repository was not found or is not visible with this token.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Request to create a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrRequest {
    /// Head branch name (the branch with changes)
    pub head: String,
    /// Base branch name (the branch to merge into)
    pub base: String,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
    /// Create as draft
    pub draft: bool,
}

impl CreatePrRequest {
    /// A non-draft request whose body repeats the title.
    pub fn new(head: impl Into<String>, base: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            head: head.into(),
            base: base.into(),
            body: Some(title.clone()),
            title,
            draft: false,
        }
    }
}

/// Pull request information returned from the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR URL (web URL for viewing)
    pub url: String,
    /// Head branch name
    pub head: String,
    /// Base branch name
    pub base: String,
    /// PR title
    pub title: String,
}

/// The Forge trait for interacting with remote hosting services.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. Nothing is retried.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Open a pull request on `repo`.
    ///
    /// # Errors
    ///
    /// - `AuthFailed` if the token is invalid or lacks permission
    /// - `NotFound` if the repository does not exist
    /// - `ApiError` if the head branch is missing or a PR already exists
    async fn create_pr(
        &self,
        repo: &RepoSlug,
        request: CreatePrRequest,
    ) -> Result<PullRequest, ForgeError>;
}
