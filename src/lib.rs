//! ros2-release-branches - cut source branches for a new ROS 2 distribution
//!
//! Given the name of a new distribution, this tool branches every
//! repository in the rolling `ros2.repos` manifest, points each released
//! package's `tracks.yaml` at the new branch, and opens pull requests with
//! the updated manifest and `distribution.yaml`.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Fetch → Plan → Execute and keeps the journal
//! - [`core`] - Domain types, documents, configuration and pure transforms
//! - [`fetch`] - Downloads the manifest and the distribution descriptor
//! - [`git`] - Single interface for all Git operations
//! - [`forge`] - Pull request creation (GitHub)
//! - [`secrets`] - API token lookup
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Every cross-reference is resolved before the first push
//! 2. A release branch that already exists on a remote is never overwritten
//! 3. Every completed push and pull request is recorded in the journal
//! 4. Scratch clones are removed whether the run succeeds or fails

pub mod cli;
pub mod core;
pub mod engine;
pub mod fetch;
pub mod forge;
pub mod git;
pub mod secrets;
pub mod ui;
