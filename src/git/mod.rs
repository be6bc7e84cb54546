//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. No other module imports
//! `git2` or runs the `git` binary. Every operation happens in a
//! [`Workspace`]: a throwaway clone that is deleted when it goes out of
//! scope.
//!
//! # Responsibilities
//!
//! - Cloning a remote into a scoped temporary directory
//! - Branch lookup, creation and checkout
//! - Staging and committing the working tree
//! - Pushing a branch with upstream tracking

mod interface;

pub use interface::{GitError, Workspace, REMOTE};
