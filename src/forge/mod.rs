//! forge
//!
//! Abstraction for the hosting service pull requests are opened on.
//!
//! # Architecture
//!
//! The `Forge` trait is the only interface the engine sees. The CLI builds
//! a [`GitHubForge`] from the keychain token; tests substitute
//! [`MockForge`](mock::MockForge).
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and request/response types
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use github::GitHubForge;
pub use traits::*;
