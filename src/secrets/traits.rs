//! secrets::traits
//!
//! Secret storage trait definition.
//!
//! # Security
//!
//! Implementations MUST:
//! - Never log, print, or include secrets in error messages
//! - Be thread-safe (Send + Sync)
//!
//! # Example
//!
//! ```ignore
//! use ros2_release_branches::secrets::{SecretError, SecretStore};
//!
//! fn token(store: &dyn SecretStore) -> Result<String, SecretError> {
//!     store
//!         .get("may-open-prs")?
//!         .ok_or_else(|| SecretError::NotFound("may-open-prs".into()))
//! }
//! ```

use thiserror::Error;

/// Errors from secret storage operations.
///
/// Error messages never include secret values.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Secret not found for the given key.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// Failed to read from secret storage.
    #[error("failed to read secret: {0}")]
    ReadError(String),

    /// Provider not available or not configured.
    #[error("secret provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Trait for secret storage providers.
///
/// Read-only: the tool never writes credentials, it expects them to be
/// provisioned in the store beforehand.
pub trait SecretStore: Send + Sync {
    /// Get a secret by key.
    ///
    /// Returns `Ok(Some(value))` if the secret exists.
    /// Returns `Ok(None)` if the secret does not exist.
    /// Returns `Err` if there was an error accessing the store.
    ///
    /// # Security
    ///
    /// The returned value is the raw secret. Do not log or print it.
    fn get(&self, key: &str) -> Result<Option<String>, SecretError>;

    /// Check if a secret exists.
    ///
    /// Default implementation uses `get()` and checks for `Some`.
    fn exists(&self, key: &str) -> Result<bool, SecretError> {
        Ok(self.get(key)?.is_some())
    }
}
