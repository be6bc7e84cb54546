//! secrets
//!
//! Credential lookup for the hosting API token.
//!
//! # Architecture
//!
//! Secrets are read through the `SecretStore` trait. The CLI uses
//! [`KeychainSecretStore`]; tests supply their own stores.
//!
//! # Security
//!
//! - Secrets are **never** logged or included in error messages
//! - The token is looked up once at startup, before any network call

mod keychain_store;
mod traits;

pub use keychain_store::KeychainSecretStore;
pub use traits::{SecretError, SecretStore};

use crate::core::config::CredentialsConfig;

/// Read the API token named by `credentials`.
///
/// # Errors
///
/// [`SecretError::NotFound`] when the store has no entry for the account;
/// store errors are passed through.
pub fn load_token(
    store: &dyn SecretStore,
    credentials: &CredentialsConfig,
) -> Result<String, SecretError> {
    match store.get(&credentials.account)? {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(SecretError::NotFound(format!(
            "{} (service '{}')",
            credentials.account, credentials.service
        ))),
    }
}
