//! secrets::keychain_store
//!
//! Secret storage backed by the OS keychain.
//!
//! # Platform Support
//!
//! This module uses the `keyring` crate which supports:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (via D-Bus)
//!
//! On every platform this is the store Python's `keyring` writes to, so a
//! token saved with `keyring set github-api-token may-open-prs` is found.
//!
//! # Feature Flag
//!
//! Only functional with the `keychain` feature (on by default). Without it,
//! every lookup fails with [`SecretError::ProviderNotAvailable`].
//!
//! # Example
//!
//! ```ignore
//! use ros2_release_branches::secrets::{KeychainSecretStore, SecretStore};
//!
//! let store = KeychainSecretStore::new("github-api-token");
//! if let Some(token) = store.get("may-open-prs")? {
//!     // Use token...
//! }
//! ```

#[cfg(feature = "keychain")]
use keyring::Entry;

use super::traits::{SecretError, SecretStore};

/// Keychain-based secret storage.
///
/// Keys passed to [`SecretStore::get`] are keychain account names under a
/// fixed service.
#[derive(Debug, Clone)]
pub struct KeychainSecretStore {
    /// Service name for keychain entries
    service: String,
}

impl KeychainSecretStore {
    /// Create a store reading entries of `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Get the service name.
    pub fn service(&self) -> &str {
        &self.service
    }
}

#[cfg(feature = "keychain")]
impl SecretStore for KeychainSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let entry = Entry::new(&self.service, key)
            .map_err(|e| SecretError::ReadError(format!("cannot create keyring entry: {}", e)))?;

        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(keyring::Error::Ambiguous(_)) => Err(SecretError::ReadError(format!(
                "ambiguous keychain entry for service '{}'",
                self.service
            ))),
            Err(keyring::Error::PlatformFailure(e)) | Err(keyring::Error::NoStorageAccess(e)) => {
                Err(SecretError::ProviderNotAvailable(e.to_string()))
            }
            Err(e) => Err(SecretError::ReadError(format!(
                "cannot read from keychain: {}",
                e
            ))),
        }
    }
}

#[cfg(not(feature = "keychain"))]
impl SecretStore for KeychainSecretStore {
    fn get(&self, _key: &str) -> Result<Option<String>, SecretError> {
        Err(SecretError::ProviderNotAvailable(
            "keychain support not enabled (compile with --features keychain)".into(),
        ))
    }
}
