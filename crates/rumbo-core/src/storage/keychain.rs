//! OS keychain storage backend.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use super::{SecureStore, StoreKey};

/// Keychain service name; entries land as `rumbo/userToken` and
/// `rumbo/userEmail`.
const SERVICE_NAME: &str = "rumbo";

pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Probe the platform keychain. A read that fails with anything other
    /// than "no entry" means the backend is not usable here.
    pub fn is_available() -> bool {
        let entry = match Entry::new(SERVICE_NAME, StoreKey::Token.as_str()) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Keychain probe could not open an entry");
                return false;
            }
        };
        match entry.get_password() {
            Ok(_) | Err(keyring::Error::NoEntry) => true,
            Err(e) => {
                debug!(error = %e, "Keychain probe read failed");
                false
            }
        }
    }

    fn entry(&self, key: StoreKey) -> Option<Entry> {
        match Entry::new(&self.service, key.as_str()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Failed to open keychain entry");
                None
            }
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecureStore for KeychainStore {
    async fn get(&self, key: StoreKey) -> Option<String> {
        let entry = self.entry(key)?;
        match entry.get_password() {
            Ok(value) => Some(value),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Failed to read from keychain");
                None
            }
        }
    }

    async fn set(&self, key: StoreKey, value: &str) {
        if let Some(entry) = self.entry(key) {
            if let Err(e) = entry.set_password(value) {
                warn!(key = key.as_str(), error = %e, "Failed to write to keychain");
            }
        }
    }

    async fn remove(&self, key: StoreKey) {
        if let Some(entry) = self.entry(key) {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => {
                    warn!(key = key.as_str(), error = %e, "Failed to remove from keychain");
                }
            }
        }
    }
}
