//! Secure key-value storage for session material.
//!
//! The client persists exactly two values: the bearer token and the
//! signed-in email. Every backend failure is absorbed here: reads surface
//! as `None` and writes as no-ops, so a broken platform store degrades to
//! a logged-out client instead of a crash.
//!
//! Backends:
//! - `KeychainStore`: the OS keychain via the `keyring` crate
//! - `PlainFileStore`: JSON file fallback for platforms without a keychain
//! - `MemoryStore`: process-local map for tests and ephemeral sessions

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

pub use file::PlainFileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

/// The two values the client ever persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Token,
    Email,
}

impl StoreKey {
    /// Wire name of the key, shared with the mobile builds.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Token => "userToken",
            StoreKey::Email => "userEmail",
        }
    }
}

/// Fail-safe key-value storage.
///
/// Implementations log failures and degrade to "value absent" rather than
/// returning errors. A session that cannot be read is a session that does
/// not exist.
#[async_trait]
pub trait SecureStore: Send + Sync {
    async fn get(&self, key: StoreKey) -> Option<String>;
    async fn set(&self, key: StoreKey, value: &str);
    async fn remove(&self, key: StoreKey);
}

/// Pick the storage backend for this platform, once, at startup.
///
/// Order: the `RUMBO_STORAGE` environment variable (`keyring` or `file`),
/// then the configured preference, then a keychain probe with a plain-file
/// fallback.
pub fn platform_default(preferred: Option<&str>) -> Arc<dyn SecureStore> {
    let env_choice = std::env::var("RUMBO_STORAGE").ok();
    let choice = env_choice.as_deref().or(preferred);

    match choice {
        Some("keyring") => return Arc::new(KeychainStore::new()),
        Some("file") => return Arc::new(PlainFileStore::new()),
        Some(other) => {
            warn!(backend = other, "Unknown storage backend, probing instead");
        }
        None => {}
    }

    if KeychainStore::is_available() {
        debug!("Using the OS keychain for session storage");
        Arc::new(KeychainStore::new())
    } else {
        info!("OS keychain unavailable, falling back to file storage");
        Arc::new(PlainFileStore::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_wire_names() {
        assert_eq!(StoreKey::Token.as_str(), "userToken");
        assert_eq!(StoreKey::Email.as_str(), "userEmail");
    }
}
