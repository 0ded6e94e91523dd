//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::{SecureStore, StoreKey};

/// A `SecureStore` backed by a process-local map.
///
/// Used by tests and by ephemeral sessions that should leave nothing
/// behind. `set_failing(true)` makes every operation fail (and log) the way
/// a broken platform store would, to exercise the fail-safe path.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, String>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation behave like a backend failure.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    fn is_failing(&self) -> bool {
        self.failing.load(Ordering::Relaxed)
    }

    /// Number of stored values, for assertions.
    pub async fn len(&self) -> usize {
        self.values.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SecureStore for MemoryStore {
    async fn get(&self, key: StoreKey) -> Option<String> {
        if self.is_failing() {
            warn!(key = key.as_str(), "Memory store read failed (injected)");
            return None;
        }
        self.values.lock().await.get(&key).cloned()
    }

    async fn set(&self, key: StoreKey, value: &str) {
        if self.is_failing() {
            warn!(key = key.as_str(), "Memory store write failed (injected)");
            return;
        }
        self.values.lock().await.insert(key, value.to_string());
    }

    async fn remove(&self, key: StoreKey) {
        if self.is_failing() {
            warn!(key = key.as_str(), "Memory store remove failed (injected)");
            return;
        }
        self.values.lock().await.remove(&key);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.set(StoreKey::Token, "abc").await;
        assert_eq!(store.get(StoreKey::Token).await.as_deref(), Some("abc"));
        assert_eq!(store.get(StoreKey::Email).await, None);

        store.remove(StoreKey::Token).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_failing_mode_absorbs_everything() {
        let store = MemoryStore::new();
        store.set(StoreKey::Token, "abc").await;

        store.set_failing(true);
        assert_eq!(store.get(StoreKey::Token).await, None);
        store.set(StoreKey::Email, "a@b.com").await;
        store.remove(StoreKey::Token).await;

        // The underlying value was never touched while failing
        store.set_failing(false);
        assert_eq!(store.get(StoreKey::Token).await.as_deref(), Some("abc"));
        assert_eq!(store.get(StoreKey::Email).await, None);
    }
}
