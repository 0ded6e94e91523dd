//! Plain-file session storage for platforms without a usable keychain.
//!
//! Values live in a JSON object at `<config_dir>/rumbo/store.json`. This is
//! the browser-localStorage arm of the storage strategy: no OS protection,
//! but the same fail-safe contract as the keychain backend.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use super::{SecureStore, StoreKey};

/// Directory name under the user config dir
const APP_DIR: &str = "rumbo";

/// Store file name
const STORE_FILE: &str = "store.json";

pub struct PlainFileStore {
    path: PathBuf,
}

impl PlainFileStore {
    /// Store at the default location under the user's config directory.
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(APP_DIR).join(STORE_FILE),
        }
    }

    /// Store at an explicit path (tests, portable installs).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read store file");
                return HashMap::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Store file is corrupt, treating as empty");
                HashMap::new()
            }
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %self.path.display(), error = %e, "Failed to create store directory");
                return;
            }
        }
        let contents = match serde_json::to_string_pretty(map) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to serialize store contents");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, contents) {
            warn!(path = %self.path.display(), error = %e, "Failed to write store file");
        }
    }
}

impl Default for PlainFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecureStore for PlainFileStore {
    async fn get(&self, key: StoreKey) -> Option<String> {
        self.read_map().get(key.as_str()).cloned()
    }

    async fn set(&self, key: StoreKey, value: &str) {
        let mut map = self.read_map();
        map.insert(key.as_str().to_string(), value.to_string());
        self.write_map(&map);
    }

    async fn remove(&self, key: StoreKey) {
        let mut map = self.read_map();
        if map.remove(key.as_str()).is_some() {
            self.write_map(&map);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
