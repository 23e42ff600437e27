//! Key-value storage areas backing the credential store.
//!
//! Two scopes exist: a durable file-backed area that survives restarts
//! ("remember me"), and an in-memory area that lives for the current
//! process only. Both sit behind the same [`StorageArea`] trait so the
//! token store can treat them uniformly.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::warn;

/// Abstraction over a flat string key-value store.
///
/// Reads never fail across this boundary: unreadable or corrupt backing
/// data degrades to "absent" with a warning. Writes surface their error so
/// callers can decide whether to log or propagate.
pub trait StorageArea: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str);
    /// Remove every key in the area. Idempotent.
    fn clear(&self);
    fn keys(&self) -> Vec<String>;
}

/// Durable area persisted as a single JSON document on disk.
pub struct FileArea {
    path: PathBuf,
}

impl FileArea {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Area at the default credential location under the Elanis root.
    pub fn default_location() -> Self {
        Self::new(crate::credentials_path())
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Corrupt storage file at {:?}, treating as empty: {}", self.path, e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                warn!("Failed to read storage file at {:?}: {}", self.path, e);
                BTreeMap::new()
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> anyhow::Result<()> {
        crate::ensure_parent(&self.path)?;
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StorageArea for FileArea {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            if let Err(e) = self.write_map(&map) {
                warn!("Failed to persist removal of {:?}: {}", key, e);
            }
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!("Failed to clear storage file at {:?}: {}", self.path, e);
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.read_map().keys().cloned().collect()
    }
}

/// Session-scoped area held in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryArea {
    map: RwLock<BTreeMap<String, String>>,
}

impl MemoryArea {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageArea for MemoryArea {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.map
            .write()
            .map_err(|_| anyhow::anyhow!("storage lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.map.write() {
            map.remove(key);
        }
    }

    fn clear(&self) {
        if let Ok(mut map) = self.map.write() {
            map.clear();
        }
    }

    fn keys(&self) -> Vec<String> {
        self.map
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}
