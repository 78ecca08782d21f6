//! Key-value persistence for the selected region.
//!
//! The workflow only needs string get/set/remove. [`FileStore`] keeps every
//! key in one JSON object on disk and replaces the file atomically, so a
//! batch written with [`KeyValueStore::set_many`] lands all-or-nothing.

use super::error::StoreError;
use super::model::{PersistedSelection, RegionDescriptor, SELECTED_REGION_KEY, SERVER_URL_KEY};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value).await?;
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}

/// Session-only store, used when persistence is turned off.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// JSON-file store. The whole map is re-read on every access so edits made
/// by another process are picked up.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(StoreError::Corrupt),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(map).map_err(StoreError::Corrupt)?;
        let tmp = self.path.with_extension("json.tmp");
        let written = match tokio::fs::write(&tmp, contents).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Like `read_map`, but a corrupt file is moved to `<name>.corrupt` and
    /// treated as empty so the next write can replace it.
    async fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_map().await {
            Err(StoreError::Corrupt(e)) => {
                let aside = self.path.with_extension("json.corrupt");
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "storage file is corrupt; starting from an empty map"
                );
                tokio::fs::rename(&self.path, &aside).await?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map_for_write().await?;
        if f(&mut map) {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_many(&[(key, value)]).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.remove_many(&[key]).await
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        self.update(|map| {
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
            true
        })
        .await
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        self.update(|map| {
            let mut changed = false;
            for key in keys {
                changed |= map.remove(*key).is_some();
            }
            changed
        })
        .await
    }
}

/// Outcome of reading the persisted selection back.
#[derive(Debug)]
pub struct LoadedSelection {
    pub selection: Option<PersistedSelection>,
    /// The `selectedRegion` value was present but would not parse.
    pub parse_error: Option<serde_json::Error>,
}

/// Read both selection keys and reconcile them. `selectedRegion` wins when
/// the two disagree.
pub async fn load_selection(store: &dyn KeyValueStore) -> Result<LoadedSelection, StoreError> {
    let server_url = store.get(SERVER_URL_KEY).await?.filter(|s| !s.is_empty());
    let raw_region = store.get(SELECTED_REGION_KEY).await?;

    let mut parse_error = None;
    let region = match raw_region {
        Some(raw) => match serde_json::from_str::<RegionDescriptor>(&raw) {
            Ok(region) => Some(region),
            Err(e) => {
                parse_error = Some(e);
                None
            }
        },
        None => None,
    };

    let selection = match (server_url, region) {
        (Some(url), Some(region)) => {
            if url != region.server_url {
                tracing::warn!(
                    stored = %url,
                    region = %region.server_url,
                    "serverUrl disagrees with selectedRegion; using selectedRegion"
                );
            }
            Some(PersistedSelection::from_region(region))
        }
        (None, Some(region)) => Some(PersistedSelection::from_region(region)),
        (Some(url), None) => Some(PersistedSelection {
            server_url: url,
            region: None,
        }),
        (None, None) => None,
    };

    Ok(LoadedSelection {
        selection,
        parse_error,
    })
}

/// Write both selection keys in one batch.
pub async fn save_selection(
    store: &dyn KeyValueStore,
    region: &RegionDescriptor,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(region).map_err(StoreError::Corrupt)?;
    store
        .set_many(&[
            (SERVER_URL_KEY, region.server_url.as_str()),
            (SELECTED_REGION_KEY, encoded.as_str()),
        ])
        .await
}

/// Delete both selection keys. Missing keys are not an error.
pub async fn clear_selection(store: &dyn KeyValueStore) -> Result<(), StoreError> {
    store
        .remove_many(&[SERVER_URL_KEY, SELECTED_REGION_KEY])
        .await
}
