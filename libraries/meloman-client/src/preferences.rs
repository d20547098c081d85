//! Persisted user preferences
//!
//! A handful of small settings blobs live in a string key-value store, each
//! value a JSON document. A value that is missing or cannot be parsed reads
//! as the default.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Concert lookup location
pub const KEY_CONCERT_CONFIG: &str = "concert_config";

/// Recommendation service endpoint
pub const KEY_AUDIOMUSE_CONFIG: &str = "audiomuse_config";

/// Last volume level (0-100)
pub const KEY_VOLUME: &str = "volume";

/// String key-value storage
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store kept in memory only
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk
///
/// The whole file is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = ?path, error = %e, "Preference file unreadable, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = ?path, entries = values.len(), "Opened preference store");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Where to look for concerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcertConfig {
    pub city: String,
    pub country: String,
    /// Search radius in kilometres
    pub radius: u32,
}

impl Default for ConcertConfig {
    fn default() -> Self {
        Self {
            city: String::new(),
            country: String::new(),
            radius: 100,
        }
    }
}

/// AudioMuse-AI recommendation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioMuseConfig {
    pub url: String,
    pub enabled: bool,
}

impl AudioMuseConfig {
    /// Enabled and pointing somewhere
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.url.trim().is_empty()
    }
}

/// Typed access to the preference blobs
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn concert_config(&self) -> ConcertConfig {
        self.load(KEY_CONCERT_CONFIG)
    }

    pub fn set_concert_config(&mut self, config: &ConcertConfig) -> Result<()> {
        self.save(KEY_CONCERT_CONFIG, config)
    }

    pub fn audiomuse_config(&self) -> AudioMuseConfig {
        self.load(KEY_AUDIOMUSE_CONFIG)
    }

    pub fn set_audiomuse_config(&mut self, config: &AudioMuseConfig) -> Result<()> {
        self.save(KEY_AUDIOMUSE_CONFIG, config)
    }

    /// Stored volume, if any (clamped to 100)
    pub fn volume(&self) -> Option<u8> {
        self.load::<Option<u8>>(KEY_VOLUME).map(|v| v.min(100))
    }

    pub fn set_volume(&mut self, level: u8) -> Result<()> {
        self.save(KEY_VOLUME, &level)
    }

    /// Forget a stored blob
    pub fn reset(&mut self, key: &str) -> Result<()> {
        self.store.remove(key)
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.store.get(key) else {
            return T::default();
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Stored preference unreadable, using default");
                T::default()
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, raw)
    }
}
