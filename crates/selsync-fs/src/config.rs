//! JSON configuration loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::io::{self, FileAccess};
use crate::{Error, NormalizedPath, Result};

/// Configuration store for the JSON files selsync keeps on disk.
///
/// Both the global `config.json` and each project's `sync.json` go through
/// this store: pretty-printed on save, written atomically.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    /// Create a new ConfigStore.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a JSON file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    /// Load configuration, writing and returning `T::default()` when the
    /// file does not exist yet.
    ///
    /// Returns the value together with a flag telling whether it was created.
    pub fn load_or_create<T>(&self, path: &NormalizedPath) -> Result<(T, bool)>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        if path.exists() {
            return Ok((self.load(path)?, false));
        }
        let value = T::default();
        self.save(path, &value)?;
        tracing::info!(path = %path, "Created new default configuration file");
        Ok((value, true))
    }

    /// Save configuration to a JSON file.
    ///
    /// Uses atomic write to prevent corruption.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
            path: path.to_native(),
            message: e.to_string(),
        })?;
        io::write_atomic(path, content.as_bytes(), FileAccess::Shared)
    }
}
