//! Best-effort local key-value store
//!
//! Values are kept as one JSON object file, loaded on open and
//! rewritten on each mutation. Persistence is not guaranteed: every
//! fault is logged and absorbed, so a caller can never tell an absent
//! key from a failed read. Network failures get announced to the user;
//! storage failures deliberately do not.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::StorageConfig;
use crate::utils::app_paths::AppPaths;

pub struct LocalStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl LocalStore {
    /// Open the store backed by `path`. A missing file starts empty; a
    /// corrupt one is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::error!(
                        target: "storage",
                        "store file {} is corrupt, starting empty: {}",
                        path.display(),
                        err
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::error!(
                    target: "storage",
                    "cannot read store file {}: {}",
                    path.display(),
                    err
                );
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Open the store at the standard application data location.
    pub fn open_default() -> Self {
        match AppPaths::store_file() {
            Ok(path) => Self::open(path),
            Err(err) => {
                tracing::error!(
                    target: "storage",
                    "cannot resolve store location, using working directory: {}",
                    err
                );
                Self::open("lostfound-store.json")
            }
        }
    }

    /// Open the store at the configured location, falling back to the
    /// standard one.
    pub fn from_config(config: &StorageConfig) -> Self {
        match &config.store_file {
            Some(path) => Self::open(path.clone()),
            None => Self::open_default(),
        }
    }

    /// Serialize `value` under `key`. A value that does not serialize
    /// is logged and the store is left unchanged.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(target: "storage", "cannot serialize value for '{}': {}", key, err);
                return;
            }
        };
        self.entries.insert(key.to_string(), value);
        self.persist();
    }

    /// Fetch and deserialize the value under `key`. Returns `None` for
    /// an absent key or a value that no longer deserializes as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(
                    target: "storage",
                    "stored value under '{}' does not deserialize: {}",
                    key,
                    err
                );
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(target: "storage", "cannot serialize store: {}", err);
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    tracing::error!(
                        target: "storage",
                        "cannot create store directory {}: {}",
                        parent.display(),
                        err
                    );
                    return;
                }
            }
        }
        if let Err(err) = fs::write(&self.path, json) {
            tracing::error!(
                target: "storage",
                "cannot write store file {}: {}",
                self.path.display(),
                err
            );
        }
    }
}
