//! Flat in-memory store, for tests and ephemeral embedding.

use std::collections::HashMap;

use serde_json::Value;

use super::{SettingsPath, SettingsStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn flat_key(path: &SettingsPath, key: &str) -> String {
        format!("{}/{}", path.render(), key)
    }

    pub fn get(&self, path: &SettingsPath, key: &str) -> Option<&Value> {
        self.entries.get(&Self::flat_key(path, key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored flat keys, for asserting on layout.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, path: &SettingsPath, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(&Self::flat_key(path, key)).cloned())
    }

    fn save(&mut self, path: &SettingsPath, key: &str, value: &Value) -> Result<(), StoreError> {
        self.entries.insert(Self::flat_key(path, key), value.clone());
        Ok(())
    }
}
