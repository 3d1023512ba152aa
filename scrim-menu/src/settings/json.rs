//! One-file-per-value JSON store.
//!
//! Each path segment becomes a directory; each value becomes a small
//! `<key>.json` file, so a persisted tree stays human-editable.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;

use super::{Namespace, SettingsPath, SettingsStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base: PathBuf,
}

impl JsonFileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Per-user config location for the given application name, or None when
    /// the platform exposes no home directory.
    pub fn default_location(app: &str) -> Option<Self> {
        directories::ProjectDirs::from("", "", app).map(|dirs| Self::new(dirs.config_dir()))
    }

    pub fn base(&self) -> &std::path::Path {
        &self.base
    }

    fn dir_for(&self, path: &SettingsPath) -> PathBuf {
        let mut dir = self.base.clone();
        match path.namespace() {
            Namespace::Shared => dir.push("shared"),
            Namespace::Module(module) => {
                dir.push("modules");
                dir.push(module);
            }
        }
        for segment in path.segments() {
            dir.push(segment);
        }
        dir
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self, path: &SettingsPath, key: &str) -> Result<Option<Value>, StoreError> {
        let file = self.dir_for(path).join(format!("{key}.json"));
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, path: &SettingsPath, key: &str, value: &Value) -> Result<(), StoreError> {
        let dir = self.dir_for(path);
        fs::create_dir_all(&dir)?;
        let text = serde_json::to_string_pretty(value)?;
        fs::write(dir.join(format!("{key}.json")), text)?;
        Ok(())
    }
}
