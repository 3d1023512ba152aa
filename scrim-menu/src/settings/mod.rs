//! Persistence: path derivation, the store contract and reference backends.
//!
//! The tree computes a [`SettingsPath`] for every component by walking the
//! containment hierarchy during a load/save pass and hands it to a
//! [`SettingsStore`]. The store decides how paths map onto actual storage.

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Namespace a settings path is rooted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// Settings shared across embedding modules.
    Shared,
    /// Settings owned by one embedding module.
    Module(String),
}

/// Hierarchical key under which a component's values persist: a namespace
/// plus one segment per ancestor (`name + unique_suffix`, root first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPath {
    namespace: Namespace,
    segments: Vec<String>,
}

impl SettingsPath {
    pub fn module(name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::Module(name.into()),
            segments: Vec::new(),
        }
    }

    pub fn shared() -> Self {
        Self {
            namespace: Namespace::Shared,
            segments: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub(crate) fn push(&mut self, segment: String) {
        self.segments.push(segment);
    }

    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment.into());
        path
    }

    /// Flat rendering for diagnostics and flat-keyed stores.
    pub fn render(&self) -> String {
        let namespace = match &self.namespace {
            Namespace::Shared => "shared".to_string(),
            Namespace::Module(module) => format!("module:{module}"),
        };
        let mut rendered = namespace;
        for segment in &self.segments {
            rendered.push('/');
            rendered.push_str(segment);
        }
        rendered
    }
}

impl fmt::Display for SettingsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Store contract consumed by the tree.
///
/// Absence on load is not an error; the control keeps its default.
pub trait SettingsStore {
    fn load(&self, path: &SettingsPath, key: &str) -> Result<Option<Value>, StoreError>;
    fn save(&mut self, path: &SettingsPath, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// Errors produced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stored value: {0}")]
    Format(#[from] serde_json::Error),
}

/// One failed persisted read or write, collected during a recursive pass.
#[derive(Debug)]
pub struct PersistenceFailure {
    pub path: String,
    pub key: String,
    pub error: StoreError,
}

impl PersistenceFailure {
    pub(crate) fn new(path: &SettingsPath, key: String, error: StoreError) -> Self {
        Self {
            path: path.render(),
            key,
            error,
        }
    }
}

/// Batch of per-node persistence failures from one load/save pass. A failure
/// on one subtree never aborts the fan-out to its siblings; everything that
/// went wrong arrives here together.
#[derive(Debug, Error)]
#[error("{} persisted value(s) failed", .failures.len())]
pub struct PersistenceErrors {
    pub failures: Vec<PersistenceFailure>,
}

impl PersistenceErrors {
    pub(crate) fn into_result(failures: Vec<PersistenceFailure>) -> Result<(), PersistenceErrors> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(PersistenceErrors { failures })
        }
    }
}
