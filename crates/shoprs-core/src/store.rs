//! Typed key-value persistence.
//!
//! Replaces string-interpolated browser storage keys with a small typed
//! interface: values are JSON, addressed by a [`Scope`] (global or one
//! user) and a key, and stored one file per (scope, key) under the app
//! data directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Persistence partition: shared, or owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    User(String),
}

impl Scope {
    fn dir(&self) -> PathBuf {
        match self {
            Scope::Global => PathBuf::from("global"),
            Scope::User(id) => Path::new("users").join(id),
        }
    }
}

/// JSON-file-backed key-value store.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, scope: &Scope, key: &str) -> PathBuf {
        self.root.join(scope.dir()).join(format!("{key}.json"))
    }

    /// Read a value. Missing or corrupt entries come back as `None`;
    /// corruption is logged, matching the original's fall-back-to-empty
    /// behavior.
    pub fn get<T: DeserializeOwned>(&self, scope: &Scope, key: &str) -> Option<T> {
        let path = self.path(scope, key);
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("corrupt store entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write a value, creating the scope directory as needed.
    pub fn set<T: Serialize>(&self, scope: &Scope, key: &str, value: &T) -> Result<()> {
        let path = self.path(scope, key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(value).context("Failed to serialize value")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write store entry: {}", path.display()))
    }

    /// Delete a value. Removing a missing entry is not an error.
    pub fn remove(&self, scope: &Scope, key: &str) -> Result<()> {
        let path = self.path(scope, key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove store entry: {}", path.display())),
        }
    }
}

/// Most-recently-used list update: `entry` moves to the front, existing
/// occurrences are removed, and the list is capped at `cap` entries.
pub fn push_recent(list: &mut Vec<String>, entry: &str, cap: usize) {
    list.retain(|existing| existing != entry);
    list.insert(0, entry.to_string());
    list.truncate(cap);
}
