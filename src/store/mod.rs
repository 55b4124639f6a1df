//! Snapshot persistence for data trees
//!
//! Each rendered page persists its data tree under the page's key. The
//! `SnapshotStore` trait is the seam the sync controller talks through:
//! `get` returns the stored snapshot (falling back to the page's default),
//! `set` persists a new snapshot, and `get_default` fetches the pristine
//! document used by the reset flow.
//!
//! Two implementations ship with the crate: `MemoryStore` for session-local
//! state and tests, and `FileStore` for one-JSON-file-per-page persistence
//! in the platform data directory.

mod file;

pub use file::FileStore;

use crate::error::Result;
use crate::tree::DataNode;
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Store Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Keyed persistence of data-tree snapshots.
pub trait SnapshotStore {
    /// The stored snapshot for a page, or that page's default if none is
    /// stored (or the stored one cannot be read).
    fn get(&self, key: &str) -> DataNode;

    /// Persist a snapshot under a page key.
    fn set(&mut self, key: &str, tree: &DataNode) -> Result<()>;

    /// The pristine default snapshot for a page.
    fn get_default(&self, key: &str) -> DataNode;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-Memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// Session-local snapshot store with seedable per-page defaults.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: HashMap<String, DataNode>,
    defaults: HashMap<String, DataNode>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the default snapshot for a page (builder style).
    pub fn with_default(mut self, key: &str, tree: DataNode) -> Self {
        self.defaults.insert(key.to_string(), tree);
        self
    }

    /// Seed or replace the default snapshot for a page.
    pub fn set_default(&mut self, key: &str, tree: DataNode) {
        self.defaults.insert(key.to_string(), tree);
    }

    /// Whether a snapshot has been stored for a page.
    pub fn contains(&self, key: &str) -> bool {
        self.snapshots.contains_key(key)
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> DataNode {
        self.snapshots
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.get_default(key))
    }

    fn set(&mut self, key: &str, tree: &DataNode) -> Result<()> {
        self.snapshots.insert(key.to_string(), tree.clone());
        Ok(())
    }

    fn get_default(&self, key: &str) -> DataNode {
        self.defaults.get(key).cloned().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_json;

    #[test]
    fn test_get_falls_back_to_default() {
        let default = parse_json(r#"{"name": "template"}"#).unwrap();
        let store = MemoryStore::new().with_default("/pages/basic", default.clone());

        assert_eq!(store.get("/pages/basic"), default);
        assert!(!store.contains("/pages/basic"));
    }

    #[test]
    fn test_get_without_default_is_empty_object() {
        let store = MemoryStore::new();
        assert_eq!(store.get("/pages/unknown"), DataNode::default());
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let mut store = MemoryStore::new();
        let tree = parse_json(r#"{"name": "stored"}"#).unwrap();

        store.set("/pages/basic", &tree).unwrap();
        assert_eq!(store.get("/pages/basic"), tree);
        assert!(store.contains("/pages/basic"));
    }

    #[test]
    fn test_stored_snapshot_shadows_default() {
        let default = parse_json(r#"{"name": "template"}"#).unwrap();
        let stored = parse_json(r#"{"name": "edited"}"#).unwrap();
        let mut store = MemoryStore::new().with_default("/pages/basic", default.clone());

        store.set("/pages/basic", &stored).unwrap();
        assert_eq!(store.get("/pages/basic"), stored);
        // The default stays pristine for the reset flow
        assert_eq!(store.get_default("/pages/basic"), default);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = MemoryStore::new();
        let a = parse_json(r#"{"page": "a"}"#).unwrap();
        let b = parse_json(r#"{"page": "b"}"#).unwrap();

        store.set("/pages/a", &a).unwrap();
        store.set("/pages/b", &b).unwrap();
        assert_eq!(store.get("/pages/a"), a);
        assert_eq!(store.get("/pages/b"), b);
    }
}
