//! File-backed snapshot store
//!
//! Persists one pretty-printed JSON file per page key under a data
//! directory (the platform data dir by default). Writes are atomic: the
//! snapshot is written to a backup file first and renamed over the original.
//! Unreadable or corrupted snapshots degrade to the page's default with a
//! warning rather than failing the caller.

use crate::error::{Error, Result, ResultExt};
use crate::store::SnapshotStore;
use crate::tree::{json_to_tree, tree_to_json, DataNode};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Application name used for the data directory.
const APP_NAME: &str = "tandem";

/// Subdirectory holding snapshot files.
const SNAPSHOT_DIR_NAME: &str = "snapshots";

/// One-JSON-file-per-page snapshot store.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    defaults: HashMap<String, DataNode>,
}

impl FileStore {
    /// Open a store in the platform data directory
    /// (e.g. `~/.local/share/tandem/snapshots` on Linux).
    ///
    /// # Errors
    ///
    /// Returns `Error::DataDirNotFound` if the platform data directory
    /// cannot be determined.
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir().ok_or(Error::DataDirNotFound)?;
        Ok(Self::with_dir(base.join(APP_NAME).join(SNAPSHOT_DIR_NAME)))
    }

    /// Open a store rooted at an explicit directory.
    ///
    /// The directory is created lazily on the first write.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            defaults: HashMap::new(),
        }
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

    /// The file a page key persists to.
    ///
    /// Keys are sanitized to a flat file name: runs of non-alphanumeric
    /// characters collapse to single dashes, so `/pages/react1` becomes
    /// `pages-react1.json`.
    pub fn file_path(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        let mut last_was_dash = true;
        for ch in key.chars() {
            if ch.is_ascii_alphanumeric() {
                name.push(ch);
                last_was_dash = false;
            } else if !last_was_dash {
                name.push('-');
                last_was_dash = true;
            }
        }
        let name = name.trim_end_matches('-');
        let name = if name.is_empty() { "default" } else { name };
        self.dir.join(format!("{}.json", name))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            debug!("Creating snapshot directory: {}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|e| Error::StoreSave {
                path: self.dir.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<DataNode>> {
        let path = self.file_path(key);
        if !path.exists() {
            debug!("No snapshot at {}, using default", path.display());
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| Error::StoreLoad {
            path: path.clone(),
            source: Box::new(e),
        })?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| Error::StoreLoad {
                path: path.clone(),
                source: Box::new(e),
            })?;
        Ok(Some(json_to_tree(&value)))
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> DataNode {
        let context = format!("Failed to load snapshot for '{}'", key);
        self.load(key)
            .unwrap_or_warn_default(None, &context)
            .unwrap_or_else(|| self.get_default(key))
    }

    fn set(&mut self, key: &str, tree: &DataNode) -> Result<()> {
        self.ensure_dir()?;
        let path = self.file_path(key);
        let backup = path.with_extension("json.bak");

        let json =
            serde_json::to_string_pretty(&tree_to_json(tree)).map_err(|e| Error::StoreSave {
                path: path.clone(),
                source: Box::new(e),
            })?;

        // Write to backup file first (atomic write pattern)
        fs::write(&backup, &json).map_err(|e| Error::StoreSave {
            path: backup.clone(),
            source: Box::new(e),
        })?;
        fs::rename(&backup, &path).map_err(|e| Error::StoreSave {
            path: path.clone(),
            source: Box::new(e),
        })?;

        info!("Snapshot for '{}' saved to {}", key, path.display());
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
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::with_dir(dir.path().join("snapshots"));
        (dir, store)
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let (_dir, mut store) = temp_store();
        let tree = parse_json(r#"{"profile": {"name": "Avery"}, "skills": ["Rust"]}"#).unwrap();

        store.set("/pages/basic", &tree).unwrap();
        assert_eq!(store.get("/pages/basic"), tree);
    }

    #[test]
    fn test_get_missing_returns_default() {
        let default = parse_json(r#"{"name": "template"}"#).unwrap();
        let (_dir, store) = temp_store();
        let store = store.with_default("/pages/basic", default.clone());

        assert_eq!(store.get("/pages/basic"), default);
    }

    #[test]
    fn test_corrupted_snapshot_degrades_to_default() {
        let default = parse_json(r#"{"name": "template"}"#).unwrap();
        let (_dir, mut store) = temp_store();
        store.set_default("/pages/basic", default.clone());

        // Write valid, then corrupt the file on disk
        store.set("/pages/basic", &default).unwrap();
        fs::write(store.file_path("/pages/basic"), "{ not json }").unwrap();

        assert_eq!(store.get("/pages/basic"), default);
    }

    #[test]
    fn test_key_sanitization() {
        let (_dir, store) = temp_store();
        let path = store.file_path("/pages/react1");
        assert!(path.to_string_lossy().ends_with("pages-react1.json"));

        let path = store.file_path("///");
        assert!(path.to_string_lossy().ends_with("default.json"));
    }

    #[test]
    fn test_distinct_keys_get_distinct_files() {
        let (_dir, store) = temp_store();
        assert_ne!(store.file_path("/pages/a"), store.file_path("/pages/b"));
    }

    #[test]
    fn test_write_is_pretty_json() {
        let (_dir, mut store) = temp_store();
        let tree = parse_json(r#"{"a": 1}"#).unwrap();
        store.set("/pages/basic", &tree).unwrap();

        let contents = fs::read_to_string(store.file_path("/pages/basic")).unwrap();
        assert!(contents.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_overwrite_replaces_snapshot() {
        let (_dir, mut store) = temp_store();
        let first = parse_json(r#"{"v": 1}"#).unwrap();
        let second = parse_json(r#"{"v": 2}"#).unwrap();

        store.set("/pages/basic", &first).unwrap();
        store.set("/pages/basic", &second).unwrap();
        assert_eq!(store.get("/pages/basic"), second);

        // No stray backup file is left behind
        let backup = store.file_path("/pages/basic").with_extension("json.bak");
        assert!(!backup.exists());
    }
}
