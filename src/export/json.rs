//! JSON export of data trees
//!
//! Serializes the current data tree to pretty-printed JSON, either as a
//! string for display/download or directly to a file on disk.

use crate::error::{Error, Result};
use crate::tree::{tree_to_json, DataNode};
use log::info;
use std::fs;
use std::path::Path;

/// Serialize a tree to pretty-printed JSON.
pub fn to_pretty_json(tree: &DataNode) -> Result<String> {
    let value = tree_to_json(tree);
    serde_json::to_string_pretty(&value).map_err(Error::from)
}

/// Serialize a tree to compact JSON (single line).
pub fn to_compact_json(tree: &DataNode) -> Result<String> {
    let value = tree_to_json(tree);
    serde_json::to_string(&value).map_err(Error::from)
}

/// Write a tree as pretty-printed JSON to a file.
pub fn write_json_file(path: &Path, tree: &DataNode) -> Result<()> {
    let json = to_pretty_json(tree)?;
    fs::write(path, json).map_err(Error::Io)?;
    info!("Exported JSON to {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
