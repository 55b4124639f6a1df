//! Data tree model, path addressing, and the structured editor
//!
//! This module owns the document side of the sync engine:
//! - `node`: the unified `DataNode` tree with JSON/YAML/TOML parsing
//! - `path`: `NodePath` addressing into a tree
//! - `editor`: the `TreeEditor` collaborator with ordered search

mod editor;
mod node;
mod path;

pub use editor::{EditorMode, MatchField, SearchResult, SearchState, TreeEditor};
pub use node::{
    json_to_tree, parse_json, parse_snapshot, parse_toml, parse_yaml, tree_to_json, DataNode,
    SnapshotFormat,
};
pub use path::{NodePath, PathStep};
