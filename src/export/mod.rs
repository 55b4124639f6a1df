//! Data export module
//!
//! This module provides functionality for exporting the current data tree:
//! pretty JSON for display or file download, and compact JSON to the system
//! clipboard.
//!
//! # Architecture
//!
//! - `json.rs` - JSON serialization to string and file
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod json;

pub use clipboard::copy_json_to_clipboard;
pub use json::{to_compact_json, to_pretty_json, write_json_file};
