//! Clipboard operations for JSON export
//!
//! This module provides cross-platform clipboard functionality for copying
//! the current data tree as JSON using the arboard crate.

use super::json::to_compact_json;
use crate::tree::DataNode;
use arboard::Clipboard;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
    /// JSON serialization failed
    JsonError(crate::error::Error),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
            ClipboardError::JsonError(e) => write!(f, "JSON serialization error: {}", e),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<crate::error::Error> for ClipboardError {
    fn from(err: crate::error::Error) -> Self {
        ClipboardError::JsonError(err)
    }
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Copy a data tree to the system clipboard as compact JSON.
///
/// # Errors
///
/// Returns a `ClipboardError` if the tree cannot be serialized or the
/// clipboard cannot be accessed (e.g. on a headless system).
pub fn copy_json_to_clipboard(tree: &DataNode) -> Result<(), ClipboardError> {
    let json = to_compact_json(tree)?;

    let mut clipboard =
        Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;
    clipboard.set_text(json)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClipboardError::AccessError("no display".to_string());
        assert!(format!("{}", err).contains("no display"));

        let err = ClipboardError::WriteError("denied".to_string());
        assert!(format!("{}", err).contains("denied"));
    }

    #[test]
    fn test_json_error_conversion() {
        let inner = crate::error::Error::Application("test".to_string());
        let err = ClipboardError::from(inner);
        assert!(matches!(err, ClipboardError::JsonError(_)));
    }

    // Clipboard access itself is not exercised here: it requires a display
    // server and would make the suite environment-dependent.
}
