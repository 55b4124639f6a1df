//! Sync engine settings
//!
//! This module defines the `SyncSettings` struct that holds all tunable
//! timing and highlight options, with serde support for JSON persistence.
//!
//! Every debounce source owns its own window: edit-buffer input, mutation
//! batches, and viewport resizes are debounced independently and never share
//! a timer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable timing and highlight options.
///
/// This struct is serialized to JSON and persisted to the user's config
/// directory. All fields have sensible defaults via the `Default` trait and
/// `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    // ─────────────────────────────────────────────────────────────────────────
    // Debounce Windows
    // ─────────────────────────────────────────────────────────────────────────
    /// Quiet period for edit-buffer input before the edit is applied (ms)
    pub edit_debounce_ms: u64,

    /// Quiet period for batched render mutations before re-highlighting (ms)
    pub mutation_debounce_ms: u64,

    /// Quiet period for viewport resize events (ms)
    pub resize_debounce_ms: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Highlighting
    // ─────────────────────────────────────────────────────────────────────────
    /// How long the selected fragment stays highlighted (ms)
    pub selected_highlight_ms: u64,

    /// How long a just-changed fragment stays highlighted (ms)
    pub changed_highlight_ms: u64,

    /// Highlight background color (CSS hex)
    pub highlight_color: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection Behavior
    // ─────────────────────────────────────────────────────────────────────────
    /// Whether a successful click resolution moves focus to the edit buffer
    pub focus_on_select: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            // Debounce Windows
            edit_debounce_ms: 100,
            mutation_debounce_ms: 100,
            resize_debounce_ms: 500,

            // Highlighting
            selected_highlight_ms: 10_000,
            changed_highlight_ms: 500,
            highlight_color: String::from("#fff566"),

            // Selection Behavior
            focus_on_select: true,
        }
    }
}

impl SyncSettings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed debounce window.
    pub const MIN_DEBOUNCE_MS: u64 = 10;
    /// Maximum allowed debounce window.
    pub const MAX_DEBOUNCE_MS: u64 = 5_000;
    /// Minimum allowed highlight duration.
    pub const MIN_HIGHLIGHT_MS: u64 = 50;
    /// Maximum allowed highlight duration.
    pub const MAX_HIGHLIGHT_MS: u64 = 60_000;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.edit_debounce_ms = self
            .edit_debounce_ms
            .clamp(Self::MIN_DEBOUNCE_MS, Self::MAX_DEBOUNCE_MS);
        self.mutation_debounce_ms = self
            .mutation_debounce_ms
            .clamp(Self::MIN_DEBOUNCE_MS, Self::MAX_DEBOUNCE_MS);
        self.resize_debounce_ms = self
            .resize_debounce_ms
            .clamp(Self::MIN_DEBOUNCE_MS, Self::MAX_DEBOUNCE_MS);

        self.selected_highlight_ms = self
            .selected_highlight_ms
            .clamp(Self::MIN_HIGHLIGHT_MS, Self::MAX_HIGHLIGHT_MS);
        self.changed_highlight_ms = self
            .changed_highlight_ms
            .clamp(Self::MIN_HIGHLIGHT_MS, Self::MAX_HIGHLIGHT_MS);

        if !is_valid_color(&self.highlight_color) {
            self.highlight_color = Self::default().highlight_color;
        }
    }

    /// Parse settings from JSON, then sanitize the loaded values.
    pub fn from_json_sanitized(json: &str) -> serde_json::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Duration Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Edit-buffer debounce window.
    pub fn edit_debounce(&self) -> Duration {
        Duration::from_millis(self.edit_debounce_ms)
    }

    /// Mutation-batch debounce window.
    pub fn mutation_debounce(&self) -> Duration {
        Duration::from_millis(self.mutation_debounce_ms)
    }

    /// Viewport resize debounce window.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Selected-fragment highlight duration.
    pub fn selected_highlight(&self) -> Duration {
        Duration::from_millis(self.selected_highlight_ms)
    }

    /// Just-changed highlight duration.
    pub fn changed_highlight(&self) -> Duration {
        Duration::from_millis(self.changed_highlight_ms)
    }
}

/// Accept `#rgb` and `#rrggbb` hex colors.
fn is_valid_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.edit_debounce_ms, 100);
        assert_eq!(settings.mutation_debounce_ms, 100);
        assert_eq!(settings.resize_debounce_ms, 500);
        assert_eq!(settings.selected_highlight_ms, 10_000);
        assert_eq!(settings.changed_highlight_ms, 500);
        assert_eq!(settings.highlight_color, "#fff566");
        assert!(settings.focus_on_select);
    }

    #[test]
    fn test_duration_accessors() {
        let settings = SyncSettings::default();
        assert_eq!(settings.edit_debounce(), Duration::from_millis(100));
        assert_eq!(settings.selected_highlight(), Duration::from_secs(10));
    }

    #[test]
    fn test_sanitize_clamps_debounce_windows() {
        let mut settings = SyncSettings {
            edit_debounce_ms: 0,
            mutation_debounce_ms: 99_999,
            ..SyncSettings::default()
        };
        settings.sanitize();
        assert_eq!(settings.edit_debounce_ms, SyncSettings::MIN_DEBOUNCE_MS);
        assert_eq!(settings.mutation_debounce_ms, SyncSettings::MAX_DEBOUNCE_MS);
    }

    #[test]
    fn test_sanitize_replaces_invalid_color() {
        let mut settings = SyncSettings {
            highlight_color: "yellowish".to_string(),
            ..SyncSettings::default()
        };
        settings.sanitize();
        assert_eq!(settings.highlight_color, "#fff566");
    }

    #[test]
    fn test_sanitize_accepts_short_hex() {
        let mut settings = SyncSettings {
            highlight_color: "#ff0".to_string(),
            ..SyncSettings::default()
        };
        settings.sanitize();
        assert_eq!(settings.highlight_color, "#ff0");
    }

    #[test]
    fn test_from_json_sanitized() {
        let settings =
            SyncSettings::from_json_sanitized(r##"{"edit_debounce_ms": 1, "highlight_color": "#abc123"}"##)
                .unwrap();
        assert_eq!(settings.edit_debounce_ms, SyncSettings::MIN_DEBOUNCE_MS);
        assert_eq!(settings.highlight_color, "#abc123");
        // Missing fields take defaults
        assert_eq!(settings.mutation_debounce_ms, 100);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let result = SyncSettings::from_json_sanitized(r#"{"future_feature": true}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_serialization_round_trip() {
        let original = SyncSettings {
            edit_debounce_ms: 250,
            focus_on_select: false,
            ..SyncSettings::default()
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let loaded: SyncSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, loaded);
    }
}
