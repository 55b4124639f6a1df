//! Transient fragment highlighting
//!
//! The highlighter paints a fragment's background and schedules its automatic
//! clearing. Two uses share the mechanism: the "selected" highlight on the
//! active fragment (long duration, replaced on the next selection) and the
//! short-lived "just changed" flashes the observer requests after an edit.
//!
//! A zero duration clears immediately and cancels any pending auto-clear.
//! Re-highlighting a fragment before its timer fires simply reschedules —
//! last call wins. Highlight writes are cosmetic: the render document keeps
//! them out of its mutation journal, so they can never feed back into change
//! observation.

use crate::render::{FragmentId, RenderDocument};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default highlight color (soft yellow).
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#fff566";

/// Schedules and clears per-fragment background highlights.
#[derive(Debug, Default)]
pub struct Highlighter {
    /// Pending auto-clear deadlines, one per highlighted fragment
    deadlines: HashMap<FragmentId, Instant>,
}

impl Highlighter {
    /// Create an empty highlighter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight a fragment for `duration`, or clear it when `duration` is
    /// zero.
    ///
    /// Returns false (and does nothing) when the fragment has no stylable
    /// surface, i.e. it is a text run rather than an element.
    pub fn highlight(
        &mut self,
        doc: &mut RenderDocument,
        fragment: FragmentId,
        duration: Duration,
        color: &str,
        now: Instant,
    ) -> bool {
        if duration.is_zero() {
            return self.clear(doc, fragment);
        }
        if !doc.set_background(fragment, Some(color)) {
            return false;
        }
        // Last call wins: any earlier deadline for this fragment is replaced
        self.deadlines.insert(fragment, now + duration);
        true
    }

    /// Clear a fragment's highlight immediately, cancelling its auto-clear.
    pub fn clear(&mut self, doc: &mut RenderDocument, fragment: FragmentId) -> bool {
        self.deadlines.remove(&fragment);
        doc.set_background(fragment, None)
    }

    /// Clear every expired highlight. Call from the owner's tick pump.
    pub fn tick(&mut self, doc: &mut RenderDocument, now: Instant) {
        let expired: Vec<FragmentId> = self
            .deadlines
            .iter()
            .filter(|(_, &deadline)| now >= deadline)
            .map(|(&fragment, _)| fragment)
            .collect();
        for fragment in expired {
            self.deadlines.remove(&fragment);
            doc.set_background(fragment, None);
        }
    }

    /// Whether a fragment currently has a scheduled highlight.
    pub fn is_highlighted(&self, fragment: FragmentId) -> bool {
        self.deadlines.contains_key(&fragment)
    }

    /// Number of fragments with scheduled highlights.
    pub fn active_count(&self) -> usize {
        self.deadlines.len()
    }

    /// Drop all deadlines without touching any document.
    ///
    /// Used when the surface reloads: the old fragment ids are stale and the
    /// fresh document carries no backgrounds to clear.
    pub fn clear_all(&mut self) {
        self.deadlines.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
