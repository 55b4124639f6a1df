//! Fragment rank lookup
//!
//! The locator computes a clicked fragment's rank: its zero-based position
//! among the fragments that share its rendered text. The rank is what lets
//! the controller find the right data node even when several rendered
//! fragments carry identical text.

use crate::render::FragmentId;

/// Position of `clicked` within an ordered match set, or `None` if absent.
///
/// `None` means the click landed on something the matcher would never return
/// (a container, a text run) and the caller aborts its selection flow.
pub fn locate(clicked: FragmentId, match_set: &[FragmentId]) -> Option<usize> {
    match_set.iter().position(|&id| id == clicked)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
