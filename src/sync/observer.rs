//! Change observation over the rendered document
//!
//! The observer watches the render document's mutation journal for the
//! content changes a data push causes, debounces the burst, and reports the
//! affected elements so they can be flashed as "just changed".
//!
//! The lifecycle is explicit: `arm` snapshots the journal watermark *before*
//! the write that will trigger re-rendering; `observe` collects exactly the
//! records written since arming and self-disarms, so one armed window
//! captures one render cycle and never re-fires on unrelated later activity.
//! `poll` delivers the batch once the mutation debounce window has been
//! quiet.

use crate::render::{FragmentId, RenderDocument};
use crate::sync::debounce::Debouncer;
use std::time::{Duration, Instant};

/// Default quiet period for mutation bursts.
pub const DEFAULT_MUTATION_DEBOUNCE: Duration = Duration::from_millis(100);

/// Observes one render cycle's content mutations at a time.
#[derive(Debug)]
pub struct ChangeObserver {
    /// Journal watermark taken at arm time; `None` while disarmed
    watermark: Option<usize>,
    /// Affected elements awaiting delivery, deduplicated, first-seen order
    pending: Vec<FragmentId>,
    /// Quiet-period timer for the pending batch
    debounce: Debouncer,
}

impl Default for ChangeObserver {
    fn default() -> Self {
        Self::new(DEFAULT_MUTATION_DEBOUNCE)
    }
}

impl ChangeObserver {
    /// Create an observer with the given mutation debounce window.
    pub fn new(window: Duration) -> Self {
        Self {
            watermark: None,
            pending: Vec::new(),
            debounce: Debouncer::new(window),
        }
    }

    /// Whether the observer is currently armed.
    pub fn is_armed(&self) -> bool {
        self.watermark.is_some()
    }

    /// Arm the observer: snapshot the journal watermark.
    ///
    /// Must happen strictly before the write whose re-render should be
    /// captured; re-arming replaces a previous watermark.
    pub fn arm(&mut self, doc: &RenderDocument) {
        self.watermark = Some(doc.mark());
    }

    /// Drop the armed watermark without collecting anything.
    pub fn disarm(&mut self) {
        self.watermark = None;
    }

    /// Collect the records written since arming and self-disarm.
    ///
    /// Each record resolves to its affected element (the target for element
    /// records, the parent for text-only records); duplicates collapse into
    /// one entry. Returns the number of raw records seen. A disarmed
    /// observer collects nothing.
    pub fn observe(&mut self, doc: &RenderDocument, now: Instant) -> usize {
        let Some(mark) = self.watermark.take() else {
            return 0;
        };
        let records = doc.records_since(mark);
        if records.is_empty() {
            return 0;
        }
        for record in records {
            if let Some(element) = doc.affected_element(record) {
                if !self.pending.contains(&element) {
                    self.pending.push(element);
                }
            }
        }
        self.debounce.trigger(now);
        records.len()
    }

    /// Deliver the pending batch once the debounce window has been quiet.
    ///
    /// Returns the deduplicated affected elements, in first-seen order, at
    /// most once per collected burst.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<FragmentId>> {
        if !self.debounce.poll(now) || self.pending.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.pending))
    }

    /// Forget everything: watermark, pending batch, and timer.
    ///
    /// Used when the surface reloads and old fragment ids become stale.
    pub fn reset(&mut self) {
        self.watermark = None;
        self.pending.clear();
        self.debounce.cancel();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
