//! Viewport scaling for narrow surfaces
//!
//! Surfaces narrower than the 800-unit base width scale the rendered page
//! down proportionally so the full width stays visible. Resize events arrive
//! in bursts while the user drags, so the recalculation sits behind its own
//! 500 ms debouncer, independent of the edit and mutation timers.

use crate::sync::Debouncer;
use std::time::{Duration, Instant};

/// Design width the rendered page is laid out for.
pub const BASE_WIDTH: f32 = 800.0;

/// Default quiet period for resize bursts.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Scale factor for a surface of the given width, rounded to two decimals.
///
/// Widths at or above the base width render at natural size.
pub fn scale_for_width(width: f32) -> f32 {
    if width >= BASE_WIDTH || width <= 0.0 {
        return 1.0;
    }
    (width / BASE_WIDTH * 100.0).round() / 100.0
}

/// Debounced viewport scale tracking.
#[derive(Debug)]
pub struct ViewportSync {
    debounce: Debouncer,
    pending_width: Option<f32>,
    scale: f32,
}

impl Default for ViewportSync {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl ViewportSync {
    /// Create with a custom resize debounce window.
    pub fn new(window: Duration) -> Self {
        Self {
            debounce: Debouncer::new(window),
            pending_width: None,
            scale: 1.0,
        }
    }

    /// The current (settled) scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Record a resize event; restarts the quiet period.
    pub fn handle_resize(&mut self, width: f32, now: Instant) {
        self.pending_width = Some(width);
        self.debounce.trigger(now);
    }

    /// Settle a resize burst. Returns the new scale when one was applied.
    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        if !self.debounce.poll(now) {
            return None;
        }
        let width = self.pending_width.take()?;
        self.scale = scale_for_width(width);
        Some(self.scale)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_scale_wide_surface_is_natural() {
        assert_eq!(scale_for_width(800.0), 1.0);
        assert_eq!(scale_for_width(1920.0), 1.0);
    }

    #[test]
    fn test_scale_narrow_surface_rounds_to_two_decimals() {
        assert_eq!(scale_for_width(400.0), 0.5);
        assert_eq!(scale_for_width(600.0), 0.75);
        assert_eq!(scale_for_width(333.0), 0.42);
    }

    #[test]
    fn test_scale_degenerate_width() {
        assert_eq!(scale_for_width(0.0), 1.0);
        assert_eq!(scale_for_width(-10.0), 1.0);
    }

    #[test]
    fn test_resize_burst_settles_once() {
        let t0 = Instant::now();
        let mut viewport = ViewportSync::new(ms(500));

        viewport.handle_resize(700.0, t0);
        viewport.handle_resize(600.0, t0 + ms(100));
        viewport.handle_resize(400.0, t0 + ms(200));

        // Still dragging: nothing settles mid-burst
        assert_eq!(viewport.poll(t0 + ms(400)), None);

        // Quiet period after the last event
        assert_eq!(viewport.poll(t0 + ms(700)), Some(0.5));
        assert_eq!(viewport.scale(), 0.5);

        // No re-fire without a new resize
        assert_eq!(viewport.poll(t0 + ms(1500)), None);
    }
}
