//! Rendered view model
//!
//! This module owns everything on the view side of the sync engine:
//! - `document`: the arena-backed content tree with a mutation journal
//! - `template`: deterministic data-tree → document rendering
//! - `surface`: per-page document ownership with refresh/reload semantics
//! - `viewport`: debounced scale handling for narrow surfaces

mod document;
mod surface;
mod template;
mod viewport;

pub use document::{FragmentId, MutationKind, MutationRecord, RenderDocument};
pub use surface::RenderSurface;
pub use template::{render_document, render_into};
pub use viewport::{scale_for_width, ViewportSync, BASE_WIDTH, DEFAULT_RESIZE_DEBOUNCE};
