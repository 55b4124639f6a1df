//! The bidirectional sync core
//!
//! This module holds the five cooperating components of the engine:
//! - `matcher`: leaf-text matching over the rendered document
//! - `locator`: occurrence-rank lookup within a match set
//! - `highlight`: transient fragment highlighting with auto-clear
//! - `observer`: one-render-cycle change observation with debounced batches
//! - `controller`: the orchestrating `SyncController`
//!
//! plus the `debounce` utility they all share (one `Debouncer` per event
//! source, never a shared timer).

mod controller;
mod debounce;
mod highlight;
mod locator;
mod matcher;
mod observer;

pub use controller::{ActiveNode, SelectionOutcome, SyncController};
pub use debounce::Debouncer;
pub use highlight::{Highlighter, DEFAULT_HIGHLIGHT_COLOR};
pub use locator::locate;
pub use matcher::match_fragments;
pub use observer::{ChangeObserver, DEFAULT_MUTATION_DEBOUNCE};
