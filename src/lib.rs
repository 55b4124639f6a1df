//! tandem - bidirectional sync between a data tree and its rendered view
//!
//! A user edits a structured document (a tree of key/value data) and sees the
//! effect live in a rendered view; conversely, clicking rendered content
//! locates and selects the data node that produced it. This crate is that
//! synchronization engine:
//!
//! - [`sync::match_fragments`] finds the rendered leaf fragments whose text
//!   equals a target, in document order
//! - [`sync::locate`] turns a clicked fragment into its occurrence rank
//! - [`sync::Highlighter`] paints transient "selected" and "just changed"
//!   highlights with automatic clearing
//! - [`sync::ChangeObserver`] captures one render cycle's content mutations
//!   and delivers a debounced, deduplicated batch of affected elements
//! - [`sync::SyncController`] orchestrates both directions for a page
//!   session, guaranteeing that only one direction is live per user gesture
//!
//! The engine is single-threaded and cooperative: event handlers record
//! `Instant` deadlines and a `tick(now)` pump settles whatever has become
//! due, so every timing behavior is deterministic under test.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tandem::config::SyncSettings;
//! use tandem::store::MemoryStore;
//! use tandem::sync::{match_fragments, SelectionOutcome, SyncController};
//! use tandem::tree::parse_json;
//!
//! let tree = parse_json(r#"{"profile": {"title": "Engineer"}}"#).unwrap();
//! let store = MemoryStore::new().with_default("/pages/demo", tree);
//! let mut controller =
//!     SyncController::new("/pages/demo", Box::new(store), SyncSettings::default());
//!
//! // Click the rendered "Engineer" leaf: the matching data node is selected
//! let now = Instant::now();
//! let doc = controller.surface().document();
//! let leaf = match_fragments(doc, doc.root(), "Engineer")[0];
//! assert_eq!(
//!     controller.handle_render_click(leaf, now),
//!     SelectionOutcome::Selected { rank: 0 }
//! );
//!
//! // Edit the buffer; the change settles into the view after the debounce
//! controller.handle_edit_input("Senior Engineer", now);
//! controller.tick(now + Duration::from_millis(200));
//! assert_eq!(
//!     controller.surface().document().trimmed_text(leaf),
//!     "Senior Engineer"
//! );
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod store;
pub mod sync;
pub mod tree;

pub use error::{Error, Result};
pub use render::{FragmentId, RenderDocument, RenderSurface};
pub use store::{FileStore, MemoryStore, SnapshotStore};
pub use sync::{ActiveNode, SelectionOutcome, SyncController};
pub use tree::{DataNode, NodePath, TreeEditor};
