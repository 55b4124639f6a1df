//! Sync controller
//!
//! The controller orchestrates the two synchronization directions for one
//! page session:
//!
//! - **edit → view**: debounced edit-buffer input is pushed into the active
//!   rendered fragment and the data tree, persisted, and the resulting
//!   mutations are observed and flashed as "just changed".
//! - **view → edit**: a click on a rendered fragment is resolved through the
//!   matcher and locator to an occurrence rank, cross-referenced into the
//!   editor's search results, and the matching data node becomes the active
//!   selection.
//!
//! Both directions write the single `ActiveNode`; only one direction runs per
//! user gesture, and the edit path arms the change observer strictly before
//! any content write, so a write-back can never re-trigger its own listener.
//!
//! Failure philosophy: clicks that resolve to nothing are common and
//! expected. Every failure on the click path is a silent no-op expressed as a
//! `SelectionOutcome`; nothing on this path returns an error.

use crate::config::SyncSettings;
use crate::render::{FragmentId, RenderSurface, ViewportSync};
use crate::store::SnapshotStore;
use crate::sync::debounce::Debouncer;
use crate::sync::highlight::Highlighter;
use crate::sync::locator::locate;
use crate::sync::matcher::match_fragments;
use crate::sync::observer::ChangeObserver;
use crate::tree::{DataNode, EditorMode, NodePath, TreeEditor};
use log::{debug, warn};
use std::time::Instant;

// ─────────────────────────────────────────────────────────────────────────────
// Active Node
// ─────────────────────────────────────────────────────────────────────────────

/// The currently selected (data leaf, rendered fragment) pair.
///
/// At most one is live at a time. It is set by a successful click resolution
/// and cleared when the surface reloads or another selection replaces it;
/// clearing drops the highlight but leaves the fragment itself intact.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveNode {
    /// The selected leaf's raw text
    pub text: String,
    /// The rendered fragment the leaf produced
    pub fragment: FragmentId,
    /// Path of the data leaf inside the tree
    pub path: NodePath,
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Result of resolving a render click. Every variant is a valid, non-error
/// outcome; anything but `Selected` leaves all selection state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The click resolved; `rank` is the fragment's occurrence rank among
    /// identically-texted fragments
    Selected { rank: usize },
    /// The clicked fragment has no text to match on
    EmptyTarget,
    /// The clicked fragment is not a matchable leaf (container or text run)
    NotALeaf,
    /// The render-side rank has no counterpart among the editor's search
    /// results; the two enumerations disagree
    RankMismatch,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sync Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Orchestrates matcher, locator, highlighter, and observer for one page.
///
/// Constructed once per page session; all event handlers receive the
/// controller explicitly. Timing is cooperative: handlers record deadlines
/// and `tick(now)` settles whatever has become due.
pub struct SyncController {
    settings: SyncSettings,
    surface: RenderSurface,
    editor: TreeEditor,
    store: Box<dyn SnapshotStore>,

    highlighter: Highlighter,
    observer: ChangeObserver,
    edit_debounce: Debouncer,
    viewport: ViewportSync,

    active: Option<ActiveNode>,
    edit_buffer: String,
    buffer_focused: bool,
    pending_edit: Option<String>,
}

impl SyncController {
    /// Open a page session: load the page's snapshot from the store and
    /// stand up the editor and rendering surface over it.
    pub fn new(page_key: &str, store: Box<dyn SnapshotStore>, settings: SyncSettings) -> Self {
        let tree = store.get(page_key);
        let editor = TreeEditor::new(tree.clone());
        let surface = RenderSurface::new(page_key, &tree);

        Self {
            highlighter: Highlighter::new(),
            observer: ChangeObserver::new(settings.mutation_debounce()),
            edit_debounce: Debouncer::new(settings.edit_debounce()),
            viewport: ViewportSync::new(settings.resize_debounce()),
            settings,
            surface,
            editor,
            store,
            active: None,
            edit_buffer: String::new(),
            buffer_focused: false,
            pending_edit: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The rendering surface.
    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    /// Mutable access to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut RenderSurface {
        &mut self.surface
    }

    /// The structured editor.
    pub fn editor(&self) -> &TreeEditor {
        &self.editor
    }

    /// Mutable access to the structured editor.
    pub fn editor_mut(&mut self) -> &mut TreeEditor {
        &mut self.editor
    }

    /// The snapshot store.
    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    /// The controller's settings.
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// The currently selected node, if any.
    pub fn active_node(&self) -> Option<&ActiveNode> {
        self.active.as_ref()
    }

    /// The edit buffer's current text.
    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// Whether the edit buffer holds input focus.
    pub fn is_buffer_focused(&self) -> bool {
        self.buffer_focused
    }

    /// The current viewport scale.
    pub fn viewport_scale(&self) -> f32 {
        self.viewport.scale()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View → Edit: Click Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve a click on a rendered fragment to a data-node selection.
    ///
    /// The clicked fragment's rank among identically-texted fragments is
    /// cross-referenced into the editor's search results: both sides
    /// enumerate in pre-order, so the Nth rendered occurrence pairs with the
    /// Nth exact-value search hit. A disagreement between the two
    /// enumerations is reported as `RankMismatch` with a diagnostic, never
    /// as a wrong selection.
    pub fn handle_render_click(&mut self, clicked: FragmentId, now: Instant) -> SelectionOutcome {
        let text = self.surface.document().trimmed_text(clicked);
        if text.is_empty() {
            return SelectionOutcome::EmptyTarget;
        }

        // Selection only works against the tree view
        if self.editor.mode() == EditorMode::Code {
            self.editor.set_mode(EditorMode::Tree);
        }

        let matches = {
            let doc = self.surface.document();
            match_fragments(doc, doc.root(), &text)
        };
        let Some(rank) = locate(clicked, &matches) else {
            return SelectionOutcome::NotALeaf;
        };

        self.editor.search(&text);

        // Walk the ordered results counting exact value occurrences until
        // the occurrence count reaches the rendered rank
        let mut occurrence = 0usize;
        let mut selected = None;
        for (index, result) in self.editor.search_state().results().iter().enumerate() {
            if result.is_value() && result.text == text {
                if occurrence == rank {
                    selected = Some(index);
                    break;
                }
                occurrence += 1;
            }
        }

        let Some(index) = selected else {
            warn!(
                "Rendered occurrence {} of '{}' has no counterpart in search results \
                 (editor enumerated {} exact occurrences); enumeration orders disagree",
                rank, text, occurrence
            );
            return SelectionOutcome::RankMismatch;
        };

        self.editor.select_result(index);
        let path = match self.editor.active_result() {
            Some(result) => result.path.clone(),
            None => return SelectionOutcome::RankMismatch,
        };

        // Deactivate the previous highlight before activating the new one
        if let Some(previous) = self.active.take() {
            self.highlighter
                .clear(self.surface.document_mut(), previous.fragment);
        }
        let color = self.settings.highlight_color.clone();
        let duration = self.settings.selected_highlight();
        self.highlighter
            .highlight(self.surface.document_mut(), clicked, duration, &color, now);

        self.edit_buffer = text.clone();
        self.buffer_focused = self.settings.focus_on_select;
        self.active = Some(ActiveNode {
            text,
            fragment: clicked,
            path,
        });

        debug!("Selected fragment {} at rank {}", clicked, rank);
        SelectionOutcome::Selected { rank }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edit → View: Edit Propagation
    // ─────────────────────────────────────────────────────────────────────────

    /// Record edit-buffer input. No-op without an active selection.
    ///
    /// The write is applied once the input has been quiet for the edit
    /// debounce window; each keystroke restarts the window.
    pub fn handle_edit_input(&mut self, text: &str, now: Instant) {
        if self.active.is_none() {
            return;
        }
        self.edit_buffer = text.to_string();
        self.pending_edit = Some(text.to_string());
        self.edit_debounce.trigger(now);
    }

    /// Apply the settled edit: arm the observer, push the text into the
    /// rendered fragment and the data leaf, persist the snapshot, then
    /// collect this cycle's mutations.
    fn apply_pending_edit(&mut self, now: Instant) {
        let Some(text) = self.pending_edit.take() else {
            return;
        };
        let Some(active) = self.active.clone() else {
            return;
        };

        // Arm strictly before any content write so the resulting render
        // mutations land inside the observed window
        self.observer.arm(self.surface.document());

        self.surface
            .document_mut()
            .set_text_content(active.fragment, &text);

        if !self.editor.set_value_at(&active.path, &text) {
            warn!(
                "Active path {} no longer resolves; data tree left unchanged",
                active.path
            );
        }

        let key = self.surface.page_key().to_string();
        if let Err(e) = self.store.set(&key, self.editor.get()) {
            warn!("Failed to persist snapshot for '{}': {}", key, e);
        }

        // Collect exactly this cycle's records; the observer self-disarms
        self.observer.observe(self.surface.document(), now);

        if let Some(active) = self.active.as_mut() {
            active.text = text;
        }
    }

    /// Push a whole replacement tree from the structured editor.
    ///
    /// Used when the user edits the document through the tree view rather
    /// than the edit buffer: persist, refresh the surface in place, and
    /// observe the re-render so the affected region re-highlights.
    pub fn push_tree(&mut self, tree: DataNode, now: Instant) {
        self.observer.arm(self.surface.document());

        let key = self.surface.page_key().to_string();
        if let Err(e) = self.store.set(&key, &tree) {
            warn!("Failed to persist snapshot for '{}': {}", key, e);
        }

        self.editor.set(tree.clone());
        self.surface.refresh(&tree);

        self.observer.observe(self.surface.document(), now);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Surface Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Reload the rendering surface from the editor's current tree.
    ///
    /// All fragment ids become stale, so the selection resets.
    pub fn reload_surface(&mut self) {
        let tree = self.editor.get().clone();
        self.surface.reload(&tree);
        self.handle_surface_load();
    }

    /// React to the surface having (re)loaded: drop every reference into the
    /// old document.
    pub fn handle_surface_load(&mut self) {
        self.active = None;
        self.edit_buffer.clear();
        self.pending_edit = None;
        self.buffer_focused = false;
        self.edit_debounce.cancel();
        self.highlighter.clear_all();
        self.observer.reset();
    }

    /// Overwrite the stored snapshot with the page's default and reload
    /// everything from it.
    pub fn reset_to_default(&mut self) {
        let key = self.surface.page_key().to_string();
        let default = self.store.get_default(&key);
        if let Err(e) = self.store.set(&key, &default) {
            warn!("Failed to persist default snapshot for '{}': {}", key, e);
        }
        self.editor.set(default.clone());
        self.surface.reload(&default);
        self.handle_surface_load();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Viewport
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a viewport resize event (debounced).
    pub fn handle_resize(&mut self, width: f32, now: Instant) {
        self.viewport.handle_resize(width, now);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick Pump
    // ─────────────────────────────────────────────────────────────────────────

    /// Settle everything that has become due: pending edits, observed
    /// mutation batches, expired highlights, and resize bursts.
    pub fn tick(&mut self, now: Instant) {
        if self.edit_debounce.poll(now) {
            self.apply_pending_edit(now);
        }

        if let Some(batch) = self.observer.poll(now) {
            let color = self.settings.highlight_color.clone();
            let duration = self.settings.changed_highlight();
            for fragment in batch {
                self.highlighter.highlight(
                    self.surface.document_mut(),
                    fragment,
                    duration,
                    &color,
                    now,
                );
            }
        }

        self.highlighter.tick(self.surface.document_mut(), now);

        if let Some(scale) = self.viewport.poll(now) {
            debug!("Viewport settled at scale {}", scale);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
