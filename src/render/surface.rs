//! Rendering surface
//!
//! The `RenderSurface` owns the rendered document for one page and the page
//! key its snapshots are stored under. Two update paths exist:
//!
//! - `refresh(tree)` re-renders in place: the document identity survives,
//!   the rewrite is journaled as content mutations, and previously handed-out
//!   fragment ids stay valid (detached fragments simply leave the visible
//!   tree). Preferred after data edits.
//! - `reload(tree)` rebuilds the document wholesale, bumping the load
//!   generation. All old fragment ids become meaningless; callers holding
//!   selection state must reset it.

use crate::render::document::RenderDocument;
use crate::render::template::{render_document, render_into};
use crate::tree::DataNode;
use log::debug;

/// The rendered view of one page.
#[derive(Debug)]
pub struct RenderSurface {
    page_key: String,
    doc: RenderDocument,
    load_generation: u64,
}

impl RenderSurface {
    /// Create a surface for a page, rendering the given tree.
    pub fn new(page_key: &str, tree: &DataNode) -> Self {
        Self {
            page_key: page_key.to_string(),
            doc: render_document(tree),
            load_generation: 0,
        }
    }

    /// The page key snapshots for this surface are stored under.
    pub fn page_key(&self) -> &str {
        &self.page_key
    }

    /// The rendered document.
    pub fn document(&self) -> &RenderDocument {
        &self.doc
    }

    /// Mutable access to the rendered document.
    pub fn document_mut(&mut self) -> &mut RenderDocument {
        &mut self.doc
    }

    /// How many times this surface has been fully reloaded.
    ///
    /// A bump means every previously observed fragment id is stale.
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    /// Re-render the tree in place, journaling the rewrite as content
    /// mutations. Fragment ids stay valid; replaced fragments are detached.
    pub fn refresh(&mut self, tree: &DataNode) {
        debug!("Refreshing surface '{}' in place", self.page_key);
        let root = self.doc.root();
        self.doc.replace_children(root, Vec::new());
        render_into(&mut self.doc, root, tree);
    }

    /// Rebuild the document wholesale and bump the load generation.
    pub fn reload(&mut self, tree: &DataNode) {
        debug!("Reloading surface '{}'", self.page_key);
        self.doc = render_document(tree);
        self.load_generation += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_json;

    #[test]
    fn test_new_surface_renders_tree() {
        let tree = parse_json(r#"{"name": "Avery"}"#).unwrap();
        let surface = RenderSurface::new("/pages/basic", &tree);

        assert_eq!(surface.page_key(), "/pages/basic");
        assert_eq!(surface.load_generation(), 0);
        assert_eq!(surface.document().trimmed_text(surface.document().root()), "Avery");
    }

    #[test]
    fn test_refresh_keeps_document_and_journals() {
        let tree = parse_json(r#"{"name": "Avery"}"#).unwrap();
        let mut surface = RenderSurface::new("/pages/basic", &tree);
        let old_root = surface.document().root();

        let mark = surface.document().mark();
        let updated = parse_json(r#"{"name": "Sam"}"#).unwrap();
        surface.refresh(&updated);

        assert_eq!(surface.load_generation(), 0);
        assert_eq!(surface.document().root(), old_root);
        assert!(!surface.document().records_since(mark).is_empty());
        assert_eq!(surface.document().trimmed_text(old_root), "Sam");
    }

    #[test]
    fn test_reload_bumps_generation() {
        let tree = parse_json(r#"{"name": "Avery"}"#).unwrap();
        let mut surface = RenderSurface::new("/pages/basic", &tree);

        let updated = parse_json(r#"{"name": "Sam"}"#).unwrap();
        surface.reload(&updated);

        assert_eq!(surface.load_generation(), 1);
        let root = surface.document().root();
        assert_eq!(surface.document().trimmed_text(root), "Sam");
    }
}
