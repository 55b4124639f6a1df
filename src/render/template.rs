//! Template rendering of data trees
//!
//! This module renders a `DataNode` tree into a `RenderDocument` with a fixed,
//! deterministic shape: objects become `div` sections, arrays become `ul`
//! lists with `li` items, and every scalar becomes a leaf `span` carrying the
//! scalar's display text.
//!
//! Scalar leaves are emitted in data pre-order. Because the editor's search
//! enumerates the tree in the same pre-order, the Nth rendered occurrence of
//! a text corresponds to the Nth matching search result — the positional
//! correspondence the click-to-locate flow is built on.

use crate::render::document::{FragmentId, RenderDocument};
use crate::tree::DataNode;

/// Tag used for the document root.
const ROOT_TAG: &str = "body";

/// Render a data tree into a fresh document.
pub fn render_document(tree: &DataNode) -> RenderDocument {
    let mut doc = RenderDocument::new(ROOT_TAG);
    let root = doc.root();
    render_into(&mut doc, root, tree);
    doc
}

/// Render a data tree as a new child subtree of `parent`.
pub fn render_into(doc: &mut RenderDocument, parent: FragmentId, node: &DataNode) {
    match node {
        DataNode::Object(entries) => {
            let section = doc.create_element("div");
            doc.append_child(parent, section);
            for (_, value) in entries {
                render_into(doc, section, value);
            }
        }
        DataNode::Array(items) => {
            let list = doc.create_element("ul");
            doc.append_child(parent, list);
            for item in items {
                let entry = doc.create_element("li");
                doc.append_child(list, entry);
                render_into(doc, entry, item);
            }
        }
        scalar => {
            let leaf = doc.create_element("span");
            doc.append_child(parent, leaf);
            if let Some(text) = scalar.scalar_text() {
                if !text.is_empty() {
                    let run = doc.create_text(&text);
                    doc.append_child(leaf, run);
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
