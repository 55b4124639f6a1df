//! Fragment matching by rendered text
//!
//! Given a rendered root and a target text, the matcher produces the ordered
//! set of leaf fragments whose trimmed text equals the target. Only leaf
//! elements participate: an internal element whose aggregate text happens to
//! equal the target is never a match, which keeps container elements from
//! shadowing the leaves inside them.
//!
//! The result order is document pre-order, so a fragment's position in the
//! match set is its occurrence rank among identically-texted fragments.

use crate::render::{FragmentId, RenderDocument};

/// Find all leaf fragments under `root` whose trimmed text equals `target`.
///
/// Comparison is exact and case-sensitive after trimming surrounding
/// whitespace from both sides. An empty (or whitespace-only) target matches
/// nothing: empty leaves are common in rendered output and matching them all
/// would make the resulting ranks meaningless.
///
/// The match set is computed fresh on every call; the rendered surface can
/// change between clicks, so results are never cached.
pub fn match_fragments(doc: &RenderDocument, root: FragmentId, target: &str) -> Vec<FragmentId> {
    let target = target.trim();
    if target.is_empty() {
        return Vec::new();
    }

    doc.pre_order_elements(root)
        .into_iter()
        .filter(|&id| doc.is_leaf_element(id))
        .filter(|&id| doc.trimmed_text(id) == target)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
