//! Rendered document tree
//!
//! This module models the rendering surface's content as an index arena of
//! element and text nodes. The sync engine traverses it to match fragments,
//! reads text content back, and styles fragments for highlighting.
//!
//! Content mutations (child-list changes and text rewrites) are appended to an
//! internal journal that observers read through watermarks. Background-color
//! writes are cosmetic and deliberately bypass the journal, so highlighting a
//! fragment can never register as a content change.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Fragment Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Stable handle to one node in a `RenderDocument`.
///
/// Ids stay valid for the lifetime of the document they came from; a full
/// document rebuild (surface reload) invalidates all previously handed-out
/// ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(usize);

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Data
// ─────────────────────────────────────────────────────────────────────────────

/// Payload of one rendered node.
#[derive(Debug, Clone)]
enum NodeData {
    /// A container or leaf element with a tag and ordered children
    Element {
        tag: String,
        background: Option<String>,
        children: Vec<FragmentId>,
    },
    /// A text run
    Text { content: String },
}

#[derive(Debug, Clone)]
struct RenderNode {
    parent: Option<FragmentId>,
    data: NodeData,
}

// ─────────────────────────────────────────────────────────────────────────────
// Mutation Journal
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of a recorded content mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Children were added, removed, or replaced on an element
    ChildList,
    /// A text node's content changed
    CharacterData,
}

/// One journaled content mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRecord {
    /// The node the mutation happened on
    pub target: FragmentId,
    /// What changed
    pub kind: MutationKind,
}

// ─────────────────────────────────────────────────────────────────────────────
// Render Document
// ─────────────────────────────────────────────────────────────────────────────

/// An arena-backed rendered content tree with a content-mutation journal.
#[derive(Debug)]
pub struct RenderDocument {
    nodes: Vec<RenderNode>,
    root: FragmentId,
    records: Vec<MutationRecord>,
}

impl RenderDocument {
    /// Create a document with a single root element.
    pub fn new(root_tag: &str) -> Self {
        let root_node = RenderNode {
            parent: None,
            data: NodeData::Element {
                tag: root_tag.to_string(),
                background: None,
                children: Vec::new(),
            },
        };
        Self {
            nodes: vec![root_node],
            root: FragmentId(0),
            records: Vec::new(),
        }
    }

    /// The root element.
    pub fn root(&self) -> FragmentId {
        self.root
    }

    /// Total number of nodes ever created in this document.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether an id belongs to this document.
    pub fn contains(&self, id: FragmentId) -> bool {
        id.0 < self.nodes.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Node Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> FragmentId {
        self.push_node(RenderNode {
            parent: None,
            data: NodeData::Element {
                tag: tag.to_string(),
                background: None,
                children: Vec::new(),
            },
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: &str) -> FragmentId {
        self.push_node(RenderNode {
            parent: None,
            data: NodeData::Text {
                content: content.to_string(),
            },
        })
    }

    fn push_node(&mut self, node: RenderNode) -> FragmentId {
        let id = FragmentId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structure Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the node is an element.
    pub fn is_element(&self, id: FragmentId) -> bool {
        matches!(self.nodes.get(id.0), Some(n) if matches!(n.data, NodeData::Element { .. }))
    }

    /// Whether the node is a text run.
    pub fn is_text(&self, id: FragmentId) -> bool {
        matches!(self.nodes.get(id.0), Some(n) if matches!(n.data, NodeData::Text { .. }))
    }

    /// An element's tag name.
    pub fn tag(&self, id: FragmentId) -> Option<&str> {
        match &self.nodes.get(id.0)?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text { .. } => None,
        }
    }

    /// The parent node, if attached.
    pub fn parent(&self, id: FragmentId) -> Option<FragmentId> {
        self.nodes.get(id.0)?.parent
    }

    /// All children (elements and text) of an element, in order.
    pub fn children(&self, id: FragmentId) -> &[FragmentId] {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Element { children, .. }) => children,
            _ => &[],
        }
    }

    /// The element children of an element, in order.
    pub fn element_children(&self, id: FragmentId) -> Vec<FragmentId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// Whether the node is an element with no element children.
    ///
    /// Leaf elements are the only click targets the matcher considers.
    pub fn is_leaf_element(&self, id: FragmentId) -> bool {
        self.is_element(id) && !self.children(id).iter().any(|&c| self.is_element(c))
    }

    /// All elements under (and including) `root`, in depth-first pre-order.
    pub fn pre_order_elements(&self, root: FragmentId) -> Vec<FragmentId> {
        let mut out = Vec::new();
        if !self.is_element(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let elements = self.element_children(id);
            for &child in elements.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text Content
    // ─────────────────────────────────────────────────────────────────────────

    /// Concatenated text of the node and all its descendants, in order.
    pub fn text_content(&self, id: FragmentId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: FragmentId, out: &mut String) {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Text { content }) => out.push_str(content),
            Some(NodeData::Element { children, .. }) => {
                for &child in children {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }

    /// The node's text content with surrounding whitespace trimmed.
    pub fn trimmed_text(&self, id: FragmentId) -> String {
        self.text_content(id).trim().to_string()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content Mutations (journaled)
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a child to an element. Records a child-list mutation.
    ///
    /// Returns false if `parent` is not an element of this document.
    pub fn append_child(&mut self, parent: FragmentId, child: FragmentId) -> bool {
        if !self.is_element(parent) || !self.contains(child) {
            return false;
        }
        self.nodes[child.0].parent = Some(parent);
        if let NodeData::Element { children, .. } = &mut self.nodes[parent.0].data {
            children.push(child);
        }
        self.record(parent, MutationKind::ChildList);
        true
    }

    /// Replace all children of an element. Records a child-list mutation.
    ///
    /// Detached former children stay in the arena but are unreachable from
    /// the root (the same fate detached nodes have in a live view).
    pub fn replace_children(&mut self, parent: FragmentId, new_children: Vec<FragmentId>) -> bool {
        if !self.is_element(parent) {
            return false;
        }
        let old = match &mut self.nodes[parent.0].data {
            NodeData::Element { children, .. } => std::mem::take(children),
            NodeData::Text { .. } => return false,
        };
        for child in old {
            self.nodes[child.0].parent = None;
        }
        for &child in &new_children {
            self.nodes[child.0].parent = Some(parent);
        }
        if let NodeData::Element { children, .. } = &mut self.nodes[parent.0].data {
            *children = new_children;
        }
        self.record(parent, MutationKind::ChildList);
        true
    }

    /// Rewrite a text node's content. Records a character-data mutation.
    pub fn set_text(&mut self, id: FragmentId, content: &str) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Text { content: slot }) => {
                *slot = content.to_string();
                self.record(id, MutationKind::CharacterData);
                true
            }
            _ => false,
        }
    }

    /// Set an element's text content.
    ///
    /// An element whose only child is a text run gets an in-place text
    /// rewrite (character-data record on the text node); any other shape has
    /// its children replaced by a single new text run (child-list record on
    /// the element).
    pub fn set_text_content(&mut self, id: FragmentId, content: &str) -> bool {
        if !self.is_element(id) {
            return false;
        }
        let children = self.children(id).to_vec();
        if children.len() == 1 && self.is_text(children[0]) {
            return self.set_text(children[0], content);
        }
        let text = self.create_text(content);
        self.replace_children(id, vec![text])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cosmetic Styling (not journaled)
    // ─────────────────────────────────────────────────────────────────────────

    /// An element's current background color, if any.
    pub fn background(&self, id: FragmentId) -> Option<&str> {
        match &self.nodes.get(id.0)?.data {
            NodeData::Element { background, .. } => background.as_deref(),
            NodeData::Text { .. } => None,
        }
    }

    /// Set or clear an element's background color.
    ///
    /// Returns false for text nodes, which have no stylable surface.
    pub fn set_background(&mut self, id: FragmentId, color: Option<&str>) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Element { background, .. }) => {
                *background = color.map(|c| c.to_string());
                true
            }
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Journal Access
    // ─────────────────────────────────────────────────────────────────────────

    fn record(&mut self, target: FragmentId, kind: MutationKind) {
        self.records.push(MutationRecord { target, kind });
    }

    /// Current journal watermark; pass to `records_since` later.
    pub fn mark(&self) -> usize {
        self.records.len()
    }

    /// All content mutations recorded since a watermark.
    pub fn records_since(&self, mark: usize) -> &[MutationRecord] {
        &self.records[mark.min(self.records.len())..]
    }

    /// The element a mutation record affects: the target itself for element
    /// targets, the parent element for text-only mutations.
    pub fn affected_element(&self, record: &MutationRecord) -> Option<FragmentId> {
        if self.is_element(record.target) {
            Some(record.target)
        } else {
            self.parent(record.target)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
