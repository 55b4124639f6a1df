//! Structured tree editor with ordered search
//!
//! This module provides the editor-side collaborator of the sync engine: it
//! owns the data tree, exposes whole-tree get/set, and provides a search
//! facility whose results are ordered by tree pre-order. That ordering is
//! load-bearing: the sync controller pairs the Nth rendered fragment with the
//! Nth matching search result, so both sides must enumerate matches in the
//! same relative order.
//!
//! Search supports literal and regex matching with a case-sensitivity toggle,
//! and matches both object keys and scalar values.

use crate::tree::node::DataNode;
use crate::tree::path::NodePath;
use log::debug;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Editor Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Editing modes for the structured editor.
///
/// Tree mode exposes per-node selection and search; Code mode is a raw text
/// view of the whole document. Click-to-locate only works against Tree mode,
/// so the controller switches the editor back to Tree before resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Node-by-node tree editing (default)
    #[default]
    Tree,
    /// Raw document text editing
    Code,
}

impl EditorMode {
    /// Toggle between Tree and Code modes.
    pub fn toggle(&self) -> Self {
        match self {
            EditorMode::Tree => EditorMode::Code,
            EditorMode::Code => EditorMode::Tree,
        }
    }

    /// Get a display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::Tree => "Tree",
            EditorMode::Code => "Code",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search State
// ─────────────────────────────────────────────────────────────────────────────

/// What part of a tree entry a search result matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    /// The result matched an object key
    Key,
    /// The result matched a scalar value
    Value,
}

/// One search hit: the node it addresses and the text that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Path to the matched node (for key matches, the entry's value node)
    pub path: NodePath,
    /// Whether the key or the value matched
    pub field: MatchField,
    /// The matched text (key string, or scalar display text)
    pub text: String,
}

impl SearchResult {
    /// Whether this result matched a scalar value (not a key).
    pub fn is_value(&self) -> bool {
        self.field == MatchField::Value
    }
}

/// State for the editor's search facility.
///
/// Results are collected in tree pre-order: for each object entry the key hit
/// (if any) precedes hits inside the entry's value, and array items appear in
/// index order.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Current search term
    pub search_term: String,
    /// Whether search is case-sensitive
    pub case_sensitive: bool,
    /// Whether to use regex matching
    pub use_regex: bool,
    /// Current result index (0-indexed)
    pub current_result: usize,
    /// All results in tree pre-order
    results: Vec<SearchResult>,
}

impl SearchState {
    /// Create a new SearchState.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find all matches in the given tree.
    ///
    /// Updates `self.results` and returns the number of results found.
    pub fn find_matches(&mut self, tree: &DataNode) -> usize {
        self.results.clear();

        if self.search_term.is_empty() {
            return 0;
        }

        let matcher = match TermMatcher::compile(self) {
            Some(m) => m,
            None => return 0,
        };
        collect_matches(tree, NodePath::root(), &matcher, &mut self.results);

        // Clamp current_result to valid range
        if !self.results.is_empty() && self.current_result >= self.results.len() {
            self.current_result = 0;
        }

        self.results.len()
    }

    /// All results in tree pre-order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Move to the next result, wrapping around.
    ///
    /// Returns the new current result index, or None if no results.
    pub fn next_result(&mut self) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        self.current_result = (self.current_result + 1) % self.results.len();
        Some(self.current_result)
    }

    /// Move to the previous result, wrapping around.
    ///
    /// Returns the new current result index, or None if no results.
    pub fn prev_result(&mut self) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        self.current_result = if self.current_result == 0 {
            self.results.len() - 1
        } else {
            self.current_result - 1
        };
        Some(self.current_result)
    }

    /// The currently selected result.
    pub fn current(&self) -> Option<&SearchResult> {
        self.results.get(self.current_result)
    }

    /// Select a result by index. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.results.len() {
            return false;
        }
        self.current_result = index;
        true
    }

    /// Clear all results and reset state.
    pub fn clear(&mut self) {
        self.results.clear();
        self.current_result = 0;
    }

    /// Check if there are any results.
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Get the total number of results.
    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Term Matching
// ─────────────────────────────────────────────────────────────────────────────

/// Compiled form of the search term (literal or regex).
enum TermMatcher {
    Literal { term: String, case_sensitive: bool },
    Regex(Regex),
}

impl TermMatcher {
    /// Compile the state's term. Returns None for an invalid regex.
    fn compile(state: &SearchState) -> Option<Self> {
        if !state.use_regex {
            let term = if state.case_sensitive {
                state.search_term.clone()
            } else {
                state.search_term.to_lowercase()
            };
            return Some(TermMatcher::Literal {
                term,
                case_sensitive: state.case_sensitive,
            });
        }

        let pattern = if state.case_sensitive {
            state.search_term.clone()
        } else {
            format!("(?i){}", state.search_term)
        };

        match Regex::new(&pattern) {
            Ok(re) => Some(TermMatcher::Regex(re)),
            Err(e) => {
                debug!("Invalid regex pattern '{}': {}", state.search_term, e);
                None
            }
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            TermMatcher::Literal { term, case_sensitive } => {
                if *case_sensitive {
                    text.contains(term.as_str())
                } else {
                    text.to_lowercase().contains(term.as_str())
                }
            }
            TermMatcher::Regex(re) => re.is_match(text),
        }
    }
}

/// Depth-first pre-order collection of key and value hits.
fn collect_matches(
    node: &DataNode,
    path: NodePath,
    matcher: &TermMatcher,
    results: &mut Vec<SearchResult>,
) {
    match node {
        DataNode::Object(entries) => {
            for (key, value) in entries {
                let child_path = path.child_key(key);
                if matcher.is_match(key) {
                    results.push(SearchResult {
                        path: child_path.clone(),
                        field: MatchField::Key,
                        text: key.clone(),
                    });
                }
                collect_matches(value, child_path, matcher, results);
            }
        }
        DataNode::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_matches(item, path.child_index(index), matcher, results);
            }
        }
        scalar => {
            if let Some(text) = scalar.scalar_text() {
                if matcher.is_match(&text) {
                    results.push(SearchResult {
                        path,
                        field: MatchField::Value,
                        text,
                    });
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree Editor
// ─────────────────────────────────────────────────────────────────────────────

/// The structured editor collaborator: tree ownership, mode, and search.
#[derive(Debug, Default)]
pub struct TreeEditor {
    tree: DataNode,
    mode: EditorMode,
    search: SearchState,
}

impl TreeEditor {
    /// Create an editor over the given tree.
    pub fn new(tree: DataNode) -> Self {
        Self {
            tree,
            mode: EditorMode::default(),
            search: SearchState::new(),
        }
    }

    /// The current tree.
    pub fn get(&self) -> &DataNode {
        &self.tree
    }

    /// Replace the whole tree and refresh any active search.
    pub fn set(&mut self, tree: DataNode) {
        self.tree = tree;
        self.refresh();
    }

    /// Current editing mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switch the editing mode.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// Toggle between Tree and Code modes.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    /// Run a literal search for the given term. Returns the result count.
    pub fn search(&mut self, term: &str) -> usize {
        self.search.search_term = term.to_string();
        self.search.current_result = 0;
        self.search.find_matches(&self.tree)
    }

    /// The search state (results, options, current selection).
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Mutable access to the search state for option toggles.
    pub fn search_state_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    /// Advance the search selection to the next result.
    pub fn next_result(&mut self) -> Option<usize> {
        self.search.next_result()
    }

    /// Select a search result by index. Returns false if out of range.
    pub fn select_result(&mut self, index: usize) -> bool {
        self.search.select(index)
    }

    /// The currently selected search result.
    pub fn active_result(&self) -> Option<&SearchResult> {
        self.search.current()
    }

    /// Read the node at a path.
    pub fn value_at(&self, path: &NodePath) -> Option<&DataNode> {
        path.get(&self.tree)
    }

    /// Write raw text into the leaf at a path and refresh the search.
    ///
    /// Returns false if the path does not resolve.
    pub fn set_value_at(&mut self, path: &NodePath, text: &str) -> bool {
        match path.get_mut(&mut self.tree) {
            Some(node) => {
                node.set_text(text);
                self.refresh();
                true
            }
            None => false,
        }
    }

    /// Re-run the current search against the (possibly changed) tree.
    pub fn refresh(&mut self) {
        if self.search.search_term.is_empty() {
            self.search.clear();
        } else {
            self.search.find_matches(&self.tree);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
