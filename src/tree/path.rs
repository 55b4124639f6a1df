//! Path addressing into a data tree
//!
//! A `NodePath` names one node inside a `DataNode` tree as a sequence of
//! object-key and array-index steps. Paths display in JSONPath style
//! (`$.profile.skills[1]`), the same format the structured editor exposes
//! for copying.

use crate::tree::node::DataNode;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Path Steps
// ─────────────────────────────────────────────────────────────────────────────

/// One step into a container: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Descend into an object entry by key
    Key(String),
    /// Descend into an array element by index
    Index(usize),
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Path
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered sequence of steps from the tree root to one node.
///
/// The empty path addresses the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath {
    steps: Vec<PathStep>,
}

impl NodePath {
    /// The root path (no steps).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from a list of steps.
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// The steps of this path, outermost first.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// A copy of this path extended by one object-key step.
    pub fn child_key(&self, key: &str) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Key(key.to_string()));
        Self { steps }
    }

    /// A copy of this path extended by one array-index step.
    pub fn child_index(&self, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Index(index));
        Self { steps }
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.steps.is_empty() {
            return None;
        }
        Some(Self {
            steps: self.steps[..self.steps.len() - 1].to_vec(),
        })
    }

    /// The final step, or `None` for the root.
    pub fn last_step(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// Resolve this path inside a tree, if every step exists.
    pub fn get<'a>(&self, root: &'a DataNode) -> Option<&'a DataNode> {
        let mut current = root;
        for step in &self.steps {
            current = match (step, current) {
                (PathStep::Key(key), DataNode::Object(entries)) => {
                    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)?
                }
                (PathStep::Index(index), DataNode::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Resolve this path to a mutable node, if every step exists.
    pub fn get_mut<'a>(&self, root: &'a mut DataNode) -> Option<&'a mut DataNode> {
        let mut current = root;
        for step in &self.steps {
            current = match (step, current) {
                (PathStep::Key(key), DataNode::Object(entries)) => {
                    entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)?
                }
                (PathStep::Index(index), DataNode::Array(items)) => items.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for step in &self.steps {
            match step {
                PathStep::Key(key) => write!(f, ".{}", key)?,
                PathStep::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::parse_json;

    fn sample_tree() -> DataNode {
        parse_json(r#"{"profile": {"name": "Avery", "skills": ["Rust", "SQL"]}}"#).unwrap()
    }

    #[test]
    fn test_root_path() {
        let tree = sample_tree();
        let path = NodePath::root();
        assert!(path.is_root());
        assert_eq!(path.get(&tree), Some(&tree));
    }

    #[test]
    fn test_get_nested_key() {
        let tree = sample_tree();
        let path = NodePath::root().child_key("profile").child_key("name");
        assert_eq!(path.get(&tree), Some(&DataNode::String("Avery".into())));
    }

    #[test]
    fn test_get_array_index() {
        let tree = sample_tree();
        let path = NodePath::root()
            .child_key("profile")
            .child_key("skills")
            .child_index(1);
        assert_eq!(path.get(&tree), Some(&DataNode::String("SQL".into())));
    }

    #[test]
    fn test_get_missing_path() {
        let tree = sample_tree();
        let path = NodePath::root().child_key("nope");
        assert_eq!(path.get(&tree), None);

        // Index step against an object does not resolve
        let path = NodePath::root().child_index(0);
        assert_eq!(path.get(&tree), None);
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut tree = sample_tree();
        let path = NodePath::root().child_key("profile").child_key("name");
        if let Some(node) = path.get_mut(&mut tree) {
            node.set_text("Sam");
        }
        assert_eq!(path.get(&tree), Some(&DataNode::String("Sam".into())));
    }

    #[test]
    fn test_parent_and_last_step() {
        let path = NodePath::root().child_key("profile").child_index(3);
        assert_eq!(path.last_step(), Some(&PathStep::Index(3)));

        let parent = path.parent().unwrap();
        assert_eq!(parent, NodePath::root().child_key("profile"));
        assert_eq!(NodePath::root().parent(), None);
    }

    #[test]
    fn test_display_jsonpath_style() {
        let path = NodePath::root()
            .child_key("profile")
            .child_key("skills")
            .child_index(1);
        assert_eq!(path.to_string(), "$.profile.skills[1]");
        assert_eq!(NodePath::root().to_string(), "$");
    }
}
