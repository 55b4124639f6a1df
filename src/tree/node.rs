//! Unified data tree for JSON, YAML, and TOML snapshots
//!
//! This module defines `DataNode`, the in-memory representation of the
//! structured document being edited. A snapshot can be authored in JSON, YAML,
//! or TOML; all three parse into the same tree shape.
//!
//! Objects preserve entry order. Every enumeration over a tree (rendering,
//! searching) therefore walks entries in one deterministic pre-order, which
//! the sync engine relies on when it cross-references rendered fragments with
//! search results by position.

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot Format Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Supported source formats for snapshot documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
    Toml,
}

impl SnapshotFormat {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Get display name for the format.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Data Node Model
// ─────────────────────────────────────────────────────────────────────────────

/// Unified tree node representation for all supported formats.
#[derive(Debug, Clone, PartialEq)]
pub enum DataNode {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Array of nodes
    Array(Vec<DataNode>),
    /// Object/Map with string keys, entry order preserved
    Object(Vec<(String, DataNode)>),
}

impl DataNode {
    /// Get a short type description for display.
    pub fn type_hint(&self) -> &'static str {
        match self {
            DataNode::Null => "null",
            DataNode::Bool(_) => "bool",
            DataNode::Integer(_) => "int",
            DataNode::Float(_) => "float",
            DataNode::String(_) => "string",
            DataNode::Array(arr) => {
                if arr.is_empty() {
                    "[]"
                } else {
                    "array"
                }
            }
            DataNode::Object(obj) => {
                if obj.is_empty() {
                    "{}"
                } else {
                    "object"
                }
            }
        }
    }

    /// Check if this node is a container (array or object).
    pub fn is_container(&self) -> bool {
        matches!(self, DataNode::Array(_) | DataNode::Object(_))
    }

    /// Check if this node is a scalar leaf (anything but a container).
    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// Get the number of children for containers.
    pub fn child_count(&self) -> usize {
        match self {
            DataNode::Array(arr) => arr.len(),
            DataNode::Object(obj) => obj.len(),
            _ => 0,
        }
    }

    /// The display text of a scalar, as emitted into the rendered view.
    ///
    /// Null renders as empty text. Containers have no display text of their
    /// own and return `None`.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            DataNode::Null => Some(String::new()),
            DataNode::Bool(b) => Some(b.to_string()),
            DataNode::Integer(i) => Some(i.to_string()),
            DataNode::Float(f) => Some(f.to_string()),
            DataNode::String(s) => Some(s.clone()),
            DataNode::Array(_) | DataNode::Object(_) => None,
        }
    }

    /// Replace this node's value by interpreting a text input.
    ///
    /// `null`, `true`/`false`, integers, and floats are recognized; a quoted
    /// string is unquoted; anything else becomes an unquoted string.
    pub fn update_from_text(&mut self, input: &str) {
        let trimmed = input.trim();

        if trimmed == "null" {
            *self = DataNode::Null;
            return;
        }
        if trimmed == "true" {
            *self = DataNode::Bool(true);
            return;
        }
        if trimmed == "false" {
            *self = DataNode::Bool(false);
            return;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            *self = DataNode::Integer(i);
            return;
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            *self = DataNode::Float(f);
            return;
        }
        if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
            let inner = &trimmed[1..trimmed.len() - 1];
            let unescaped = inner.replace("\\\"", "\"").replace("\\\\", "\\");
            *self = DataNode::String(unescaped);
            return;
        }

        *self = DataNode::String(input.to_string());
    }

    /// Replace this node with a plain string value, preserving the raw text.
    ///
    /// This is the write the edit buffer performs: what the user typed is
    /// what the leaf holds, no scalar re-interpretation.
    pub fn set_text(&mut self, text: &str) {
        *self = DataNode::String(text.to_string());
    }
}

impl Default for DataNode {
    fn default() -> Self {
        DataNode::Object(Vec::new())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse snapshot content into a DataNode based on its format.
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<DataNode> {
    match format {
        SnapshotFormat::Json => parse_json(content),
        SnapshotFormat::Yaml => parse_yaml(content),
        SnapshotFormat::Toml => parse_toml(content),
    }
}

/// Parse JSON content into a DataNode.
pub fn parse_json(content: &str) -> Result<DataNode> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| Error::SnapshotParse {
        format: "json",
        message: e.to_string(),
    })?;
    Ok(json_to_tree(&value))
}

/// Parse YAML content into a DataNode.
pub fn parse_yaml(content: &str) -> Result<DataNode> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| Error::SnapshotParse {
        format: "yaml",
        message: e.to_string(),
    })?;
    Ok(yaml_to_tree(&value))
}

/// Parse TOML content into a DataNode.
pub fn parse_toml(content: &str) -> Result<DataNode> {
    let value: toml::Value = content.parse().map_err(|e: toml::de::Error| Error::SnapshotParse {
        format: "toml",
        message: e.to_string(),
    })?;
    Ok(toml_to_tree(&value))
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Conversions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a serde_json Value into a DataNode.
pub fn json_to_tree(value: &serde_json::Value) -> DataNode {
    match value {
        serde_json::Value::Null => DataNode::Null,
        serde_json::Value::Bool(b) => DataNode::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataNode::Integer(i)
            } else if let Some(f) = n.as_f64() {
                DataNode::Float(f)
            } else {
                DataNode::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => DataNode::String(s.clone()),
        serde_json::Value::Array(arr) => DataNode::Array(arr.iter().map(json_to_tree).collect()),
        serde_json::Value::Object(obj) => DataNode::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), json_to_tree(v)))
                .collect(),
        ),
    }
}

/// Convert a DataNode back into a serde_json Value.
///
/// Non-finite floats have no JSON representation and fall back to null.
pub fn tree_to_json(node: &DataNode) -> serde_json::Value {
    match node {
        DataNode::Null => serde_json::Value::Null,
        DataNode::Bool(b) => serde_json::Value::Bool(*b),
        DataNode::Integer(i) => serde_json::Value::Number((*i).into()),
        DataNode::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        DataNode::String(s) => serde_json::Value::String(s.clone()),
        DataNode::Array(arr) => serde_json::Value::Array(arr.iter().map(tree_to_json).collect()),
        DataNode::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), tree_to_json(v)))
                .collect(),
        ),
    }
}

fn yaml_to_tree(value: &serde_yaml::Value) -> DataNode {
    match value {
        serde_yaml::Value::Null => DataNode::Null,
        serde_yaml::Value::Bool(b) => DataNode::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataNode::Integer(i)
            } else if let Some(f) = n.as_f64() {
                DataNode::Float(f)
            } else {
                DataNode::String(n.to_string())
            }
        }
        serde_yaml::Value::String(s) => DataNode::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => DataNode::Array(seq.iter().map(yaml_to_tree).collect()),
        serde_yaml::Value::Mapping(map) => DataNode::Object(
            map.iter()
                .map(|(k, v)| (yaml_key_to_string(k), yaml_to_tree(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_tree(&tagged.value),
    }
}

/// YAML allows non-string mapping keys; coerce them to display strings.
fn yaml_key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => format!("{:?}", other),
    }
}

fn toml_to_tree(value: &toml::Value) -> DataNode {
    match value {
        toml::Value::String(s) => DataNode::String(s.clone()),
        toml::Value::Integer(i) => DataNode::Integer(*i),
        toml::Value::Float(f) => DataNode::Float(*f),
        toml::Value::Boolean(b) => DataNode::Bool(*b),
        toml::Value::Datetime(dt) => DataNode::String(dt.to_string()),
        toml::Value::Array(arr) => DataNode::Array(arr.iter().map(toml_to_tree).collect()),
        toml::Value::Table(table) => DataNode::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_tree(v)))
                .collect(),
        ),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_object() {
        let tree = parse_json(r#"{"name": "Avery", "age": 30}"#).unwrap();
        assert!(matches!(tree, DataNode::Object(_)));
        assert_eq!(tree.child_count(), 2);
    }

    #[test]
    fn test_parse_json_invalid() {
        let result = parse_json("{ not json }");
        assert!(matches!(
            result,
            Err(crate::error::Error::SnapshotParse { format: "json", .. })
        ));
    }

    #[test]
    fn test_parse_yaml_mapping() {
        let tree = parse_yaml("name: Avery\nskills:\n  - Rust\n  - SQL\n").unwrap();
        match &tree {
            DataNode::Object(entries) => {
                assert_eq!(entries[0].0, "name");
                assert_eq!(entries[1].1.child_count(), 2);
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_toml_table() {
        let tree = parse_toml("title = \"Resume\"\n\n[profile]\nname = \"Avery\"\n").unwrap();
        assert!(matches!(tree, DataNode::Object(_)));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(SnapshotFormat::from_extension("json"), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_extension("YML"), Some(SnapshotFormat::Yaml));
        assert_eq!(SnapshotFormat::from_extension("toml"), Some(SnapshotFormat::Toml));
        assert_eq!(SnapshotFormat::from_extension("md"), None);
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(DataNode::String("hi".into()).scalar_text().unwrap(), "hi");
        assert_eq!(DataNode::Integer(7).scalar_text().unwrap(), "7");
        assert_eq!(DataNode::Bool(true).scalar_text().unwrap(), "true");
        assert_eq!(DataNode::Null.scalar_text().unwrap(), "");
        assert!(DataNode::Array(vec![]).scalar_text().is_none());
    }

    #[test]
    fn test_type_hints() {
        assert_eq!(DataNode::Null.type_hint(), "null");
        assert_eq!(DataNode::Array(vec![]).type_hint(), "[]");
        assert_eq!(DataNode::Object(vec![("a".into(), DataNode::Null)]).type_hint(), "object");
    }

    #[test]
    fn test_update_from_text_scalars() {
        let mut node = DataNode::Null;
        node.update_from_text("42");
        assert_eq!(node, DataNode::Integer(42));

        node.update_from_text("3.5");
        assert_eq!(node, DataNode::Float(3.5));

        node.update_from_text("false");
        assert_eq!(node, DataNode::Bool(false));

        node.update_from_text("\"quoted\"");
        assert_eq!(node, DataNode::String("quoted".into()));

        node.update_from_text("plain words");
        assert_eq!(node, DataNode::String("plain words".into()));
    }

    #[test]
    fn test_set_text_keeps_raw_input() {
        let mut node = DataNode::Integer(5);
        node.set_text("42");
        // The edit buffer writes raw text, not a re-parsed scalar
        assert_eq!(node, DataNode::String("42".into()));
    }

    #[test]
    fn test_json_round_trip() {
        let source = r#"{"a": [1, 2.5, true, null], "b": {"c": "text"}}"#;
        let tree = parse_json(source).unwrap();
        let back = tree_to_json(&tree);
        let reparsed = json_to_tree(&back);
        assert_eq!(tree, reparsed);
    }

    #[test]
    fn test_object_order_preserved_from_yaml() {
        // YAML mappings keep author order, which the sync engine depends on
        let tree = parse_yaml("zebra: 1\nalpha: 2\nmiddle: 3\n").unwrap();
        match tree {
            DataNode::Object(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["zebra", "alpha", "middle"]);
            }
            other => panic!("expected object, got {:?}", other),
        }
    }
}
