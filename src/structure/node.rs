//! Structure nodes
//!
//! The management API describes a page as a forest of loosely-typed JSON
//! objects. A node is a `tag` element, a `component` reference, a translated
//! text (`textKey`) or a literal `text`, and which one it is depends on which
//! field happens to be present. We decide that exactly once, here, so nothing
//! downstream has to re-check fields.
//!
//! Discrimination priority: component > tag > textKey > text > unknown.
//! Empty strings never discriminate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Attribute map of an element (`params` on the wire)
pub type Attributes = BTreeMap<String, AttrValue>;

/// A single attribute value: either a plain string or a list of strings
///
/// `class` is the usual list-valued attribute; its order matters for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    List(Vec<String>),
}

impl AttrValue {
    /// Space-joined form (lists are joined, text is returned as-is)
    pub fn joined(&self) -> String {
        match self {
            AttrValue::Text(text) => text.clone(),
            AttrValue::List(items) => items.join(" "),
        }
    }

    /// Whether the value carries anything worth displaying
    pub fn is_blank(&self) -> bool {
        match self {
            AttrValue::Text(text) => text.is_empty(),
            AttrValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&Value> for AttrValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => AttrValue::Text(s.clone()),
            Value::Array(items) => AttrValue::List(items.iter().map(scalar_text).collect()),
            // Numbers, booleans and nested objects keep their JSON spelling
            other => AttrValue::Text(scalar_text(other)),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Variant payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// HTML-like element: `{ tag, params?, children? }`
    Element {
        tag: String,
        attributes: Attributes,
        children: Vec<Node>,
    },
    /// Reference to a reusable component: `{ component, children? }`
    Component { name: String, children: Vec<Node> },
    /// Translation lookup: `{ textKey }`
    TranslatedText { key: String },
    /// Literal text: `{ text }`
    RawText { text: String },
    /// None of the discriminating fields were present.
    /// Children are kept so foreign data stays inspectable.
    Unknown { children: Vec<Node> },
}

/// One entry of a structure tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct Node {
    /// Backend-supplied stable identifier (`nodeId` / `_nodeId`)
    pub id: Option<String>,
    pub kind: NodeKind,
}

impl Node {
    pub fn element(tag: impl Into<String>, attributes: Attributes, children: Vec<Node>) -> Self {
        Self {
            id: None,
            kind: NodeKind::Element {
                tag: tag.into(),
                attributes,
                children,
            },
        }
    }

    pub fn component(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            id: None,
            kind: NodeKind::Component {
                name: name.into(),
                children,
            },
        }
    }

    pub fn translated(key: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: NodeKind::TranslatedText { key: key.into() },
        }
    }

    pub fn raw_text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: NodeKind::RawText { text: text.into() },
        }
    }

    /// Attach an explicit stable identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Ordered children (empty for text variants)
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Element { children, .. }
            | NodeKind::Component { children, .. }
            | NodeKind::Unknown { children } => children,
            NodeKind::TranslatedText { .. } | NodeKind::RawText { .. } => &[],
        }
    }

    /// A node has children iff its child list is present and non-empty
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Element attributes, if this is an element
    pub fn attributes(&self) -> Option<&Attributes> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Ingest a JSON value. Never fails: anything unrecognised becomes `Unknown`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(map),
            // A bare string in a children array is literal text
            Value::String(text) if !text.is_empty() => Self::raw_text(text.clone()),
            _ => Self {
                id: None,
                kind: NodeKind::Unknown {
                    children: Vec::new(),
                },
            },
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let id = non_empty_str(map, "nodeId")
            .or_else(|| non_empty_str(map, "_nodeId"))
            .map(str::to_string);

        let children = || -> Vec<Node> {
            map.get("children")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(Node::from_value).collect())
                .unwrap_or_default()
        };

        let kind = if let Some(name) = non_empty_str(map, "component") {
            NodeKind::Component {
                name: name.to_string(),
                children: children(),
            }
        } else if let Some(tag) = non_empty_str(map, "tag") {
            let attributes = map
                .get("params")
                .and_then(Value::as_object)
                .map(|params| {
                    params
                        .iter()
                        .map(|(key, value)| (key.clone(), AttrValue::from(value)))
                        .collect()
                })
                .unwrap_or_default();
            NodeKind::Element {
                tag: tag.to_string(),
                attributes,
                children: children(),
            }
        } else if let Some(key) = non_empty_str(map, "textKey") {
            NodeKind::TranslatedText {
                key: key.to_string(),
            }
        } else if let Some(text) = non_empty_str(map, "text") {
            NodeKind::RawText {
                text: text.to_string(),
            }
        } else {
            NodeKind::Unknown {
                children: children(),
            }
        };

        Self { id, kind }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from_value(&value)
    }
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Ordered collection of root nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct Forest {
    pub roots: Vec<Node>,
}

impl Forest {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    /// Ingest a snapshot. Arrays are forests, a single object is a one-root
    /// forest, `null` is empty.
    pub fn from_value(value: &Value) -> Self {
        let roots = match value {
            Value::Array(items) => items.iter().map(Node::from_value).collect(),
            Value::Null => Vec::new(),
            other => vec![Node::from_value(other)],
        };
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, all depths
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|n| 1 + count(n.children())).sum()
        }
        count(&self.roots)
    }
}

impl From<Value> for Forest {
    fn from(value: Value) -> Self {
        Forest::from_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_wins_over_tag() {
        let node = Node::from_value(&json!({"component": "Hero", "tag": "div"}));
        assert!(matches!(node.kind, NodeKind::Component { ref name, .. } if name == "Hero"));
    }

    #[test]
    fn test_element_with_params_and_children() {
        let node = Node::from_value(&json!({
            "tag": "div",
            "params": {"id": "x", "class": ["a", "b"], "tabindex": 3},
            "children": [{"text": "hello"}]
        }));

        let attrs = node.attributes().expect("element");
        assert_eq!(attrs["id"], AttrValue::Text("x".into()));
        assert_eq!(
            attrs["class"],
            AttrValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(attrs["tabindex"], AttrValue::Text("3".into()));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0], Node::raw_text("hello"));
    }

    #[test]
    fn test_text_variants() {
        assert_eq!(
            Node::from_value(&json!({"textKey": "home.title"})),
            Node::translated("home.title")
        );
        assert_eq!(Node::from_value(&json!({"text": "hi"})), Node::raw_text("hi"));
    }

    #[test]
    fn test_unknown_fallback() {
        let node = Node::from_value(&json!({"foo": 1}));
        assert!(matches!(node.kind, NodeKind::Unknown { .. }));

        // Empty discriminators don't count
        let node = Node::from_value(&json!({"text": ""}));
        assert!(matches!(node.kind, NodeKind::Unknown { .. }));

        let node = Node::from_value(&json!(42));
        assert!(matches!(node.kind, NodeKind::Unknown { .. }));
    }

    #[test]
    fn test_node_id_and_legacy_alias() {
        let node = Node::from_value(&json!({"tag": "p", "nodeId": "n-1"}));
        assert_eq!(node.id.as_deref(), Some("n-1"));

        let node = Node::from_value(&json!({"tag": "p", "_nodeId": "0.3"}));
        assert_eq!(node.id.as_deref(), Some("0.3"));
    }

    #[test]
    fn test_children_presence() {
        let node = Node::from_value(&json!({"component": "Hero", "children": []}));
        assert!(!node.has_children());

        let node = Node::from_value(&json!({"tag": "ul", "children": [{"tag": "li"}]}));
        assert!(node.has_children());
    }

    #[test]
    fn test_forest_shapes() {
        assert!(Forest::from_value(&json!([])).is_empty());
        assert!(Forest::from_value(&Value::Null).is_empty());

        let single = Forest::from_value(&json!({"tag": "main"}));
        assert_eq!(single.roots.len(), 1);

        let forest: Forest = serde_json::from_str(
            r#"[{"tag":"header","children":[{"textKey":"a"},{"text":"b"}]},{"component":"Footer"}]"#,
        )
        .unwrap();
        assert_eq!(forest.roots.len(), 2);
        assert_eq!(forest.node_count(), 4);
    }
}
