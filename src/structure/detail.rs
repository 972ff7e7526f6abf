//! Node detail view
//!
//! Everything the detail panel shows about the selected node, including the
//! two links back into the edit command.

use super::address::Address;
use super::html::escape;
use super::links::{node_edit_link, structure_edit_link};
use super::node::{Node, NodeKind};
use super::request::StructureRequest;

/// Context needed to build edit links: which structure the node belongs to
#[derive(Debug, Clone, Copy)]
pub struct EditTarget<'a> {
    pub command_base: &'a str,
    pub structure_type: &'a str,
    pub name: Option<&'a str>,
}

impl<'a> EditTarget<'a> {
    pub fn for_request(command_base: &'a str, request: &'a StructureRequest) -> Self {
        Self {
            command_base,
            structure_type: request.structure_type.as_str(),
            name: request.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub address: Address,
    /// Tag name, `component: <name>`, `text (translation)`, `text (raw)` or `unknown`
    pub kind: String,
    /// Full literal text (raw text nodes)
    pub text: Option<String>,
    /// `{{key}}` (translated text nodes)
    pub translation_key: Option<String>,
    /// Component name (component nodes)
    pub component: Option<String>,
    /// Pretty-printed attributes, when there are any
    pub attributes_json: Option<String>,
    pub child_count: usize,
    /// Edit just this node
    pub edit_node_link: String,
    /// Edit the whole structure
    pub edit_structure_link: String,
}

/// Describe `node` for the detail panel
pub fn build_detail(node: &Node, address: &Address, target: &EditTarget<'_>) -> DetailView {
    let mut view = DetailView {
        address: address.clone(),
        kind: String::new(),
        text: None,
        translation_key: None,
        component: None,
        attributes_json: None,
        child_count: node.children().len(),
        edit_node_link: node_edit_link(
            target.command_base,
            target.structure_type,
            target.name,
            address,
        ),
        edit_structure_link: structure_edit_link(
            target.command_base,
            target.structure_type,
            target.name,
        ),
    };

    match &node.kind {
        NodeKind::Element {
            tag, attributes, ..
        } => {
            view.kind = tag.clone();
            if !attributes.is_empty() {
                view.attributes_json = serde_json::to_string_pretty(attributes).ok();
            }
        }
        NodeKind::Component { name, .. } => {
            view.kind = format!("component: {}", name);
            view.component = Some(name.clone());
        }
        NodeKind::TranslatedText { key } => {
            view.kind = "text (translation)".to_string();
            view.translation_key = Some(format!("{{{{{}}}}}", key));
        }
        NodeKind::RawText { text } => {
            view.kind = "text (raw)".to_string();
            view.text = Some(text.clone());
        }
        NodeKind::Unknown { .. } => {
            view.kind = "unknown".to_string();
        }
    }

    view
}

impl DetailView {
    /// `(label, value)` pairs in display order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Node ID", self.address.to_string()),
            ("Element", self.kind.clone()),
        ];
        if let Some(text) = &self.text {
            fields.push(("Text Content", format!("\"{}\"", text)));
        }
        if let Some(key) = &self.translation_key {
            fields.push(("Translation Key", key.clone()));
        }
        if let Some(component) = &self.component {
            fields.push(("Component", component.clone()));
        }
        if let Some(json) = &self.attributes_json {
            fields.push(("Attributes", json.clone()));
        }
        fields.push(("Children", format!("{} child node(s)", self.child_count)));
        fields
    }

    /// Plain-text rendering (clipboard, headless output)
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (label, value) in self.fields() {
            if value.contains('\n') {
                out.push_str(&format!("{}:\n{}\n", label, value));
            } else {
                out.push_str(&format!("{}: {}\n", label, value));
            }
        }
        out.push_str(&format!("Edit This Node: {}\n", self.edit_node_link));
        out.push_str(&format!("Edit Full Structure: {}\n", self.edit_structure_link));
        out
    }

    /// Markup rendering; every value is escaped
    pub fn to_html(&self) -> String {
        let mut html = String::from("<dl class=\"definition-list\">\n");
        for (label, value) in self.fields() {
            let value = if label == "Attributes" {
                format!("<pre class=\"node-details__json\">{}</pre>", escape(&value))
            } else {
                format!("<code>{}</code>", escape(&value))
            };
            html.push_str(&format!("<dt>{}</dt>\n<dd>{}</dd>\n", label, value));
        }
        html.push_str("</dl>\n<div class=\"node-details__actions\">\n");
        html.push_str(&format!(
            "<a href=\"{}\" class=\"btn btn--primary\">Edit This Node</a>\n",
            escape(&self.edit_node_link)
        ));
        html.push_str(&format!(
            "<a href=\"{}\" class=\"btn btn--secondary\">Edit Full Structure</a>\n",
            escape(&self.edit_structure_link)
        ));
        html.push_str("</div>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target() -> EditTarget<'static> {
        EditTarget {
            command_base: "/admin/command",
            structure_type: "page",
            name: Some("home"),
        }
    }

    #[test]
    fn test_component_without_children() {
        let node = Node::from_value(&json!({"component": "Hero", "children": []}));
        let view = build_detail(&node, &Address::from("0"), &target());

        assert_eq!(view.kind, "component: Hero");
        assert_eq!(view.child_count, 0);
        assert_eq!(view.component.as_deref(), Some("Hero"));
        assert!(view.attributes_json.is_none());
    }

    #[test]
    fn test_element_attributes_pretty_printed() {
        let node = Node::from_value(&json!({
            "tag": "a",
            "params": {"href": "/x", "class": ["btn", "big"]},
            "children": [{"text": "go"}]
        }));
        let view = build_detail(&node, &Address::from("0.1"), &target());

        assert_eq!(view.kind, "a");
        assert_eq!(view.child_count, 1);
        assert_eq!(
            view.attributes_json.as_deref(),
            Some("{\n  \"class\": [\n    \"btn\",\n    \"big\"\n  ],\n  \"href\": \"/x\"\n}")
        );
    }

    #[test]
    fn test_text_kinds() {
        let view = build_detail(&Node::translated("nav.home"), &Address::from("1"), &target());
        assert_eq!(view.kind, "text (translation)");
        assert_eq!(view.translation_key.as_deref(), Some("{{nav.home}}"));

        let view = build_detail(&Node::raw_text("hello"), &Address::from("2"), &target());
        assert_eq!(view.kind, "text (raw)");
        assert_eq!(view.text.as_deref(), Some("hello"));

        let view = build_detail(&Node::from_value(&json!({})), &Address::from("3"), &target());
        assert_eq!(view.kind, "unknown");
    }

    #[test]
    fn test_links() {
        let view = build_detail(&Node::raw_text("x"), &Address::from("0.2"), &target());
        assert_eq!(
            view.edit_node_link,
            "/admin/command/editStructure?type=page&name=home&nodeId=0.2&action=update"
        );
        assert_eq!(
            view.edit_structure_link,
            "/admin/command/editStructure?type=page&name=home"
        );
    }

    #[test]
    fn test_html_escapes_text() {
        let view = build_detail(
            &Node::raw_text("<script>alert(\"x\")</script>"),
            &Address::from("0"),
            &target(),
        );
        let html = view.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert!(html.contains("nodeId=0&amp;action=update"));
    }

    #[test]
    fn test_text_rendering() {
        let view = build_detail(&Node::raw_text("hi"), &Address::from("0"), &target());
        let text = view.to_text();
        assert!(text.starts_with("Node ID: 0\nElement: text (raw)\nText Content: \"hi\"\n"));
        assert!(text.contains("Children: 0 child node(s)\n"));
    }
}
