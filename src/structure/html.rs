//! Markup serialization
//!
//! Turns a `VisualTree` (or a whole viewer state) into HTML fragments for the
//! admin console. Rows carry `data-address` only; handlers resolve the node
//! through the viewer's address index, so no node data is ever embedded in
//! markup. Every piece of text goes through `escape`.

use super::render::{VisualNode, VisualTree};
use super::selection::SelectionState;
use super::viewer::{LoadState, StructureViewer};

pub const EMPTY_MESSAGE: &str = "Structure is empty";
pub const LOADING_MESSAGE: &str = "Loading structure...";

/// Escape text for element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Serialize a rendered tree
pub fn tree_to_html(tree: &VisualTree, selection: &SelectionState) -> String {
    if tree.is_empty() {
        return format!("<div class=\"empty\"><p>{}</p></div>\n", EMPTY_MESSAGE);
    }
    let mut html = String::new();
    write_level(&mut html, tree.roots(), selection);
    html
}

fn write_level(html: &mut String, nodes: &[VisualNode], selection: &SelectionState) {
    html.push_str("<ul class=\"tree\">\n");
    for node in nodes {
        let address = escape(node.address.as_str());
        let expanded = node.has_children && selection.is_expanded(&node.address);

        let mut item_class = String::from("tree__item");
        if node.has_children {
            item_class.push_str(" tree__item--has-children");
        }
        if expanded {
            item_class.push_str(" tree__item--expanded");
        }
        let row_class = if selection.is_selected(&node.address) {
            "tree__row tree__row--selected"
        } else {
            "tree__row"
        };

        html.push_str(&format!(
            "<li class=\"{}\" data-address=\"{}\">\n<div class=\"{}\" data-address=\"{}\">",
            item_class, address, row_class, address
        ));

        if node.has_children {
            html.push_str(&format!(
                "<span class=\"tree__toggle\" data-address=\"{}\">{}</span>",
                address,
                if expanded { "▼" } else { "▶" }
            ));
        } else {
            html.push_str("<span class=\"tree__spacer\"></span>");
        }

        for span in &node.label.spans {
            html.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                span.role.css_class(),
                escape(&span.text)
            ));
        }
        html.push_str("</div>\n");

        if node.has_children {
            write_level(html, &node.children, selection);
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
}

/// Serialize the full viewer: title, status panel, tree and detail
pub fn view_to_html(viewer: &StructureViewer) -> String {
    let mut html = String::new();

    if let Some(title) = viewer.title() {
        html.push_str(&format!("<h2 class=\"structure-title\">{}</h2>\n", escape(&title)));
    }

    match viewer.state() {
        LoadState::Idle => {}
        LoadState::Loading => {
            html.push_str(&format!(
                "<div class=\"loading\"><span class=\"spinner\"></span> {}</div>\n",
                LOADING_MESSAGE
            ));
            return html;
        }
        LoadState::Failed(message) => {
            html.push_str(&format!(
                "<div class=\"alert alert--error\">{}</div>\n",
                escape(message)
            ));
        }
        LoadState::Loaded | LoadState::Empty => {}
    }

    if let Some(tree) = viewer.tree() {
        html.push_str(&tree_to_html(tree, viewer.selection()));
    }

    if let Some(detail) = viewer.detail() {
        html.push_str("<aside class=\"node-details\">\n");
        html.push_str(&detail.to_html());
        html.push_str("</aside>\n");
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::address::Address;
    use crate::structure::node::Forest;
    use crate::structure::render::render;
    use crate::structure::request::{StructureRequest, StructureType};
    use crate::structure::viewer::Snapshot;
    use serde_json::json;

    fn rendered(value: serde_json::Value) -> (VisualTree, SelectionState) {
        let tree = render(&Forest::from_value(&value));
        let mut selection = SelectionState::default();
        selection.reset(&tree);
        (tree, selection)
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_raw_text_never_unescaped() {
        let (tree, selection) = rendered(json!([{"text": "<b>\"bold\" & more</b>"}]));
        let html = tree_to_html(&tree, &selection);

        assert!(!html.contains("<b>"));
        assert!(!html.contains("\"bold\""));
        assert!(html.contains("&lt;b&gt;&quot;bold&quot; &amp; more&lt;/b&gt;"));
    }

    #[test]
    fn test_hostile_explicit_id_is_escaped() {
        let (tree, selection) = rendered(json!([{"tag": "p", "nodeId": "\"><script>"}]));
        let html = tree_to_html(&tree, &selection);
        assert!(!html.contains("<script>"));
        assert!(html.contains("data-address=\"&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn test_scenario_markup() {
        let (tree, mut selection) =
            rendered(json!([{"tag": "div", "params": {"id": "x"}, "children": [{"text": "hello"}]}]));
        selection.toggle_expand(&Address::from("0"));
        selection.select(Address::from("0.0"));
        let html = tree_to_html(&tree, &selection);

        assert!(html.contains(
            "<li class=\"tree__item tree__item--has-children tree__item--expanded\" data-address=\"0\">"
        ));
        assert!(html.contains("<span class=\"tree__attr-id\">#x</span>"));
        assert!(html.contains("<div class=\"tree__row tree__row--selected\" data-address=\"0.0\">"));
        assert!(html.contains("<span class=\"tree__text\">&quot;hello&quot;</span>"));
        assert!(html.contains("<span class=\"tree__toggle\" data-address=\"0\">▼</span>"));
    }

    #[test]
    fn test_childless_rows_have_no_toggle() {
        let (tree, selection) = rendered(json!([{"component": "Hero", "children": []}]));
        let html = tree_to_html(&tree, &selection);
        assert!(!html.contains("tree__toggle"));
        assert!(html.contains("tree__spacer"));
        assert!(html.contains("&lt;Hero/&gt;"));
    }

    #[test]
    fn test_empty_tree_message() {
        let (tree, selection) = rendered(json!([]));
        let html = tree_to_html(&tree, &selection);
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_view_states() {
        let request = StructureRequest::new(StructureType::Footer, None).unwrap();
        let mut viewer = StructureViewer::new("/c");

        let ticket = viewer.begin_load(request.clone());
        assert!(view_to_html(&viewer).contains(LOADING_MESSAGE));

        viewer.finish_load::<String>(&ticket, Ok(Snapshot::new(request.clone(), json!([]))));
        let html = view_to_html(&viewer);
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(html.contains("Structure: footer"));

        let ticket = viewer.begin_load(request);
        viewer.finish_load(&ticket, Err("Error: <timeout>"));
        let html = view_to_html(&viewer);
        assert!(html.contains("<div class=\"alert alert--error\">Error: &lt;timeout&gt;</div>"));
    }
}
