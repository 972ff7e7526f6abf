//! Tree rendering
//!
//! One depth-first, pre-order walk turns a forest into a `VisualTree`: a
//! target-agnostic description of what each row shows, tagged with the node's
//! address. The same walk fills the `AddressIndex` used to dispatch clicks
//! back to nodes. Markup (`html`) and terminal rows are separate passes over
//! the result, so escaping lives in exactly one place per target.

use super::address::{address, Address, AddressIndex};
use super::node::{Forest, Node, NodeKind};
use super::selection::SelectionState;
use regex::Regex;
use std::sync::OnceLock;

/// Raw text previews are cut at this many characters
pub const TEXT_PREVIEW_CHARS: usize = 30;

/// Suffix appended to truncated previews
pub const ELLIPSIS: &str = "...";

/// What a label fragment represents (drives styling in every target)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanRole {
    Component,
    Element,
    AttrId,
    AttrClass,
    Translation,
    Text,
    Unknown,
    Address,
}

impl SpanRole {
    /// CSS modifier used by the markup pass
    pub fn css_class(&self) -> &'static str {
        match self {
            SpanRole::Component => "tree__component",
            SpanRole::Element => "tree__element",
            SpanRole::AttrId => "tree__attr-id",
            SpanRole::AttrClass => "tree__attr-class",
            SpanRole::Translation => "tree__trans",
            SpanRole::Text => "tree__text",
            SpanRole::Unknown => "tree__unknown",
            SpanRole::Address => "tree__node-id",
        }
    }
}

/// One fragment of a row label. Text is unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpan {
    pub role: SpanRole,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub spans: Vec<LabelSpan>,
}

impl Label {
    fn push(&mut self, role: SpanRole, text: impl Into<String>) {
        self.spans.push(LabelSpan {
            role,
            text: text.into(),
        });
    }

    /// Concatenated text of all spans
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A rendered node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualNode {
    pub address: Address,
    pub label: Label,
    pub has_children: bool,
    pub children: Vec<VisualNode>,
}

/// Flattened row for list-style targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    pub depth: usize,
    pub node: &'a VisualNode,
    pub expanded: bool,
}

/// Result of one render pass
#[derive(Debug, Clone, Default)]
pub struct VisualTree {
    roots: Vec<VisualNode>,
    index: AddressIndex,
}

impl VisualTree {
    /// An empty forest renders to an empty tree: a state, not an error
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> &[VisualNode] {
        &self.roots
    }

    pub fn index(&self) -> &AddressIndex {
        &self.index
    }

    /// Addresses of every node that has children, pre-order
    pub fn expandable(&self) -> Vec<Address> {
        let mut out = Vec::new();
        walk(&self.roots, 0, &mut |node, _| {
            if node.has_children {
                out.push(node.address.clone());
            }
            true
        });
        out
    }

    /// Rows visible under the given expansion state. Children of collapsed
    /// nodes are skipped.
    pub fn visible_rows(&self, selection: &SelectionState) -> Vec<VisibleRow<'_>> {
        let mut rows = Vec::new();
        walk(&self.roots, 0, &mut |node, depth| {
            let expanded = node.has_children && selection.is_expanded(&node.address);
            rows.push(VisibleRow {
                depth,
                node,
                expanded,
            });
            expanded
        });
        rows
    }

    /// Fully expanded indented outline, one label per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        walk(&self.roots, 0, &mut |node, depth| {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&node.label.plain());
            out.push('\n');
            true
        });
        out
    }
}

/// Pre-order walk; the visitor returns whether to descend into children
fn walk<'a, F>(nodes: &'a [VisualNode], depth: usize, visit: &mut F)
where
    F: FnMut(&'a VisualNode, usize) -> bool,
{
    for node in nodes {
        if visit(node, depth) {
            walk(&node.children, depth + 1, visit);
        }
    }
}

/// Render a forest. Each call is a fresh, finite pass.
pub fn render(forest: &Forest) -> VisualTree {
    let mut index = AddressIndex::default();
    let mut path = Vec::new();
    let roots = render_level(&forest.roots, None, &mut path, &mut index);
    tracing::debug!("Rendered structure tree: {} node(s)", index.len());
    VisualTree { roots, index }
}

fn render_level(
    nodes: &[Node],
    parent: Option<&Address>,
    path: &mut Vec<usize>,
    index: &mut AddressIndex,
) -> Vec<VisualNode> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            path.push(i);
            let addr = index.claim(address(node, parent, i), path.clone());

            let mut label = node_label(node);
            label.push(SpanRole::Address, format!("[{}]", addr));

            let children = render_level(node.children(), Some(&addr), path, index);
            path.pop();

            VisualNode {
                address: addr,
                label,
                has_children: node.has_children(),
                children,
            }
        })
        .collect()
}

/// Label for a node, without the address suffix
pub fn node_label(node: &Node) -> Label {
    let mut label = Label::default();
    match &node.kind {
        NodeKind::Component { name, .. } => {
            label.push(SpanRole::Component, format!("<{}/>", name));
        }
        NodeKind::Element {
            tag, attributes, ..
        } => {
            label.push(SpanRole::Element, format!("<{}", tag));
            if let Some(id) = attributes.get("id").filter(|v| !v.is_blank()) {
                label.push(SpanRole::AttrId, format!("#{}", id.joined()));
            }
            if let Some(class) = attributes.get("class").filter(|v| !v.is_blank()) {
                label.push(SpanRole::AttrClass, format!(".{}", dotted(&class.joined())));
            }
            label.push(SpanRole::Element, ">");
        }
        NodeKind::TranslatedText { key } => {
            label.push(SpanRole::Translation, format!("{{{{{}}}}}", key));
        }
        NodeKind::RawText { text } => {
            label.push(SpanRole::Text, format!("\"{}\"", preview(text)));
        }
        NodeKind::Unknown { .. } => {
            label.push(SpanRole::Unknown, "<unknown>");
        }
    }
    label
}

/// Truncate to `TEXT_PREVIEW_CHARS` characters, appending `ELLIPSIS` if cut
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(TEXT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Collapse whitespace runs into dots (`"btn  primary"` → `"btn.primary"`)
fn dotted(classes: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE
        .get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
        .replace_all(classes, ".")
        .into_owned()
}
