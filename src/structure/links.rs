//! Edit-command links
//!
//! Mutations are performed by the backend's `editStructure` command; the
//! viewer only links to it.

use super::address::Address;
use url::form_urlencoded;

/// Command path appended to the configured command base
pub const EDIT_COMMAND: &str = "editStructure";

/// Action sent with node-scoped links
pub const ACTION_UPDATE: &str = "update";

/// Query parameters of an edit link. Empty or absent values are omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditParams<'a> {
    pub structure_type: &'a str,
    pub name: Option<&'a str>,
    pub node_id: Option<&'a str>,
    pub action: Option<&'a str>,
}

/// Compose `{base}/editStructure?type=…&name=…&nodeId=…&action=…`
pub fn edit_link(base: &str, params: &EditParams<'_>) -> String {
    let pairs = [
        ("type", Some(params.structure_type)),
        ("name", params.name),
        ("nodeId", params.node_id),
        ("action", params.action),
    ];

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            query.append_pair(key, value);
        }
    }
    let query = query.finish();

    let path = format!("{}/{}", base.trim_end_matches('/'), EDIT_COMMAND);
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

/// Link that edits a single node
pub fn node_edit_link(
    base: &str,
    structure_type: &str,
    name: Option<&str>,
    address: &Address,
) -> String {
    edit_link(
        base,
        &EditParams {
            structure_type,
            name,
            node_id: Some(address.as_str()),
            action: Some(ACTION_UPDATE),
        },
    )
}

/// Link that edits the whole structure
pub fn structure_edit_link(base: &str, structure_type: &str, name: Option<&str>) -> String {
    edit_link(
        base,
        &EditParams {
            structure_type,
            name,
            ..Default::default()
        },
    )
}
