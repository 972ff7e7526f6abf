//! Node addressing
//!
//! Every node in a snapshot gets an address the edit command understands:
//! the backend's explicit id when it sent one, otherwise the dotted path of
//! zero-based sibling indices from the roots (`0.2.1`).
//!
//! Addresses are only meaningful for the snapshot they were computed from.

use super::node::{Forest, Node};
use std::collections::HashMap;
use std::fmt;

/// Location of a node within one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Compute the address of `node`.
///
/// Roots pass `parent = None` and get their sibling index alone.
pub fn address(node: &Node, parent: Option<&Address>, sibling_index: usize) -> Address {
    if let Some(id) = &node.id {
        return Address(id.clone());
    }
    match parent {
        Some(parent) => Address(format!("{}.{}", parent.0, sibling_index)),
        None => Address(sibling_index.to_string()),
    }
}

/// Address → node lookup for one snapshot
///
/// Stores the sibling-index path to each node rather than a reference, so the
/// index can live next to the forest it describes.
#[derive(Debug, Clone, Default)]
pub struct AddressIndex {
    paths: HashMap<Address, Vec<usize>>,
    /// Addresses in pre-order
    order: Vec<Address>,
    duplicates: Vec<Address>,
}

impl AddressIndex {
    /// Claim an address for the node at `path` and return the one it got.
    ///
    /// The first node to ask for an address keeps it. A later claimant (a
    /// repeated explicit id, or an id that shadows a structural path) is
    /// reported as a duplicate and moved to its structural path, or to
    /// `wanted~N` when that is taken too, so every rendered row stays
    /// selectable.
    pub(crate) fn claim(&mut self, wanted: Address, path: Vec<usize>) -> Address {
        if !self.paths.contains_key(&wanted) {
            self.record(wanted.clone(), path);
            return wanted;
        }

        let structural = Address(
            path.iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join("."),
        );
        let fallback = if self.paths.contains_key(&structural) {
            (2..)
                .map(|n| Address(format!("{}~{}", wanted.0, n)))
                .find(|candidate| !self.paths.contains_key(candidate))
                .unwrap_or(structural)
        } else {
            structural
        };

        tracing::warn!(
            "Duplicate node address in snapshot: {} (rendered as {})",
            wanted,
            fallback
        );
        self.duplicates.push(wanted);
        self.record(fallback.clone(), path);
        fallback
    }

    fn record(&mut self, address: Address, path: Vec<usize>) {
        self.order.push(address.clone());
        self.paths.insert(address, path);
    }

    /// Look up a node in the forest this index was built from
    pub fn resolve<'a>(&self, forest: &'a Forest, address: &Address) -> Option<&'a Node> {
        let path = self.paths.get(address)?;
        let (first, rest) = path.split_first()?;
        let mut node = forest.roots.get(*first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.paths.contains_key(address)
    }

    /// All addresses, pre-order
    pub fn addresses(&self) -> &[Address] {
        &self.order
    }

    /// Addresses claimed by more than one node (only possible with explicit ids)
    pub fn duplicates(&self) -> &[Address] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_child_addresses() {
        let node = Node::raw_text("x");
        let root = address(&node, None, 3);
        assert_eq!(root.as_str(), "3");
        assert_eq!(address(&node, Some(&root), 0).as_str(), "3.0");
    }

    #[test]
    fn test_explicit_id_is_verbatim() {
        let node = Node::raw_text("x").with_id("hero-title");
        let parent = Address::from("0.1");
        assert_eq!(address(&node, Some(&parent), 7).as_str(), "hero-title");
    }

    #[test]
    fn test_index_resolves_paths() {
        let forest = Forest::new(vec![Node::element(
            "div",
            Default::default(),
            vec![Node::raw_text("a"), Node::raw_text("b")],
        )]);

        let mut index = AddressIndex::default();
        index.claim(Address::from("0"), vec![0]);
        index.claim(Address::from("0.1"), vec![0, 1]);

        assert_eq!(
            index.resolve(&forest, &Address::from("0.1")),
            Some(&Node::raw_text("b"))
        );
        assert!(index.resolve(&forest, &Address::from("9")).is_none());
    }

    #[test]
    fn test_repeated_id_moves_to_structural_path() {
        let mut index = AddressIndex::default();
        assert_eq!(index.claim(Address::from("dup"), vec![0]), Address::from("dup"));
        assert_eq!(index.claim(Address::from("dup"), vec![1]), Address::from("1"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicates(), &[Address::from("dup")]);
    }

    #[test]
    fn test_id_shadowing_a_path_gets_suffix() {
        let mut index = AddressIndex::default();
        // Root 0 carries the explicit id "1"; root 1 then wants "1" structurally
        index.claim(Address::from("1"), vec![0]);
        let second = index.claim(Address::from("1"), vec![1]);

        assert_eq!(second, Address::from("1~2"));
        assert_eq!(index.addresses(), &[Address::from("1"), Address::from("1~2")]);
        assert_eq!(index.duplicates(), &[Address::from("1")]);
    }
}
