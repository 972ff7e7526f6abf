//! Selection and expansion state
//!
//! Single-selection state machine (`None` or `Some(address)`) plus a map of
//! per-node expansion flags. Addresses belong to one snapshot, so `reset` is
//! called whenever a new tree replaces the old one.

use super::address::Address;
use super::render::VisualTree;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<Address>,
    /// Absent entries read as collapsed
    expanded: HashMap<Address, bool>,
    /// Addresses that have children in the current tree
    expandable: HashSet<Address>,
}

impl SelectionState {
    /// Start over for a freshly rendered tree
    pub fn reset(&mut self, tree: &VisualTree) {
        self.selected = None;
        self.expanded.clear();
        self.expandable = tree.expandable().into_iter().collect();
    }

    /// Select `address`, replacing any previous selection
    pub fn select(&mut self, address: Address) {
        self.selected = Some(address);
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Address> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, address: &Address) -> bool {
        self.selected.as_ref() == Some(address)
    }

    pub fn is_expanded(&self, address: &Address) -> bool {
        self.expanded.get(address).copied().unwrap_or(false)
    }

    /// Flip the flag for `address`; the first toggle always expands.
    /// Returns the new value.
    pub fn toggle_expand(&mut self, address: &Address) -> bool {
        let flag = self.expanded.entry(address.clone()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn expand(&mut self, address: &Address) {
        self.expanded.insert(address.clone(), true);
    }

    pub fn collapse(&mut self, address: &Address) {
        self.expanded.insert(address.clone(), false);
    }

    /// Expand every node that has children
    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    /// Collapse every node that has children
    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, value: bool) {
        for address in &self.expandable {
            self.expanded.insert(address.clone(), value);
        }
    }

    /// Addresses currently present in the expansion map
    pub fn expansion_entries(&self) -> impl Iterator<Item = (&Address, bool)> {
        self.expanded.iter().map(|(a, v)| (a, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::node::Forest;
    use crate::structure::render::render;
    use serde_json::json;

    fn tree() -> VisualTree {
        render(&Forest::from_value(&json!([
            {"tag": "div", "children": [
                {"tag": "p", "children": [{"text": "a"}]},
                {"text": "b"}
            ]},
            {"component": "Hero", "children": []}
        ])))
    }

    fn snapshot(state: &SelectionState) -> Vec<(Address, bool)> {
        let mut entries: Vec<_> = state
            .expansion_entries()
            .map(|(a, v)| (a.clone(), v))
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_single_selection() {
        let mut state = SelectionState::default();
        state.select(Address::from("0"));
        state.select(Address::from("0.1"));

        assert_eq!(state.selected(), Some(&Address::from("0.1")));
        assert!(!state.is_selected(&Address::from("0")));

        state.deselect();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_first_toggle_expands() {
        let mut state = SelectionState::default();
        let addr = Address::from("0");
        assert!(!state.is_expanded(&addr));
        assert!(state.toggle_expand(&addr));
        assert!(state.is_expanded(&addr));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut state = SelectionState::default();
        let addr = Address::from("0.0");

        let before = state.is_expanded(&addr);
        state.toggle_expand(&addr);
        state.toggle_expand(&addr);
        assert_eq!(state.is_expanded(&addr), before);

        state.expand(&addr);
        state.toggle_expand(&addr);
        state.toggle_expand(&addr);
        assert!(state.is_expanded(&addr));
    }

    #[test]
    fn test_bulk_only_touches_parents() {
        let mut state = SelectionState::default();
        state.reset(&tree());
        state.expand_all();

        assert_eq!(
            snapshot(&state),
            vec![(Address::from("0"), true), (Address::from("0.0"), true)]
        );

        state.collapse_all();
        assert_eq!(
            snapshot(&state),
            vec![(Address::from("0"), false), (Address::from("0.0"), false)]
        );
    }

    #[test]
    fn test_bulk_is_idempotent() {
        let mut state = SelectionState::default();
        state.reset(&tree());

        state.expand_all();
        let once = snapshot(&state);
        state.expand_all();
        assert_eq!(snapshot(&state), once);

        state.collapse_all();
        let once = snapshot(&state);
        state.collapse_all();
        assert_eq!(snapshot(&state), once);
    }

    #[test]
    fn test_reset_clears_everything() {
        let t = tree();
        let mut state = SelectionState::default();
        state.reset(&t);
        state.select(Address::from("0.0.0"));
        state.expand_all();

        state.reset(&t);
        assert_eq!(state.selected(), None);
        assert_eq!(state.expansion_entries().count(), 0);
    }
}
