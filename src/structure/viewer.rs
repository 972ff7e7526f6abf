//! Structure viewer state
//!
//! `StructureViewer` is the single owner of everything the viewer knows: the
//! last loaded snapshot, its rendered tree and address index, the selection,
//! and the load lifecycle. Front-ends (terminal UI, headless renderer) hold one
//! and route every user action through it by address.
//!
//! Loads are asynchronous. `begin_load` hands out a `LoadTicket`; only the
//! ticket of the most recent load is accepted by `finish_load`, so a slow
//! response can never overwrite a newer one.

use super::address::Address;
use super::detail::{build_detail, DetailView, EditTarget};
use super::node::{Forest, Node};
use super::render::{render, VisualTree};
use super::request::StructureRequest;
use super::selection::SelectionState;
use serde_json::Value;
use std::fmt::Display;

/// A structure as returned by the backend
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub request: StructureRequest,
    /// Untouched JSON, for clipboard export
    pub raw: Value,
    pub forest: Forest,
}

impl Snapshot {
    pub fn new(request: StructureRequest, raw: Value) -> Self {
        let forest = Forest::from_value(&raw);
        Self {
            request,
            raw,
            forest,
        }
    }
}

/// Where the viewer is in the load lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Loaded, but the structure has no roots
    Empty,
    /// Last load failed; the previous tree (if any) is still held
    Failed(String),
}

/// Proof of which load a response belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    request: StructureRequest,
}

impl LoadTicket {
    pub fn request(&self) -> &StructureRequest {
        &self.request
    }
}

#[derive(Debug)]
struct LoadedTree {
    snapshot: Snapshot,
    tree: VisualTree,
}

#[derive(Debug)]
pub struct StructureViewer {
    command_base: String,
    state: LoadState,
    loaded: Option<LoadedTree>,
    selection: SelectionState,
    generation: u64,
    pending: Option<StructureRequest>,
}

impl StructureViewer {
    /// `command_base` is the prefix edit links are built on
    pub fn new(command_base: impl Into<String>) -> Self {
        Self {
            command_base: command_base.into(),
            state: LoadState::Idle,
            loaded: None,
            selection: SelectionState::default(),
            generation: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Start a load. Selection and expansion are frozen until it resolves.
    pub fn begin_load(&mut self, request: StructureRequest) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.pending = Some(request.clone());
        tracing::info!(
            "Loading {} (generation {})",
            request.title(),
            self.generation
        );
        LoadTicket {
            generation: self.generation,
            request,
        }
    }

    /// Apply the outcome of a load. Returns `false` if the ticket is stale
    /// and the result was discarded.
    pub fn finish_load<E: Display>(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Snapshot, E>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale response for {} (generation {}, current {})",
                ticket.request.title(),
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.pending = None;

        match result {
            Ok(snapshot) => {
                let tree = render(&snapshot.forest);
                self.selection.reset(&tree);
                self.state = if tree.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Loaded
                };
                tracing::info!(
                    "Loaded {}: {} node(s)",
                    snapshot.request.title(),
                    tree.index().len()
                );
                self.loaded = Some(LoadedTree { snapshot, tree });
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", ticket.request.title(), e);
                self.state = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    /// Load synchronously from an already available snapshot
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        let ticket = self.begin_load(snapshot.request.clone());
        self.finish_load::<String>(&ticket, Ok(snapshot));
    }

    /// The currently displayed tree, if any snapshot has loaded
    pub fn tree(&self) -> Option<&VisualTree> {
        self.loaded.as_ref().map(|l| &l.tree)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.loaded.as_ref().map(|l| &l.snapshot)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Request of the load in flight
    pub fn pending_request(&self) -> Option<&StructureRequest> {
        self.pending.as_ref()
    }

    /// Request being loaded, or else the one that produced the current tree
    pub fn current_request(&self) -> Option<&StructureRequest> {
        self.pending
            .as_ref()
            .or_else(|| self.snapshot().map(|s| &s.request))
    }

    /// Heading for the current tree
    pub fn title(&self) -> Option<String> {
        self.snapshot().map(|s| s.request.title())
    }

    /// Resolve an address against the current snapshot
    pub fn node(&self, address: &Address) -> Option<&Node> {
        let loaded = self.loaded.as_ref()?;
        loaded.tree.index().resolve(&loaded.snapshot.forest, address)
    }

    /// Select a node by address and build its detail view. Unknown addresses
    /// and calls during a load are ignored.
    pub fn select(&mut self, address: &Address) -> Option<DetailView> {
        if self.is_loading() || self.node(address).is_none() {
            return None;
        }
        self.selection.select(address.clone());
        self.detail()
    }

    pub fn deselect(&mut self) {
        if !self.is_loading() {
            self.selection.deselect();
        }
    }

    /// Detail view of the selected node
    pub fn detail(&self) -> Option<DetailView> {
        let address = self.selection.selected()?;
        let node = self.node(address)?;
        let snapshot = self.snapshot()?;
        let target = EditTarget::for_request(&self.command_base, &snapshot.request);
        Some(build_detail(node, address, &target))
    }

    /// Toggle a node with children. Returns the new expansion flag.
    pub fn toggle_expand(&mut self, address: &Address) -> Option<bool> {
        if self.is_loading() || !self.node(address)?.has_children() {
            return None;
        }
        Some(self.selection.toggle_expand(address))
    }

    pub fn expand(&mut self, address: &Address) {
        if !self.is_loading() && self.node(address).is_some_and(Node::has_children) {
            self.selection.expand(address);
        }
    }

    pub fn collapse(&mut self, address: &Address) {
        if !self.is_loading() && self.node(address).is_some_and(Node::has_children) {
            self.selection.collapse(address);
        }
    }

    pub fn expand_all(&mut self) {
        if !self.is_loading() {
            self.selection.expand_all();
        }
    }

    pub fn collapse_all(&mut self) {
        if !self.is_loading() {
            self.selection.collapse_all();
        }
    }

    /// Loaded structure as 2-space indented JSON
    pub fn structure_json(&self) -> Option<String> {
        self.snapshot()
            .and_then(|s| serde_json::to_string_pretty(&s.raw).ok())
    }
}
