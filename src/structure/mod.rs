//! Structure tree core
//!
//! Snapshot ingestion, addressing, rendering, selection and node details.
//! Nothing in here touches the network or the terminal.
//!
//! ```text
//! JSON ──▶ Forest ──render──▶ VisualTree + AddressIndex
//!                                  │            │
//!                        html / tui rows    select(address) ──▶ DetailView
//! ```

pub mod address;
pub mod detail;
pub mod html;
pub mod links;
pub mod node;
pub mod render;
pub mod request;
pub mod selection;
pub mod viewer;

pub use address::{Address, AddressIndex};
pub use detail::{build_detail, DetailView, EditTarget};
pub use node::{AttrValue, Attributes, Forest, Node, NodeKind};
pub use render::{render, SpanRole, VisualNode, VisualTree};
pub use request::{RequestError, StructureRequest, StructureType};
pub use selection::SelectionState;
pub use viewer::{LoadState, LoadTicket, Snapshot, StructureViewer};
