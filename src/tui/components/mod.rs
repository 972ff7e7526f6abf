// Components module - the panels that make up the viewer screen
//
// - Request bar: structure type + name, Enter loads
// - Tree panel: the structure tree with fold markers
// - Detail panel: fields and edit links of the selected node
// - Logs panel: tail of the in-memory log buffer
// - Status bar and toast overlay

pub mod detail_panel;
pub mod logs_panel;
pub mod request_bar;
pub mod scrollbar;
pub mod status_bar;
pub mod toast;
pub mod tree_panel;

pub use detail_panel::DetailPanel;
pub use logs_panel::LogsPanel;
pub use request_bar::{NameChoices, RequestBar};
pub use toast::Toast;
pub use tree_panel::{TreeAction, TreePanel};
