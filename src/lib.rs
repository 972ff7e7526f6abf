// structview - CMS structure tree viewer
//
// Library half of the binary: the structure core plus the client, config,
// logging, CLI handlers and TUI that drive it.

pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod structure;
pub mod tui;
