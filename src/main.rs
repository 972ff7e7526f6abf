// structview - CMS structure tree viewer
//
// Fetches a page, component, menu or footer structure from the management
// API and shows it as an expandable tree with per-node details and links
// into the edit command.
//
// Architecture:
// - structure: addressing, rendering, selection and details (no I/O)
// - client (reqwest): fetches snapshots
// - TUI (ratatui): interactive viewer; loads run as background tasks
// - show: headless html/text/json rendering

use anyhow::Result;
use clap::Parser;
use structview::cli::{self, Cli, Commands};
use structview::config::Config;
use structview::logging::{self, LogBuffer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        // Config commands never touch logging or the network
        Some(Commands::Config(args)) => {
            cli::handle_config(args);
            return Ok(());
        }
        Some(Commands::Show(args)) => {
            let config = Config::from_env();
            let _file_guard = logging::init(&config.logging, false, &LogBuffer::new());

            let output = cli::run_show(args, &config).await?;
            print!("{}", output);
            return Ok(());
        }
        None => {}
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    if !config.enable_tui {
        anyhow::bail!("TUI disabled by STRUCTVIEW_NO_TUI; use `structview show` instead");
    }

    let initial = cli.initial_request()?;

    // In TUI mode logs go to the in-memory buffer so they never garble the screen
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, true, &log_buffer);

    tracing::info!("structview {} starting ({})", structview::config::VERSION, config.api_base);
    if config.token.is_none() {
        tracing::warn!("No API token configured; set STRUCTVIEW_TOKEN");
    }

    structview::tui::run_tui(config, log_buffer, initial).await
}
