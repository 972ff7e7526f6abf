// CLI module - command-line argument parsing and handlers
//
// - (no subcommand): interactive viewer, optionally preloading --type/--name
// - show: fetch (or read) a structure and print it as html, text or json
// - config --show|--reset|--edit|--path: configuration management

use crate::client::{self, StructureClient};
use crate::config::{Config, VERSION};
use crate::structure::html::view_to_html;
use crate::structure::{Address, Snapshot, StructureRequest, StructureType, StructureViewer};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// structview - browse and inspect CMS page structures
#[derive(Parser)]
#[command(name = "structview")]
#[command(version = VERSION)]
#[command(about = "Browse CMS structure trees and jump to the edit command", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Structure to load on start
    #[arg(long = "type", value_name = "TYPE")]
    pub structure_type: Option<StructureType>,

    /// Name of the page or component to load on start
    #[arg(long, requires = "structure_type")]
    pub name: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a structure without the TUI
    Show(ShowArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Structure type: page, component, menu or footer
    #[arg(long = "type", value_name = "TYPE")]
    pub structure_type: StructureType,

    /// Page or component name
    #[arg(long)]
    pub name: Option<String>,

    /// Read the structure from a JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also print the details of the node at this address
    #[arg(long, value_name = "ADDRESS")]
    pub select: Option<String>,

    /// Html output: leave every node collapsed
    #[arg(long)]
    pub collapsed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Show effective configuration
    #[arg(long)]
    pub show: bool,

    /// Reset config file to defaults
    #[arg(long)]
    pub reset: bool,

    /// Open config file in $EDITOR
    #[arg(long)]
    pub edit: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,
}

impl Cli {
    /// Structure named by the top-level --type/--name flags
    pub fn initial_request(&self) -> Result<Option<StructureRequest>> {
        let Some(structure_type) = self.structure_type else {
            return Ok(None);
        };
        let request = StructureRequest::new(structure_type, self.name.clone())?;
        Ok(Some(request))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// show
// ─────────────────────────────────────────────────────────────────────────────

/// Load a structure and render it in the requested format
pub async fn run_show(args: &ShowArgs, config: &Config) -> Result<String> {
    let request = StructureRequest::new(args.structure_type, args.name.clone())?;

    let snapshot = match &args.file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&contents)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            Snapshot::new(request, client::extract_structure(value))
        }
        None => {
            let client = StructureClient::new(config)?;
            client
                .fetch(&request)
                .await
                .with_context(|| format!("Failed to load {}", request.title()))?
        }
    };

    render_show(args, config, snapshot)
}

/// Render an already loaded snapshot
pub fn render_show(args: &ShowArgs, config: &Config, snapshot: Snapshot) -> Result<String> {
    let mut viewer = StructureViewer::new(config.command_base.clone());
    viewer.load_snapshot(snapshot);

    let detail = match &args.select {
        Some(address) => {
            let address = Address::new(address.as_str());
            match viewer.select(&address) {
                Some(detail) => Some(detail),
                None => bail!("No node at address {}", address),
            }
        }
        None => None,
    };

    let output = match args.format {
        OutputFormat::Json => viewer.structure_json().unwrap_or_default(),
        OutputFormat::Html => {
            if !args.collapsed {
                viewer.expand_all();
            }
            view_to_html(&viewer)
        }
        OutputFormat::Text => {
            let mut out = match viewer.title() {
                Some(title) => format!("{}\n\n", title),
                None => String::new(),
            };
            match viewer.tree() {
                Some(tree) if !tree.is_empty() => out.push_str(&tree.outline()),
                _ => out.push_str("Structure is empty\n"),
            }
            if let Some(detail) = &detail {
                out.push('\n');
                out.push_str(&detail.to_text());
            }
            out
        }
    };

    Ok(output)
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(args: &ConfigArgs) {
    if args.path {
        handle_config_path();
    } else if args.show {
        handle_config_show();
    } else if args.reset {
        handle_config_reset();
    } else if args.edit {
        handle_config_edit();
    } else {
        println!("Usage: structview config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("api_base = {:?}", config.api_base);
    println!("command_base = {:?}", config.command_base);
    println!(
        "token = {}",
        if config.token.is_some() { "(set)" } else { "(not set)" }
    );
    println!("timeout_secs = {}", config.timeout_secs);
    println!("enable_tui = {}", config.enable_tui);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch {}: {}", editor, e);
            std::process::exit(1);
        }
    }
}
