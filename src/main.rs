mod commands;
mod config;
mod html;
mod logging;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use dance_calendar_core::event::parse_timezone;
use dance_calendar_core::loader::load_events;
use dance_calendar_core::AppState;
use tracing::debug;

use commands::render::OutputFormat;
use config::Config;

#[derive(Parser)]
#[command(name = "dance-calendar")]
#[command(about = "Browse, filter, share and export salsa, bachata and kizomba events")]
struct Cli {
    /// Events document to load, a path or an http(s) URL (overrides config)
    #[arg(long, global = true)]
    events: Option<String>,

    /// Time zone for event times without an offset, e.g. "Europe/Copenhagen"
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Start from a shared link's query string, e.g. "styles=salsa&view=year"
    #[arg(short, long, global = true, default_value = "")]
    query: String,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month or year grid for the current view
    Render {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List the events that match the filters
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show the details of one event
    Show { id: String },
    /// Print the shareable link for the current state
    Link {
        /// Prefix the query with this URL, e.g. "https://example.com/calendar"
        #[arg(long)]
        base: Option<String>,
    },
    /// Export the matching events as an .ics file
    Export {
        /// Defaults to export_file from config
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Browse interactively
    Browse,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a commented default config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print where the config file is read from
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };

    // Config commands work without loading any events
    let command = match cli.command {
        Commands::Config { command } => return run_config(command, &config_path),
        command => command,
    };

    let mut config = Config::load_from(&config_path)?;
    if let Some(events) = cli.events {
        config.events_source = events;
    }
    if let Some(timezone) = cli.timezone {
        parse_timezone(&timezone).with_context(|| format!("Invalid --timezone: {}", timezone))?;
        config.timezone = timezone;
    }
    let tz = config.tz()?;
    debug!(?config, "Loaded config");

    let events = load_events(&config.events_source, tz).await;
    let now = Utc::now();
    let app = AppState::from_query(events, tz, &cli.query, now);

    match command {
        Commands::Render { format, out } => commands::render::run(&app, format, out, now),
        Commands::List { json } => commands::list::run(&app, json),
        Commands::Show { id } => commands::show::run(&app, &id),
        Commands::Link { base } => commands::link::run(&app, base.as_deref()),
        Commands::Export { out } => commands::export::run(&app, &config, out),
        Commands::Browse => commands::browse::run(app, &config),
        Commands::Config { command } => run_config(command, &config_path),
    }
}

fn run_config(command: ConfigCommands, path: &Path) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => commands::config::init(path, force),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
