//! Interview Dashboard CLI
//!
//! Terminal front end for the dashboard core:
//! - Watch the statistic panels update live
//! - Print the panels once
//! - Toggle the persisted panel focus
//! - Run the development scheduler API
//! - Generate a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use interview_dashboard::config::{generate_default_config, Config};
use interview_dashboard::persistence::{FileStorage, FocusBridge};
use interview_dashboard::projection::{self, Panel};
use interview_dashboard::server::{self, AppState, Schedule};
use interview_dashboard::{selection, Dashboard, DashboardDeps, Store};

#[derive(Parser)]
#[command(name = "interview-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live statistics dashboard for the interview scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: platform config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Scheduler API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Push channel WebSocket URL
    #[arg(long, global = true)]
    push_url: Option<String>,

    /// Directory holding the local storage file
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the panels and redraw them on every change until Ctrl+C
    Watch,

    /// Load once and print the panels
    Panels,

    /// Toggle focus on a panel (1-4) and persist it
    Select {
        panel: u32,
    },

    /// Run the development scheduler API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url.clone() {
        config.api.url = url;
    }
    if let Some(url) = cli.push_url.clone() {
        config.push.url = url;
    }
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = dir;
    }

    config
        .logging
        .init()
        .context("failed to initialize logging")?;

    match cli.command {
        Commands::Watch => watch(&config, cli.format).await,
        Commands::Panels => panels(&config, cli.format).await,
        Commands::Select { panel } => select(&config, panel),
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config).await
        }
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

async fn watch(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::initialize(DashboardDeps::from_config(config)?);

    if let Err(e) = dashboard.wait_until_loaded().await {
        dashboard.teardown().await;
        return Err(e).context("initial load failed");
    }

    let mut rx = dashboard.subscribe();
    let mut shown = None;
    let shutdown = server::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let panels = projection::project(&rx.borrow_and_update());
        if panels != shown {
            render(panels.as_deref(), format)?;
            shown = panels;
        }

        tokio::select! {
            _ = &mut shutdown => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    dashboard.teardown().await;
    Ok(())
}

async fn panels(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::initialize(DashboardDeps::from_config(config)?);
    let loaded = dashboard.wait_until_loaded().await;

    if loaded.is_ok() {
        render(dashboard.panels().as_deref(), format)?;
    }
    dashboard.teardown().await;

    loaded.context("initial load failed")
}

/// Applies the toggle to the persisted focus without contacting the scheduler
fn select(config: &Config, panel: u32) -> anyhow::Result<()> {
    if !projection::is_panel(panel) {
        bail!("unknown panel {} (expected 1-{})", panel, projection::PANELS.len());
    }

    let storage = Arc::new(FileStorage::in_dir(config.storage.data_path()));
    let store = Store::new();
    let bridge = Arc::new(FocusBridge::new(storage));
    bridge.seed(&store);
    store.observe(bridge);

    let focus = selection::select_panel(&store, panel);
    println!("Focus: {}", focus);
    Ok(())
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting scheduler API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server.addr()
    );
    let state = AppState::new(Schedule::seed());
    server::serve(state, &config.server.addr(), server::shutdown_signal()).await?;
    Ok(())
}

fn render(panels: Option<&[Panel]>, format: OutputFormat) -> anyhow::Result<()> {
    match (panels, format) {
        (None, OutputFormat::Table) => println!("Loading..."),
        (None, OutputFormat::Json) => println!("null"),
        (Some(panels), OutputFormat::Table) => {
            println!();
            for panel in panels {
                println!("{}", panel);
            }
        }
        (Some(panels), OutputFormat::Json) => {
            println!("{}", serde_json::to_string(panels)?);
        }
    }
    Ok(())
}
