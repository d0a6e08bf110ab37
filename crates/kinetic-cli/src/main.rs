use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kinetic_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "kinetic")]
#[command(author, version, about = "Kinetic scrolling engine with a terminal playground")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/kinetic/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal pager
    Run,
    /// Replay a gesture trace headlessly and print every frame
    Replay {
        /// Trace file (TOML)
        trace: PathBuf,
        /// Frames per second of the synthetic clock
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print frames as JSON lines
        #[arg(long)]
        json: bool,
        /// Pace output at the frame rate instead of printing at once
        #[arg(long)]
        realtime: bool,
    },
    /// Print the effective configuration, or write a default one
    Config {
        /// Print built-in defaults instead
        #[arg(long, conflicts_with = "init")]
        default: bool,
        /// Write the built-in defaults to the configuration file
        #[arg(long)]
        init: bool,
        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    // Initialize logging, RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Replay {
            trace,
            fps,
            json,
            realtime,
        }) => commands::replay::run(&config, &trace, fps, json, realtime).await,
        Some(Commands::Config {
            default,
            init,
            force,
        }) => {
            if init {
                commands::config::init(&config_path, force)
            } else {
                commands::config::run(&config, &config_path, default)
            }
        }
    }
}
