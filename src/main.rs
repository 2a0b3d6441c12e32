//! Sinedash Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Loaded from (first match wins) `~/.config/sinedash/config.toml`,
//! `/etc/sinedash/config.toml`, `./config.toml`, then environment
//! overrides:
//! - `SINEDASH_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SINEDASH_PORT`: Port to listen on (default: 8080)
//! - `SINEDASH_TITLE`: Page title
//! - `SINEDASH_LOG_LEVEL` / `SINEDASH_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter (overrides the configured level)

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sinedash::app::{serve, AppState};
use sinedash::config::{generate_default_config, Config};

#[derive(Parser)]
#[command(name = "sinedash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Demo dashboard serving interactive synthetic sine-wave charts")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config);

    tracing::info!("Starting Sinedash v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dashboard title: {}", config.dashboard.title);
    tracing::info!(
        "Defaults: samples={} year={} cumulative={}",
        config.dashboard.default_samples,
        config.dashboard.default_year,
        config.dashboard.default_cumulative
    );

    let state = AppState::new(config)?;
    serve(state).await?;

    tracing::info!("Sinedash stopped");
    Ok(())
}

/// Initialize tracing from the logging configuration.
///
/// `RUST_LOG` wins over the configured level, so ad-hoc debugging does not
/// require touching the config file.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "sinedash={},tower_http=info",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
