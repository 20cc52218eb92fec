//! ticketd server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::net::SocketAddr;
use ticketd_core::AppConfig;
use ticketd_server::{AppState, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ticketd - A ticket-tracking HTTP service
#[derive(Parser, Debug)]
#[command(name = "ticketd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "TICKETD_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("ticketd v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration: defaults, then an optional file, then TICKETD_ env vars
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("TICKETD_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // A backing file that exists but does not parse aborts startup here.
    let repo = ticketd_store::from_config(&config.store)
        .await
        .context("failed to open ticket database")?;
    tracing::info!(path = %config.store.path.display(), "Ticket store initialized");

    let state = AppState::new(config.clone(), repo);

    // Create router
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
