use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faceit_kd::api::state::AppState;
use faceit_kd::cache::LookupCache;
use faceit_kd::config::{Settings, API_KEY_ENV};
use faceit_kd::faceit::{FaceitApi, FaceitClient, FaceitClientConfig};

#[derive(Parser)]
#[command(name = "faceit-kd")]
#[command(about = "FACEIT CS2 K/D lookup service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting faceit-kd v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load(&cli.config)?;

    // The service starts without a key; requests then answer 500 until
    // one is supplied, matching the fail-closed contract.
    let faceit: Option<Arc<dyn FaceitApi>> = match Settings::api_key() {
        Some(api_key) => Some(Arc::new(FaceitClient::new(FaceitClientConfig {
            base_url: settings.faceit.base_url.clone(),
            api_key,
            timeout: settings.faceit.timeout(),
        })?)),
        None => {
            tracing::warn!("{} not set; lookups will fail closed", API_KEY_ENV);
            None
        }
    };

    let state = AppState {
        faceit,
        cache: Arc::new(LookupCache::new()),
        settings: Arc::new(settings),
        started_at: chrono::Utc::now(),
    };

    let app = faceit_kd::api::build_router(state);
    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
