//! Feedback ingestion service.
//!
//! Accepts `POST /api/feedback`, stamps each payload with the server time
//! and the caller's user-agent, and writes it to the log stream as a
//! `[feedback] {...}` line.
//!
//! ```text
//!     Client ──POST──▶ ┌──────────┐   ┌───────────┐   ┌──────────────┐
//!                      │  axum +  │──▶│ feedback  │──▶│ tracing sink │──▶ stdout
//!     Client ◀─{ok}─── │ tower-http│   │  handler  │   └──────────────┘
//!                      └──────────┘   └───────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use feedback_ingest::config::{load_config, validate_config, ConfigError, ServiceConfig};
use feedback_ingest::observability::{logging, metrics};
use feedback_ingest::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "feedback-ingest")]
#[command(about = "Feedback ingestion service", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long, env = "FEEDBACK_BIND")]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability);

    tracing::info!("feedback-ingest v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.feedback.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
