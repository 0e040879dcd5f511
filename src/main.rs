//! Multiplication server.
//!
//! ```text
//!   POST /calc ──▶ path guard ──▶ bounded body read ──▶ JSON decode
//!                     │                                    │
//!                    404                        required-field check
//!                                                          │
//!                                  error envelope ◀────────┤
//!                                                          ▼
//!                                  success envelope ◀── multiply
//! ```

use std::path::PathBuf;

use clap::Parser;

use calc_server::config::resolve_config;
use calc_server::lifecycle::startup;
use calc_server::observability::logging;

#[derive(Parser)]
#[command(name = "calc-server")]
#[command(about = "JSON-over-HTTP multiplication service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.bind, cli.log_level)?;

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!("calc-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
