//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` overrides the configured level when set
//! - Installed once at startup; components log through `tracing` macros

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for `log_level`.
pub fn default_directives(log_level: &str) -> String {
    let level = log_level.to_lowercase();
    format!("calc_server={level},tower_http={level}")
}

/// Build the filter, preferring `RUST_LOG` when present.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(log_level).into())
}

/// Initialize the global tracing subscriber.
pub fn init_logging(log_level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("DEBUG"),
            "calc_server=debug,tower_http=debug"
        );
    }
}
