//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler, guard, server produce:
//!     → logging.rs (structured log events inside the request span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```

pub mod logging;
pub mod metrics;
