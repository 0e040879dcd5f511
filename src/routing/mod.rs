//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → guard.rs (allow-list check)
//!     → matcher.rs (evaluate match condition)
//!     → allowed: continue to handler / denied: 404
//! ```
//!
//! # Design Decisions
//! - Allow-list built at startup, immutable at runtime
//! - No regex in hot path (exact matching only)
//! - The guard never touches the request body

pub mod guard;
pub mod matcher;

pub use guard::{path_guard_middleware, PathGuard, CALC_PATH};
pub use matcher::{ExactPathMatcher, Matcher};
