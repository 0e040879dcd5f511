//! Path matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Exact matches only; no regex
//! - Query strings are not part of the path

use axum::http::Uri;

/// Trait for matching request URIs against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the URI matches this condition.
    fn matches(&self, uri: &Uri) -> bool;
}

/// Matches one exact request path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, uri: &Uri) -> bool {
        uri.path() == self.path
    }
}
