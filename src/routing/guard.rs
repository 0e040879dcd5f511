//! Path allow-list gate.
//!
//! Runs before any handler. Requests whose path is not allowed get a bare
//! 404 and their body is never polled.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::RequestIdExt;
use crate::observability::metrics;
use crate::routing::matcher::{ExactPathMatcher, Matcher};

/// The only path the server answers on.
pub const CALC_PATH: &str = "/calc";

/// Immutable allow-pattern shared by all requests.
#[derive(Debug, Clone)]
pub struct PathGuard {
    matcher: Arc<dyn Matcher>,
}

impl PathGuard {
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            matcher: Arc::new(matcher),
        }
    }

    /// Guard that admits `/calc` only.
    pub fn calc_only() -> Self {
        Self::new(ExactPathMatcher::new(CALC_PATH))
    }

    pub fn allows(&self, request: &Request) -> bool {
        self.matcher.matches(request.uri())
    }
}

/// Middleware that short-circuits disallowed paths to 404.
pub async fn path_guard_middleware(
    State(guard): State<PathGuard>,
    request: Request,
    next: Next,
) -> Response {
    if guard.allows(&request) {
        return next.run(request).await;
    }

    tracing::warn!(
        request_id = %request.request_id(),
        method = %request.method(),
        path = %request.uri().path(),
        "Path not allowed"
    );
    metrics::record_rejected_path();
    StatusCode::NOT_FOUND.into_response()
}
