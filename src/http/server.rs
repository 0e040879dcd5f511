//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the calculation handler
//! - Wire up middleware (path guard, request ID, tracing, timeout)
//! - Bind server to listener and shut down gracefully

use std::time::Duration;

use axum::{middleware, routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::body::BoundedBodyReader;
use crate::http::handler::{calc_handler, CalcState};
use crate::http::request::{request_span, MakeRequestUuidV4};
use crate::routing::{path_guard_middleware, PathGuard, CALC_PATH};

/// HTTP server for the calculation endpoint.
pub struct CalcServer {
    router: Router,
    config: ServerConfig,
}

impl CalcServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = CalcState {
            reader: BoundedBodyReader::from_config(&config.limits),
        };

        let router = Self::build_router(&config, state, PathGuard::calc_only());
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServerConfig, state: CalcState, guard: PathGuard) -> Router {
        Router::new()
            .route(CALC_PATH, post(calc_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(guard, path_guard_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_body_bytes = self.config.limits.max_body_bytes,
            oversized_body = ?self.config.limits.oversized_body,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OversizePolicy;
    use crate::http::request::X_REQUEST_ID;
    use crate::http::response::JSON_CONTENT_TYPE;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use futures_util::stream;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        CalcServer::new(ServerConfig::default()).router()
    }

    fn post_calc(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/calc")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Drive one request on a current-thread runtime with a local debugging recorder.
    fn send_recorded(request: Request<Body>) -> (StatusCode, Snapshotter) {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let status = metrics::with_local_recorder(&recorder, || {
            runtime.block_on(app().oneshot(request)).unwrap().status()
        });
        (status, snapshotter)
    }

    fn counter_value(snapshotter: &Snapshotter, name: &str, label: Option<(&str, &str)>) -> u64 {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter(|(key, _, _, _)| {
                let key = key.key();
                key.name() == name
                    && label.map_or(true, |(k, v)| {
                        key.labels().any(|l| l.key() == k && l.value() == v)
                    })
            })
            .map(|(_, _, _, value)| match value {
                DebugValue::Counter(count) => count,
                _ => 0,
            })
            .sum()
    }

    #[tokio::test]
    async fn test_basic_multiplication() {
        let response = app()
            .oneshot(post_calc(r#"{"operand1": 1.4, "operand2": 2.3}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        let json = body_json(response).await;
        let result = json["result"].as_f64().unwrap();
        assert!((result - 3.22).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_zero_operand() {
        let response = app()
            .oneshot(post_calc(r#"{"operand1": 0.1, "operand2": 0.0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["result"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_missing_operand() {
        let response = app()
            .oneshot(post_calc(r#"{"operand1": 1.4}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["type"], "Missing fields");
        assert_eq!(
            json["description"],
            "The following 1 field(s) were missing: Operand2"
        );
        assert_eq!(json["fields"], serde_json::json!(["Operand2"]));
    }

    #[tokio::test]
    async fn test_both_operands_missing() {
        let response = app().oneshot(post_calc("{}")).await.unwrap();

        let json = body_json(response).await;
        assert_eq!(
            json["description"],
            "The following 2 field(s) were missing: Operand1, Operand2"
        );
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let response = app()
            .oneshot(post_calc("malformed JSON example"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["type"], "Unmarshal error");
        assert!(json["description"].as_str().unwrap().contains("expected"));
        assert!(json.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_overflow_is_fatal() {
        let response = app()
            .oneshot(post_calc(r#"{"operand1": 1e200, "operand2": 1e200}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["type"], "Encode error");
    }

    #[tokio::test]
    async fn test_read_failure_is_fatal() {
        let s = stream::iter(vec![Err::<Vec<u8>, _>(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "client went away",
        ))]);
        let response = app()
            .oneshot(post_calc(Body::from_stream(s)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["type"], "Read error");
    }

    #[tokio::test]
    async fn test_reject_policy_returns_413() {
        let mut config = ServerConfig::default();
        config.limits.max_body_bytes = 16;
        config.limits.oversized_body = OversizePolicy::Reject;
        let app = CalcServer::new(config).router();

        let response = app
            .oneshot(post_calc(r#"{"operand1": 1.4, "operand2": 2.3}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["type"], "Body too large");
    }

    #[tokio::test]
    async fn test_truncated_body_fails_decode() {
        let mut config = ServerConfig::default();
        config.limits.max_body_bytes = 16;
        let app = CalcServer::new(config).router();

        let response = app
            .oneshot(post_calc(r#"{"operand1": 1.4, "operand2": 2.3}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["type"], "Unmarshal error");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let request = Request::builder()
            .method("GET")
            .uri("/other")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_fields_outcome_is_counted() {
        let (status, snapshotter) = send_recorded(post_calc(r#"{"operand1": 1.4}"#));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            counter_value(&snapshotter, "calc_requests_total", Some(("outcome", "missing_fields"))),
            1
        );
        assert_eq!(
            counter_value(&snapshotter, "calc_requests_total", Some(("outcome", "success"))),
            0
        );
        assert_eq!(counter_value(&snapshotter, "calc_rejected_paths_total", None), 0);
    }

    #[test]
    fn test_rejected_path_is_counted() {
        let request = Request::builder()
            .method("GET")
            .uri("/other")
            .body(Body::empty())
            .unwrap();
        let (status, snapshotter) = send_recorded(request);

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(counter_value(&snapshotter, "calc_rejected_paths_total", None), 1);
        assert_eq!(counter_value(&snapshotter, "calc_requests_total", None), 0);
    }

    #[tokio::test]
    async fn test_get_calc_not_allowed() {
        let request = Request::builder()
            .method("GET")
            .uri("/calc")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let response = app()
            .oneshot(post_calc(r#"{"operand1": 2, "operand2": 3}"#))
            .await
            .unwrap();
        let generated = response.headers()[X_REQUEST_ID].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());

        let mut request = post_calc(r#"{"operand1": 2, "operand2": 3}"#);
        request
            .headers_mut()
            .insert(X_REQUEST_ID, header::HeaderValue::from_static("req-42"));
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
    }
}
