//! Response writing.
//!
//! # Responsibilities
//! - Serialize success and error envelopes
//! - Set `Content-Type: application/json; charset=UTF-8` and the status code
//!
//! # Design Decisions
//! - `ResponseWriter` is consumed by a write, so one request gets one body
//! - A result JSON cannot carry (NaN, infinity) is an encode error, not `null`
//! - Error envelopes contain only strings and always serialize

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::calc::envelope::{ErrorEnvelope, SuccessEnvelope};
use crate::calc::error::CalcError;

/// Content type of every envelope.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Single-use writer for one request's response.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    _private: (),
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a 200 response carrying `result`.
    ///
    /// Falls back to a 500 error envelope when `result` cannot be encoded.
    pub fn write_success(self, result: f64, time: DateTime<Utc>) -> Response {
        match encode_success(result, time) {
            Ok(bytes) => json_response(StatusCode::OK, bytes),
            Err(err) => {
                tracing::error!(error = %err, "Failed to encode success response");
                self.write_error(&err)
            }
        }
    }

    /// Write the error envelope for `err`, stamped with the current time.
    pub fn write_error(self, err: &CalcError) -> Response {
        let envelope = ErrorEnvelope::from_error(err, Utc::now());
        match serde_json::to_vec(&envelope) {
            Ok(bytes) => json_response(err.status(), bytes),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode error response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn encode_success(result: f64, time: DateTime<Utc>) -> Result<Vec<u8>, CalcError> {
    if !result.is_finite() {
        return Err(CalcError::Encode {
            message: format!("unsupported value: {result}"),
        });
    }
    to_json(&SuccessEnvelope::new(result, time))
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, CalcError> {
    serde_json::to_vec(value).map_err(|e| CalcError::Encode {
        message: e.to_string(),
    })
}

fn json_response(status: StatusCode, bytes: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_write_success() {
        let response = ResponseWriter::new().write_success(6.0, Utc::now());

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=UTF-8"
        );
        let json = body_json(response).await;
        assert_eq!(json["result"], 6.0);
        assert!(json["time"].is_string());
    }

    #[tokio::test]
    async fn test_write_error_uses_error_status() {
        let err = CalcError::MissingFields {
            fields: vec!["Operand1"],
        };
        let response = ResponseWriter::new().write_error(&err);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=UTF-8"
        );
        let json = body_json(response).await;
        assert_eq!(json["type"], "Missing fields");
        assert_eq!(json["fields"][0], "Operand1");
    }

    #[tokio::test]
    async fn test_non_finite_result_is_encode_error() {
        let response = ResponseWriter::new().write_success(f64::INFINITY, Utc::now());

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["type"], "Encode error");
        assert_eq!(
            json["description"],
            "Failed to encode response: unsupported value: inf"
        );
    }
}
