//! `POST /calc` handler.
//!
//! # State Machine
//! ```text
//! read body ──Read──────────────→ Fatal          (500)
//!     │     ──BodyTooLarge──────→ Rejected       (413)
//!     ▼
//! decode ────Decode─────────────→ DecodeFailed   (400)
//!     │  ────MissingFields──────→ MissingFields  (400)
//!     │  ────Internal───────────→ Fatal          (500)
//!     ▼
//! multiply → write ─────────────→ Success        (200)
//!                  ──Encode─────→ Fatal          (500)
//! ```

use std::borrow::Cow;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::HeaderMap,
    response::Response,
};
use chrono::Utc;

use crate::calc::error::CalcError;
use crate::calc::operation::multiply;
use crate::calc::request::decode_calc_request;
use crate::http::body::BoundedBodyReader;
use crate::http::request::RequestIdExt;
use crate::http::response::ResponseWriter;
use crate::observability::metrics;

/// Body bytes echoed into debug logs.
const BODY_LOG_PREVIEW_BYTES: usize = 256;

/// State injected into the calculation handler.
#[derive(Debug, Clone, Default)]
pub struct CalcState {
    pub reader: BoundedBodyReader,
}

/// Terminal state of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    DecodeFailed,
    MissingFields,
    Rejected,
    Fatal,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::DecodeFailed => "decode_failed",
            Outcome::MissingFields => "missing_fields",
            Outcome::Rejected => "rejected",
            Outcome::Fatal => "fatal",
        }
    }

    fn from_error(err: &CalcError) -> Self {
        match err {
            CalcError::Decode { .. } => Outcome::DecodeFailed,
            CalcError::MissingFields { .. } => Outcome::MissingFields,
            CalcError::BodyTooLarge { .. } => Outcome::Rejected,
            CalcError::Read { .. } | CalcError::Encode { .. } | CalcError::Internal { .. } => {
                Outcome::Fatal
            }
        }
    }
}

/// Read, validate and multiply; always answers with a JSON envelope.
pub async fn calc_handler(
    State(state): State<CalcState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id();
    let writer = ResponseWriter::new();

    let (response, outcome) = match process(&state, body).await {
        Ok(result) => {
            let response = writer.write_success(result, Utc::now());
            let outcome = if response.status().is_success() {
                Outcome::Success
            } else {
                Outcome::Fatal
            };
            (response, outcome)
        }
        Err(err) => {
            let outcome = Outcome::from_error(&err);
            if err.is_fatal() {
                tracing::error!(request_id = %request_id, kind = err.kind(), error = %err, "Calculation failed");
            } else {
                tracing::warn!(request_id = %request_id, kind = err.kind(), error = %err, "Calculation request rejected");
            }
            (writer.write_error(&err), outcome)
        }
    };

    tracing::info!(
        request_id = %request_id,
        outcome = outcome.as_str(),
        status = response.status().as_u16(),
        "Calculation request finished"
    );
    metrics::record_request(outcome.as_str(), start_time);

    response
}

async fn process(state: &CalcState, body: Body) -> Result<f64, CalcError> {
    let bytes = state.reader.read(body).await?;
    metrics::record_body_size(bytes.len());
    tracing::debug!(bytes = bytes.len(), body = %body_preview(&bytes), "Request body read");

    let request = decode_calc_request(&bytes)?;
    Ok(multiply(request.operand1, request.operand2))
}

fn body_preview(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(&bytes[..bytes.len().min(BODY_LOG_PREVIEW_BYTES)])
}
