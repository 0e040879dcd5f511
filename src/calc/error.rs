//! Error taxonomy for the calculation pipeline.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that end a calculation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Body was not JSON matching the request shape.
    #[error("{message}")]
    Decode { message: String },

    /// Body decoded but one or more required fields were absent.
    #[error("The following {} field(s) were missing: {}", .fields.len(), .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// Body exceeded the configured cap under the reject policy.
    #[error("Request body exceeds the limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The inbound body stream failed.
    #[error("Failed to read request body: {message}")]
    Read { message: String },

    /// The success payload could not be serialized.
    #[error("Failed to encode response: {message}")]
    Encode { message: String },

    /// A decoded request disagreed with its own required-field table.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result type for calculation operations.
pub type Result<T> = std::result::Result<T, CalcError>;

impl CalcError {
    /// Label written to the `type` field of the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::Decode { .. } => "Unmarshal error",
            CalcError::MissingFields { .. } => "Missing fields",
            CalcError::BodyTooLarge { .. } => "Body too large",
            CalcError::Read { .. } => "Read error",
            CalcError::Encode { .. } => "Encode error",
            CalcError::Internal { .. } => "Internal error",
        }
    }

    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            CalcError::Decode { .. } | CalcError::MissingFields { .. } => StatusCode::BAD_REQUEST,
            CalcError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CalcError::Read { .. } | CalcError::Encode { .. } | CalcError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Missing field names, empty for every other kind.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            CalcError::MissingFields { fields } => fields,
            _ => &[],
        }
    }

    /// Fatal errors are server-side failures the caller cannot fix.
    pub fn is_fatal(&self) -> bool {
        self.status().is_server_error()
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::Decode {
            message: err.to_string(),
        }
    }
}
