//! JSON envelopes written back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calc::error::CalcError;

/// Body of a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub result: f64,
    pub time: DateTime<Utc>,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    pub time: DateTime<Utc>,
}

impl SuccessEnvelope {
    pub fn new(result: f64, time: DateTime<Utc>) -> Self {
        Self { result, time }
    }
}

impl ErrorEnvelope {
    /// Build the envelope for `err`, stamped with `time`.
    pub fn from_error(err: &CalcError, time: DateTime<Utc>) -> Self {
        Self {
            kind: err.kind().to_string(),
            description: err.to_string(),
            fields: err.missing_fields().iter().map(|f| f.to_string()).collect(),
            time,
        }
    }
}
