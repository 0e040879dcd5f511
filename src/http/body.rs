//! Bounded request body reading.
//!
//! # Responsibilities
//! - Collect the body stream into memory, never keeping more than the cap
//! - Apply the oversize policy (truncate or reject)
//! - Drop the stream on every return path
//!
//! # Design Decisions
//! - The reader takes the body by value so it is consumed exactly once
//! - The stream is not polled again once the cap is reached under truncation
//! - Stream errors surface as `CalcError::Read`

use axum::body::{Body, Bytes};
use futures_util::StreamExt;

use crate::calc::error::{CalcError, Result};
use crate::config::{LimitsConfig, OversizePolicy};

/// Default cap on body size (1MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Reads request bodies up to a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct BoundedBodyReader {
    limit: usize,
    policy: OversizePolicy,
}

impl Default for BoundedBodyReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_BYTES, OversizePolicy::Truncate)
    }
}

impl BoundedBodyReader {
    pub fn new(limit: usize, policy: OversizePolicy) -> Self {
        Self { limit, policy }
    }

    pub fn from_config(config: &LimitsConfig) -> Self {
        Self::new(config.max_body_bytes, config.oversized_body)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Read `body` to the end or to the cap, whichever comes first.
    pub async fn read(&self, body: Body) -> Result<Bytes> {
        let mut stream = body.into_data_stream();
        let mut buf: Vec<u8> = Vec::new();

        while buf.len() < self.limit {
            let chunk = match stream.next().await {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => {
                    return Err(CalcError::Read {
                        message: e.to_string(),
                    })
                }
                None => return Ok(Bytes::from(buf)),
            };

            let remaining = self.limit - buf.len();
            if chunk.len() > remaining {
                if self.policy == OversizePolicy::Reject {
                    return Err(CalcError::BodyTooLarge { limit: self.limit });
                }
                buf.extend_from_slice(&chunk[..remaining]);
                tracing::debug!(limit = self.limit, "Request body truncated");
                return Ok(Bytes::from(buf));
            }
            buf.extend_from_slice(&chunk);
        }

        if self.policy == OversizePolicy::Reject {
            // Exactly at the cap: only reject if the stream still has data.
            loop {
                match stream.next().await {
                    Some(Ok(chunk)) if chunk.is_empty() => continue,
                    Some(Ok(_)) => return Err(CalcError::BodyTooLarge { limit: self.limit }),
                    Some(Err(e)) => {
                        return Err(CalcError::Read {
                            message: e.to_string(),
                        })
                    }
                    None => break,
                }
            }
        }

        Ok(Bytes::from(buf))
    }
}
