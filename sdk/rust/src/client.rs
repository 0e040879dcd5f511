use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize)]
struct CalcRequest {
    operand1: f64,
    operand2: f64,
}

/// Successful calculation as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalcResult {
    pub result: f64,
    /// RFC 3339 completion time.
    pub time: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    description: String,
    #[serde(default)]
    fields: Vec<String>,
}

/// Status and JSON body of an arbitrary request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} {kind}: {description}")]
    Api {
        status: StatusCode,
        kind: String,
        description: String,
        fields: Vec<String>,
    },

    #[error("unexpected response ({status}): {body}")]
    Unexpected { status: StatusCode, body: String },
}

pub struct CalcClient {
    client: Client,
    base_url: String,
}

impl CalcClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn calc_url(&self) -> String {
        format!("{}/calc", self.base_url)
    }

    /// Multiply two operands on the server.
    pub async fn multiply(&self, operand1: f64, operand2: f64) -> Result<CalcResult, ClientError> {
        let resp = self
            .client
            .post(self.calc_url())
            .json(&CalcRequest { operand1, operand2 })
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            return serde_json::from_str::<CalcResult>(&text)
                .map_err(|_| ClientError::Unexpected { status, body: text });
        }

        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(err) => Err(ClientError::Api {
                status,
                kind: err.kind,
                description: err.description,
                fields: err.fields,
            }),
            Err(_) => Err(ClientError::Unexpected { status, body: text }),
        }
    }

    /// Post `body` verbatim to `/calc` and return whatever comes back.
    pub async fn post_raw(&self, body: impl Into<String>) -> Result<RawResponse, ClientError> {
        let resp = self
            .client
            .post(self.calc_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let body = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|_| ClientError::Unexpected {
                status,
                body: text.clone(),
            })?
        };

        Ok(RawResponse { status, body })
    }
}
