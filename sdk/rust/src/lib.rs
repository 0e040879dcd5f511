//! Client for the calc-server `POST /calc` endpoint.

pub mod client;

pub use client::{CalcClient, CalcResult, ClientError, RawResponse};
