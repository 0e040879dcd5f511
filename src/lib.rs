//! Multiplication service library.
//!
//! One endpoint, `POST /calc`, takes two operands and returns their product.
//! Most of the crate is the request pipeline around it: bounded body reads,
//! required-field validation and JSON envelopes for every outcome.

pub mod calc;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::CalcServer;
pub use lifecycle::Shutdown;
