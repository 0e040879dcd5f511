//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span)
//!     → routing::guard (allow-list, 404 otherwise)
//!     → handler.rs (state machine for POST /calc)
//!         → body.rs (bounded read)
//!         → calc (decode, validate, multiply)
//!         → response.rs (JSON envelope)
//!     → Send to client
//! ```

pub mod body;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use body::BoundedBodyReader;
pub use handler::{calc_handler, CalcState, Outcome};
pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::{ResponseWriter, JSON_CONTENT_TYPE};
pub use server::CalcServer;
