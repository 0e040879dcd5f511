//! Calculation domain.
//!
//! # Data Flow
//! ```text
//! raw body bytes
//!     → request.rs (JSON decode into optional fields)
//!     → request.rs (required-field check, ordered missing list)
//!     → error.rs (Decode | MissingFields)   or
//!       operation.rs (multiply)
//!     → envelope.rs (success / error JSON body)
//! ```
//!
//! # Design Decisions
//! - Operands are `Option<f64>` so an absent field never reads as zero
//! - Required fields are a compile-time table, not runtime reflection
//! - Every error kind shares one envelope shape

pub mod envelope;
pub mod error;
pub mod operation;
pub mod request;

pub use envelope::{ErrorEnvelope, SuccessEnvelope};
pub use error::CalcError;
pub use operation::multiply;
pub use request::{decode_calc_request, decode_request, CalcRequest, RequiredField, RequiredFields, ValidCalcRequest};
