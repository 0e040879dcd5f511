//! Request model and decoding.
//!
//! # Responsibilities
//! - Decode raw bytes into a request with optional fields
//! - Report every absent required field, in declaration order
//!
//! # Design Decisions
//! - `null` and omission are both "absent"; `0` is a real value
//! - Required fields are a `(name, accessor)` table checked at compile time
//! - Decoding errors short-circuit the required-field check

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::calc::error::{CalcError, Result};

/// Inbound calculation request as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcRequest {
    pub operand1: Option<f64>,
    pub operand2: Option<f64>,
}

/// A request whose required fields are all present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidCalcRequest {
    pub operand1: f64,
    pub operand2: f64,
}

/// One entry of a required-field table.
pub struct RequiredField<T> {
    /// Name reported back to the caller when the field is absent.
    pub name: &'static str,
    /// Returns true when the field holds a value.
    pub is_present: fn(&T) -> bool,
}

/// Types that declare which of their fields must be present after decoding.
pub trait RequiredFields: Sized + 'static {
    /// The same request with every required field unwrapped.
    type Valid;

    /// Ordered required-field table.
    fn required_fields() -> &'static [RequiredField<Self>];

    /// Names of absent required fields, in table order.
    fn missing_fields(&self) -> Vec<&'static str> {
        Self::required_fields()
            .iter()
            .filter(|field| !(field.is_present)(self))
            .map(|field| field.name)
            .collect()
    }

    /// Unwrap the required fields, `None` if any of them is absent.
    fn into_valid(self) -> Option<Self::Valid>;
}

const CALC_REQUEST_REQUIRED: &[RequiredField<CalcRequest>] = &[
    RequiredField {
        name: "Operand1",
        is_present: |req| req.operand1.is_some(),
    },
    RequiredField {
        name: "Operand2",
        is_present: |req| req.operand2.is_some(),
    },
];

impl RequiredFields for CalcRequest {
    type Valid = ValidCalcRequest;

    fn required_fields() -> &'static [RequiredField<Self>] {
        CALC_REQUEST_REQUIRED
    }

    fn into_valid(self) -> Option<ValidCalcRequest> {
        // Exhaustive: a new CalcRequest field fails to compile here until CALC_REQUEST_REQUIRED is revisited.
        let CalcRequest { operand1, operand2 } = self;
        Some(ValidCalcRequest {
            operand1: operand1?,
            operand2: operand2?,
        })
    }
}

/// Decode `bytes` into `T`, check its required fields and unwrap them.
///
/// A request that passes the table check but still fails to unwrap means the
/// table and the type disagree; that is reported as `CalcError::Internal`.
pub fn decode_request<T>(bytes: &[u8]) -> Result<T::Valid>
where
    T: DeserializeOwned + RequiredFields,
{
    let request: T = serde_json::from_slice(bytes)?;

    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(CalcError::MissingFields { fields: missing });
    }

    request.into_valid().ok_or_else(|| CalcError::Internal {
        message: format!(
            "required-field table of {} does not cover every required field",
            std::any::type_name::<T>()
        ),
    })
}

/// Decode and validate a calculation request in one step.
pub fn decode_calc_request(bytes: &[u8]) -> Result<ValidCalcRequest> {
    decode_request::<CalcRequest>(bytes)
}
