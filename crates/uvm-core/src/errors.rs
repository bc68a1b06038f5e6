//! # Error Types
//!
//! Errors raised by the value model. Every one of them aborts the enclosing
//! invocation; nothing here is recovered locally.

use thiserror::Error;

// =============================================================================
// ARITHMETIC ERRORS
// =============================================================================

/// Errors from exact-arithmetic operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Input is not an optionally signed run of decimal digits.
    #[error("malformed integer: {input:?}")]
    Parse { input: String },

    /// Division or remainder by zero.
    #[error("divide by zero")]
    DivideByZero,

    /// `pow` called with a negative exponent.
    #[error("negative exponent: {0}")]
    NegativeExponent(String),

    /// `pow` exponent does not fit in 32 bits.
    #[error("exponent too large: {0}")]
    ExponentTooLarge(String),
}

// =============================================================================
// JSON ERRORS
// =============================================================================

/// Errors at the JSON encode/decode boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// Text is not valid JSON.
    #[error("json syntax error: {0}")]
    Syntax(String),

    /// A decimal-string number could not be re-encoded.
    #[error("invalid json number: {0:?}")]
    InvalidNumber(String),
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Syntax(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
