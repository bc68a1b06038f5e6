//! # Error Types
//!
//! Every error here aborts the whole invocation. The service discards the
//! invocation's staged writes and surfaces the message to the caller; nothing
//! is retried.

use thiserror::Error;
use uvm_core::errors::{ArithmeticError, JsonError};

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the persistent key-value store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors raised while executing a contract entry point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Malformed or insufficient input (wrong field count, bad integer).
    #[error("argument format error: {0}")]
    ArgumentFormat(String),

    /// Input was well-formed but not acceptable (bad address, non-positive
    /// amount, unauthorized caller, wrong lifecycle state).
    #[error("{0}")]
    Validation(String),

    /// Exact-arithmetic failure (divide by zero, malformed numeric string).
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// Persisted data did not parse back into the expected shape.
    #[error("storage consistency error: {0}")]
    StorageConsistency(String),

    /// Persistent store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No entry point with this name.
    #[error("api not found: {0}")]
    UnknownApi(String),

    /// A state-mutating entry point was called through the offline path.
    #[error("api {0} is not offline")]
    NotOffline(String),
}

impl From<JsonError> for ContractError {
    fn from(err: JsonError) -> Self {
        Self::StorageConsistency(err.to_string())
    }
}

impl ContractError {
    /// Shorthand for [`ContractError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for [`ContractError::ArgumentFormat`].
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::ArgumentFormat(msg.into())
    }

    /// Shorthand for [`ContractError::StorageConsistency`].
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageConsistency(msg.into())
    }
}

// =============================================================================
// TESTS
// =============================================================================
