//! Comma-separated entry-point arguments.
//!
//! Arguments arrive as one string. Splitting follows the chain's convention:
//! text without a comma is a single field, otherwise trailing empty fields
//! are dropped (`"a,b,"` has two fields, `",,"` has none).

use crate::errors::ContractError;
use uvm_core::prelude::{Array, Value};

/// Splits `arg` on commas into a sequence of strings.
pub fn split_args(arg: &str) -> Array {
    if !arg.contains(',') {
        return std::iter::once(Value::from(arg)).collect();
    }
    let mut parts: Vec<&str> = arg.split(',').collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts.into_iter().map(Value::from).collect()
}

/// Splits `arg` and requires at least `count` fields.
///
/// # Errors
///
/// `ArgumentFormat` carrying `usage` when fewer fields are present.
pub fn parse_at_least_args(arg: &str, count: usize, usage: &str) -> Result<Array, ContractError> {
    let args = split_args(arg);
    if args.size() < count {
        return Err(ContractError::argument(usage));
    }
    Ok(args)
}

/// The 1-based field `index`, or `""` when missing.
pub fn field(args: &Array, index: i64) -> &str {
    args.get(index).and_then(Value::as_str).unwrap_or_default()
}
