//! # Domain Layer
//!
//! Invocation parameters and argument parsing shared by every contract.

pub mod args;
pub mod context;

pub use args::{field, parse_at_least_args, split_args};
pub use context::InvocationContext;
