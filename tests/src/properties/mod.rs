//! Property tests.

pub mod token_ledger;
pub mod value_model;
