//! Cross-crate scenarios.

pub mod token_scenarios;
