//! # UVM Contracts Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/   # Token scenarios driven through ContractService
//! └── properties/    # proptest properties of the value model and ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p uvm-tests
//! cargo test -p uvm-tests integration::
//! cargo test -p uvm-tests properties::
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
pub mod properties;
