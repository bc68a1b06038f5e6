//! # UVM Core - Contract Value Model
//!
//! The in-process data model a contract must present to the UVM register
//! machine. Correctness here is consensus-critical: a difference in table
//! layout, iteration order or arithmetic between two nodes forks the chain.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Table | `domain/table.rs` | Dense run + sparse overflow store |
//! | Sequence View | `domain/sequence.rs` | 1-based array semantics |
//! | Map View | `domain/map.rs` | String-keyed semantics |
//! | Iterator Protocol | `domain/iter.rs` | Stateless `(container, prev) -> next` |
//! | Exact Arithmetic | `domain/bignum.rs`, `safemath.rs` | Arbitrary-precision balances |
//! | JSON Boundary | `json.rs` | `loads` / `dumps` |
//!
//! ## Data Flow
//!
//! ```text
//! contract logic ──set/get──→ Sequence / Map view ──→ Table (dense | sparse)
//!        │                              │
//!        │                       iterate (Pairs)
//!        ↓
//!  "1000" ──parse──→ BigNum ──add/sub/...──→ BigNum ──to_string──→ "999900"
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use uvm_core::prelude::*;
//!
//! let mut users = Map::new();
//! users.set("alice", Some(Value::from("1000")));
//!
//! let balance = BigNum::parse(users.get_str("alice").unwrap_or("0")).unwrap();
//! let spent = balance.sub(&BigNum::from(100_i64));
//! users.set("alice", Some(Value::from(&spent)));
//!
//! assert_eq!(users.get_str("alice"), Some("900"));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod errors;
pub mod json;
pub mod safemath;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::bignum::BigNum;
    pub use crate::domain::iter::{KeyedTraversal, Pairs};
    pub use crate::domain::map::{Map, MapView};
    pub use crate::domain::sequence::{Array, Sequence};
    pub use crate::domain::table::Table;
    pub use crate::domain::value::{TableKey, Value};

    pub use crate::errors::{ArithmeticError, JsonError};
    pub use crate::json::{dumps, dumps_table, loads, loads_table};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
