//! # Domain Layer
//!
//! The value model itself. Pure and synchronous: no I/O, no shared state.
//!
//! - `table` holds storage; `sequence` and `map` are the only ways to write it.
//! - `iter` is the stateless traversal protocol over both views.
//! - `bignum` is exact arithmetic for ledger balances.

pub mod bignum;
pub mod iter;
pub mod map;
pub mod sequence;
pub mod table;
pub mod value;

pub use bignum::*;
pub use iter::*;
pub use map::*;
pub use sequence::*;
pub use table::*;
pub use value::*;
