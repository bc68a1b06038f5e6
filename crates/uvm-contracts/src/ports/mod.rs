//! # Ports
//!
//! - `inbound`: the contract entry-point interface the service drives
//! - `outbound`: the chain facilities a contract depends on

pub mod inbound;
pub mod outbound;

pub use inbound::Contract;
pub use outbound::{AddressOracle, KvStore};
