//! # Adapters
//!
//! Implementations of the outbound ports.

pub mod address_policy;
pub mod memory_store;
pub mod staged_store;

pub use address_policy::AddressPolicy;
pub use memory_store::InMemoryKvStore;
pub use staged_store::StagedStore;
