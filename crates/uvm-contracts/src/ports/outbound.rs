//! # Driven Ports (Outbound)
//!
//! Facilities a contract needs from the chain: persistent key-value storage
//! and address validation. Adapters in `crate::adapters` implement them.

use crate::errors::StoreError;

// =============================================================================
// PERSISTENT STORE
// =============================================================================

/// Persistent two-level key-value store, addressed by `(field, key)`.
///
/// Entries not yet written read as `None`. Writing `None` deletes an entry.
pub trait KvStore {
    /// Reads `field[key]`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store cannot be read.
    fn fast_map_get(&self, field: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes or deletes `field[key]`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store rejects the write.
    fn fast_map_set(&mut self, field: &str, key: &str, value: Option<&str>) -> Result<(), StoreError>;
}

// =============================================================================
// ADDRESS VALIDATION
// =============================================================================

/// Chain address rules.
pub trait AddressOracle {
    /// Whether `addr` is a well-formed account or contract address.
    fn is_valid_address(&self, addr: &str) -> bool;

    /// Whether `addr` is a well-formed contract address.
    fn is_valid_contract_address(&self, addr: &str) -> bool;
}
