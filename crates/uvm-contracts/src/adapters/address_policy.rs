//! Configurable [`AddressOracle`].
//!
//! An address is well-formed when its length is within the configured bounds
//! and it consists of ASCII letters, digits and underscores. A contract
//! address is a well-formed address that starts with the contract prefix and
//! has at least one character after it.

use crate::config::AddressPolicyConfig;
use crate::ports::AddressOracle;

/// Address rules driven by [`AddressPolicyConfig`].
#[derive(Clone, Debug, Default)]
pub struct AddressPolicy {
    config: AddressPolicyConfig,
}

impl AddressPolicy {
    /// Policy enforcing `config`.
    pub fn new(config: AddressPolicyConfig) -> Self {
        Self { config }
    }
}

impl AddressOracle for AddressPolicy {
    fn is_valid_address(&self, addr: &str) -> bool {
        (self.config.min_len..=self.config.max_len).contains(&addr.len())
            && addr.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn is_valid_contract_address(&self, addr: &str) -> bool {
        self.is_valid_address(addr)
            && addr.len() > self.config.contract_prefix.len()
            && addr.starts_with(&self.config.contract_prefix)
    }
}
