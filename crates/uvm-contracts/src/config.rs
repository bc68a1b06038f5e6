//! Configuration for the invocation runtime

use serde::{Deserialize, Serialize};

/// Address format rules used by the address-policy adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressPolicyConfig {
    /// Prefix that marks a contract address.
    pub contract_prefix: String,
    /// Shortest accepted address.
    pub min_len: usize,
    /// Longest accepted address.
    pub max_len: usize,
}

impl Default for AddressPolicyConfig {
    fn default() -> Self {
        Self {
            contract_prefix: "CON".to_string(),
            min_len: 1,
            max_len: 64,
        }
    }
}

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Address validation rules.
    pub addresses: AddressPolicyConfig,
    /// Longest entry-point argument accepted, in bytes.
    pub max_arg_len: usize,
    /// Log every emitted event at `info` level.
    pub log_events: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            addresses: AddressPolicyConfig::default(),
            max_arg_len: 4096,
            log_events: true,
        }
    }
}

impl RuntimeConfig {
    /// Reads a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
