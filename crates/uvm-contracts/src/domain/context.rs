//! Invocation context: who is calling, which contract, at what height.

use serde::{Deserialize, Serialize};

/// Immutable parameters of one invocation.
///
/// `prev_contract_address` and `prev_api_name` describe the calling frame
/// when the invocation came from another contract; both are `None` for a
/// call made directly by an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Account that signed the transaction.
    pub caller_address: String,
    /// Contract being invoked.
    pub contract_address: String,
    /// Contract that made the call, if any.
    pub prev_contract_address: Option<String>,
    /// Entry point of the calling contract, if any.
    pub prev_api_name: Option<String>,
    /// Current block height.
    pub block_number: u64,
}

impl InvocationContext {
    /// A direct call from `caller` to `contract` at block 0.
    pub fn new(caller: impl Into<String>, contract: impl Into<String>) -> Self {
        Self {
            caller_address: caller.into(),
            contract_address: contract.into(),
            prev_contract_address: None,
            prev_api_name: None,
            block_number: 0,
        }
    }

    /// Marks the call as coming from `contract`'s `api`.
    #[must_use]
    pub fn with_prev_frame(mut self, contract: impl Into<String>, api: impl Into<String>) -> Self {
        self.prev_contract_address = Some(contract.into());
        self.prev_api_name = Some(api.into());
        self
    }

    /// Sets the block height.
    #[must_use]
    pub fn at_block(mut self, block_number: u64) -> Self {
        self.block_number = block_number;
        self
    }

    /// The calling contract, ignoring an empty address.
    pub fn calling_contract(&self) -> Option<&str> {
        self.prev_contract_address
            .as_deref()
            .filter(|addr| !addr.is_empty())
    }
}
