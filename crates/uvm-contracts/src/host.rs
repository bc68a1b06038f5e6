//! # Invocation Host
//!
//! Everything an entry point may touch while it runs: the invocation
//! context, the (staged) persistent store, address rules, and the event log.

use crate::domain::context::InvocationContext;
use crate::errors::StoreError;
use crate::events::ContractEvent;
use crate::ports::{AddressOracle, KvStore};
use tracing::trace;

/// Per-invocation facilities handed to a [`Contract`](crate::ports::Contract).
pub struct InvocationHost<'a> {
    ctx: &'a InvocationContext,
    store: &'a mut dyn KvStore,
    addresses: &'a dyn AddressOracle,
    events: Vec<ContractEvent>,
}

impl<'a> InvocationHost<'a> {
    /// Builds a host over `store`.
    pub fn new(
        ctx: &'a InvocationContext,
        store: &'a mut dyn KvStore,
        addresses: &'a dyn AddressOracle,
    ) -> Self {
        Self {
            ctx,
            store,
            addresses,
            events: Vec::new(),
        }
    }

    /// The full invocation context.
    pub fn context(&self) -> &InvocationContext {
        self.ctx
    }

    /// Account that signed the transaction.
    pub fn caller_address(&self) -> &str {
        &self.ctx.caller_address
    }

    /// The contract currently executing.
    pub fn current_contract_address(&self) -> &str {
        &self.ctx.contract_address
    }

    /// Contract that made the call, if any.
    pub fn prev_contract_address(&self) -> Option<&str> {
        self.ctx.calling_contract()
    }

    /// Entry point of the calling contract, if any.
    pub fn prev_api_name(&self) -> Option<&str> {
        self.ctx.prev_api_name.as_deref()
    }

    /// Current block height.
    pub fn block_number(&self) -> u64 {
        self.ctx.block_number
    }

    /// Reads `field[key]` through the staged store.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn fast_map_get(&self, field: &str, key: &str) -> Result<Option<String>, StoreError> {
        self.store.fast_map_get(field, key)
    }

    /// Stages a write of `field[key]`; `None` deletes.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn fast_map_set(&mut self, field: &str, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        trace!(field, key, value = ?value, "staging store write");
        self.store.fast_map_set(field, key, value)
    }

    /// Whether `addr` is a well-formed address.
    pub fn is_valid_address(&self, addr: &str) -> bool {
        self.addresses.is_valid_address(addr)
    }

    /// Whether `addr` is a well-formed contract address.
    pub fn is_valid_contract_address(&self, addr: &str) -> bool {
        self.addresses.is_valid_contract_address(addr)
    }

    /// Records an event from the current contract.
    pub fn emit(&mut self, name: &str, payload: impl Into<String>) {
        self.events.push(ContractEvent {
            contract_address: self.ctx.contract_address.clone(),
            name: name.to_owned(),
            payload: payload.into(),
        });
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Consumes the host, returning its events in emission order.
    pub fn into_events(self) -> Vec<ContractEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AddressPolicy, InMemoryKvStore};

    #[test]
    fn test_host_reads_context_and_records_events() {
        let ctx = InvocationContext::new("alice", "CONtoken").at_block(7);
        let mut store = InMemoryKvStore::new();
        let policy = AddressPolicy::default();
        let mut host = InvocationHost::new(&ctx, &mut store, &policy);

        assert_eq!(host.caller_address(), "alice");
        assert_eq!(host.current_contract_address(), "CONtoken");
        assert_eq!(host.prev_contract_address(), None);
        assert_eq!(host.block_number(), 7);

        host.fast_map_set("users", "alice", Some("1")).unwrap();
        assert_eq!(host.fast_map_get("users", "alice").unwrap().as_deref(), Some("1"));

        host.emit("Paused", "");
        let events = host.into_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].contract_address, "CONtoken");
    }
}
