//! # Contract Service
//!
//! Runs contract entry points with all-or-nothing effects.
//!
//! ## Invocation Lifecycle
//!
//! ```text
//! invoke(ctx, api, arg)
//!   ├─ clone declared storage, open a StagedStore over the persistent store
//!   ├─ Contract::call(api, arg, host, storage)
//!   ├─ Ok  → apply staged writes, keep storage, publish events in a receipt
//!   └─ Err → drop staged writes, storage and events; surface the error
//! ```
//!
//! Queries go through the same path but only accept offline entry points and
//! never commit anything.

use crate::adapters::staged_store::apply_writes;
use crate::adapters::{AddressPolicy, StagedStore};
use crate::config::RuntimeConfig;
use crate::domain::context::InvocationContext;
use crate::errors::ContractError;
use crate::events::{ContractEvent, InvocationReceipt, StoreWrite};
use crate::host::InvocationHost;
use crate::ports::{Contract, KvStore};
use tracing::{debug, info, instrument, warn};

/// Statistics for the contract service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// State-mutating invocations attempted, deployment included.
    pub invocations: u64,
    /// Invocations that committed.
    pub successes: u64,
    /// Invocations that were rolled back.
    pub failures: u64,
    /// Offline queries served.
    pub queries: u64,
}

enum Entry<'e> {
    Init,
    Call { api: &'e str, arg: &'e str },
}

struct Outcome<T> {
    result: Option<String>,
    storage: T,
    events: Vec<ContractEvent>,
    writes: Vec<StoreWrite>,
}

/// Hosts one deployed contract over a persistent store.
pub struct ContractService<S: KvStore, C: Contract> {
    config: RuntimeConfig,
    store: S,
    contract: C,
    storage: C::Storage,
    addresses: AddressPolicy,
    deployed: bool,
    stats: ServiceStats,
}

impl<S: KvStore, C: Contract> ContractService<S, C> {
    /// Creates a service for a not-yet-deployed contract.
    pub fn new(store: S, contract: C, config: RuntimeConfig) -> Self {
        let addresses = AddressPolicy::new(config.addresses.clone());
        Self {
            config,
            store,
            contract,
            storage: C::Storage::default(),
            addresses,
            deployed: false,
            stats: ServiceStats::default(),
        }
    }

    /// Active runtime configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Counters since construction.
    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// The persistent store, reflecting committed invocations only.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The contract's committed storage record.
    pub fn storage(&self) -> &C::Storage {
        &self.storage
    }

    /// The hosted contract.
    pub fn contract(&self) -> &C {
        &self.contract
    }

    /// Whether `deploy` has succeeded.
    pub fn is_deployed(&self) -> bool {
        self.deployed
    }

    /// Runs the contract's `init` hook.
    ///
    /// # Errors
    ///
    /// `Validation` if the contract is already deployed, otherwise whatever
    /// `init` returns. A failed deployment leaves nothing behind.
    #[instrument(skip(self, ctx), fields(contract = %ctx.contract_address, caller = %ctx.caller_address))]
    pub fn deploy(&mut self, ctx: &InvocationContext) -> Result<InvocationReceipt, ContractError> {
        self.stats.invocations += 1;
        if self.deployed {
            self.stats.failures += 1;
            return Err(ContractError::validation("contract already deployed"));
        }
        let receipt = self.run_and_commit(ctx, "init", Entry::Init)?;
        self.deployed = true;
        info!(name = self.contract.name(), "contract deployed");
        Ok(receipt)
    }

    /// Runs a state-mutating entry point.
    ///
    /// # Errors
    ///
    /// Any error from the entry point; the invocation is rolled back.
    #[instrument(skip(self, ctx, arg), fields(contract = %ctx.contract_address, caller = %ctx.caller_address, block = ctx.block_number))]
    pub fn invoke(
        &mut self,
        ctx: &InvocationContext,
        api: &str,
        arg: &str,
    ) -> Result<InvocationReceipt, ContractError> {
        self.stats.invocations += 1;
        if let Err(err) = self.check_call(arg) {
            self.stats.failures += 1;
            return Err(err);
        }
        self.run_and_commit(ctx, api, Entry::Call { api, arg })
    }

    /// Runs an offline entry point and returns its result.
    ///
    /// # Errors
    ///
    /// `NotOffline` for a state-mutating entry point, otherwise any error
    /// from the entry point.
    #[instrument(skip(self, ctx, arg), fields(contract = %ctx.contract_address))]
    pub fn query(
        &mut self,
        ctx: &InvocationContext,
        api: &str,
        arg: &str,
    ) -> Result<Option<String>, ContractError> {
        if !self.contract.is_offline(api) {
            return Err(ContractError::NotOffline(api.to_owned()));
        }
        self.check_call(arg)?;
        let outcome = self.execute(ctx, Entry::Call { api, arg })?;
        if !outcome.writes.is_empty() {
            warn!(writes = outcome.writes.len(), "offline api staged writes; discarded");
        }
        self.stats.queries += 1;
        Ok(outcome.result)
    }

    fn check_call(&self, arg: &str) -> Result<(), ContractError> {
        if !self.deployed {
            return Err(ContractError::validation("contract not deployed"));
        }
        if arg.len() > self.config.max_arg_len {
            return Err(ContractError::argument(format!(
                "argument longer than {} bytes",
                self.config.max_arg_len
            )));
        }
        Ok(())
    }

    fn run_and_commit(
        &mut self,
        ctx: &InvocationContext,
        api: &str,
        entry: Entry<'_>,
    ) -> Result<InvocationReceipt, ContractError> {
        let outcome = match self.execute(ctx, entry) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stats.failures += 1;
                warn!(api, error = %err, "invocation rolled back");
                return Err(err);
            }
        };

        if let Err(err) = apply_writes(&mut self.store, &outcome.writes) {
            self.stats.failures += 1;
            warn!(api, error = %err, "commit failed");
            return Err(err.into());
        }
        self.storage = outcome.storage;
        self.stats.successes += 1;

        debug!(api, writes = outcome.writes.len(), events = outcome.events.len(), "invocation committed");
        if self.config.log_events {
            for event in &outcome.events {
                info!(event = %event.name, payload = %event.payload, "contract event");
            }
        }

        Ok(InvocationReceipt {
            api: api.to_owned(),
            result: outcome.result,
            events: outcome.events,
            writes: outcome.writes,
        })
    }

    fn execute(
        &self,
        ctx: &InvocationContext,
        entry: Entry<'_>,
    ) -> Result<Outcome<C::Storage>, ContractError> {
        let mut staged = StagedStore::new(&self.store);
        let mut storage = self.storage.clone();

        let mut host = InvocationHost::new(ctx, &mut staged, &self.addresses);
        let result = match entry {
            Entry::Init => self.contract.init(&mut host, &mut storage).map(|()| None),
            Entry::Call { api, arg } => self.contract.call(api, arg, &mut host, &mut storage),
        }?;
        let events = host.into_events();

        Ok(Outcome {
            result,
            storage,
            events,
            writes: staged.into_writes(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKvStore;
    use crate::errors::StoreError;

    /// Counter contract: `bump` increments, `fail` writes then errors.
    struct Counter;

    #[derive(Clone, Default)]
    struct CounterStorage {
        bumps: u64,
    }

    impl Contract for Counter {
        type Storage = CounterStorage;

        fn name(&self) -> &'static str {
            "counter"
        }

        fn init(&self, host: &mut InvocationHost<'_>, _: &mut CounterStorage) -> Result<(), ContractError> {
            let owner = host.caller_address().to_owned();
            host.fast_map_set("meta", "owner", Some(&owner))?;
            Ok(())
        }

        fn call(
            &self,
            api: &str,
            arg: &str,
            host: &mut InvocationHost<'_>,
            storage: &mut CounterStorage,
        ) -> Result<Option<String>, ContractError> {
            match api {
                "bump" => {
                    storage.bumps += 1;
                    host.fast_map_set("log", &storage.bumps.to_string(), Some(arg))?;
                    host.emit("Bumped", storage.bumps.to_string());
                    Ok(None)
                }
                "fail" => {
                    storage.bumps += 100;
                    host.fast_map_set("log", "bad", Some(arg))?;
                    host.emit("Bumped", "never");
                    Err(ContractError::validation("boom"))
                }
                "count" => Ok(Some(storage.bumps.to_string())),
                other => Err(ContractError::UnknownApi(other.to_owned())),
            }
        }

        fn is_offline(&self, api: &str) -> bool {
            api == "count"
        }
    }

    fn deployed() -> ContractService<InMemoryKvStore, Counter> {
        let mut service = ContractService::new(InMemoryKvStore::new(), Counter, RuntimeConfig::default());
        service.deploy(&InvocationContext::new("alice", "CONcounter")).unwrap();
        service
    }

    #[test]
    fn test_deploy_runs_init_once() {
        let mut service = deployed();
        assert!(service.is_deployed());
        assert_eq!(
            service.store().fast_map_get("meta", "owner").unwrap().as_deref(),
            Some("alice")
        );
        assert!(service.deploy(&InvocationContext::new("bob", "CONcounter")).is_err());
    }

    #[test]
    fn test_invoke_commits_on_success() {
        let mut service = deployed();
        let ctx = InvocationContext::new("alice", "CONcounter");
        let receipt = service.invoke(&ctx, "bump", "hello").unwrap();

        assert_eq!(receipt.events.len(), 1);
        assert_eq!(receipt.writes.len(), 1);
        assert_eq!(service.storage().bumps, 1);
        assert_eq!(service.store().fast_map_get("log", "1").unwrap().as_deref(), Some("hello"));
        assert_eq!(service.query(&ctx, "count", "").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_failed_invoke_rolls_back_everything() {
        let mut service = deployed();
        let ctx = InvocationContext::new("alice", "CONcounter");
        service.invoke(&ctx, "bump", "x").unwrap();

        let err = service.invoke(&ctx, "fail", "y").unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(service.storage().bumps, 1);
        assert_eq!(service.store().fast_map_get("log", "bad").unwrap(), None);

        let stats = service.stats();
        assert_eq!(stats.invocations, 3);
        assert_eq!(stats.successes, 2);
        assert_eq!(stats.failures, 1);
    }

    /// Accepts reads, rejects writes to the `log` field.
    struct ReadOnlyLog(InMemoryKvStore);

    impl KvStore for ReadOnlyLog {
        fn fast_map_get(&self, field: &str, key: &str) -> Result<Option<String>, StoreError> {
            self.0.fast_map_get(field, key)
        }

        fn fast_map_set(&mut self, field: &str, key: &str, value: Option<&str>) -> Result<(), StoreError> {
            if field == "log" {
                return Err(StoreError::Unavailable("read-only".to_string()));
            }
            self.0.fast_map_set(field, key, value)
        }
    }

    #[test]
    fn test_commit_failure_keeps_previous_storage() {
        let mut service = ContractService::new(ReadOnlyLog(InMemoryKvStore::new()), Counter, RuntimeConfig::default());
        let ctx = InvocationContext::new("alice", "CONcounter");
        service.deploy(&ctx).unwrap();

        assert!(matches!(
            service.invoke(&ctx, "bump", "x"),
            Err(ContractError::Store(StoreError::Unavailable(_)))
        ));
        assert_eq!(service.storage().bumps, 0);
        assert_eq!(service.store().0.len(), 1);
        assert_eq!(service.stats().failures, 1);
    }

    #[test]
    fn test_query_rejects_mutating_api() {
        let mut service = deployed();
        let ctx = InvocationContext::new("alice", "CONcounter");
        assert!(matches!(
            service.query(&ctx, "bump", ""),
            Err(ContractError::NotOffline(_))
        ));
        assert_eq!(service.storage().bumps, 0);
    }

    #[test]
    fn test_calls_before_deploy_and_oversized_args_rejected() {
        let mut service = ContractService::new(InMemoryKvStore::new(), Counter, RuntimeConfig::default());
        let ctx = InvocationContext::new("alice", "CONcounter");
        assert!(service.invoke(&ctx, "bump", "").is_err());

        let mut service = deployed();
        let long = "x".repeat(service.config().max_arg_len + 1);
        assert!(matches!(
            service.invoke(&ctx, "bump", &long),
            Err(ContractError::ArgumentFormat(_))
        ));
    }
}
