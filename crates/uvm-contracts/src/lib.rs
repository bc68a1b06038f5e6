//! # UVM Contracts - Invocation Runtime
//!
//! Hosts contracts written against the `uvm-core` value model: dispatches
//! entry points, stages persistent writes, and commits them only when an
//! invocation succeeds.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Invocation Context | `domain/context.rs` | Caller, call frame, block height |
//! | Argument Parsing | `domain/args.rs` | Comma-separated entry-point arguments |
//! | Ports | `ports/` | `Contract`, `KvStore`, `AddressOracle` |
//! | Adapters | `adapters/` | In-memory store, staging overlay, address policy |
//! | Host | `host.rs` | What an entry point may touch |
//! | Service | `service.rs` | `deploy` / `invoke` / `query` with rollback |
//! | Token | `token/` | Reference fungible token |
//!
//! ## Atomicity
//!
//! The invocation is the unit of rollback. An entry point that returns an
//! error leaves the persistent store, the contract's declared storage and the
//! event log exactly as they were.
//!
//! ## Usage Example
//!
//! ```
//! use uvm_contracts::prelude::*;
//!
//! let mut service = ContractService::new(
//!     InMemoryKvStore::new(),
//!     TokenContract,
//!     RuntimeConfig::default(),
//! );
//! let admin = InvocationContext::new("admin", "CONtoken");
//! service.deploy(&admin).unwrap();
//! service.invoke(&admin, "init_token", "Coin,CN,1000000,100").unwrap();
//! service.invoke(&admin, "transfer", "bob,100").unwrap();
//!
//! let balance = service.query(&admin, "balanceOf", "bob").unwrap();
//! assert_eq!(balance.as_deref(), Some("100"));
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

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod host;
pub mod ports;
pub mod service;
pub mod token;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{AddressPolicy, InMemoryKvStore, StagedStore};
    pub use crate::config::{AddressPolicyConfig, RuntimeConfig};
    pub use crate::domain::context::InvocationContext;
    pub use crate::errors::{ContractError, StoreError};
    pub use crate::events::{ContractEvent, InvocationReceipt, StoreWrite};
    pub use crate::host::InvocationHost;
    pub use crate::ports::{AddressOracle, Contract, KvStore};
    pub use crate::service::{ContractService, ServiceStats};
    pub use crate::token::{TokenContract, TokenState, TokenStorage};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
