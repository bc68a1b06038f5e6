//! # Event Schema
//!
//! Records produced by an invocation. Events and store writes are only
//! published through an [`InvocationReceipt`] once the invocation succeeds.

use serde::{Deserialize, Serialize};

/// An event emitted by a contract entry point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Address of the emitting contract.
    pub contract_address: String,
    /// Event name, e.g. `Transfer`.
    pub name: String,
    /// Event payload (plain text or JSON).
    pub payload: String,
}

/// A single write staged against the persistent store.
///
/// `value: None` deletes the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreWrite {
    /// Store field, e.g. `users`.
    pub field: String,
    /// Key within the field.
    pub key: String,
    /// New value; `None` removes the entry.
    pub value: Option<String>,
}

/// Outcome of a successful invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationReceipt {
    /// Entry point that ran.
    pub api: String,
    /// Value returned by the entry point.
    pub result: Option<String>,
    /// Events emitted, in emission order.
    pub events: Vec<ContractEvent>,
    /// Store writes applied, ordered by field then key.
    pub writes: Vec<StoreWrite>,
}

impl InvocationReceipt {
    /// Events with the given name.
    pub fn events_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ContractEvent> {
        self.events.iter().filter(move |e| e.name == name)
    }
}
