//! # Fungible Token Contract
//!
//! Balances, allowances and time-locked balances kept as decimal strings in
//! the persistent store, with all arithmetic done in [`BigNum`](uvm_core::prelude::BigNum).
//!
//! ## Persistent Layout
//!
//! | Field | Key | Value |
//! |-------|-----|-------|
//! | `users` | owner | balance; absent when zero |
//! | `allowed` | owner | JSON object `{spender: amount}`; absent when empty |
//! | `lockedAmounts` | owner | `"amount,unlockBlock"` |
//!
//! ## Lifecycle
//!
//! ```text
//! NOT_INITED ──init_token──→ COMMON ──pause──→ PAUSED
//!                              │  ↖──resume────┘
//!                              └──stop──→ STOPPED
//! ```

pub mod contract;
pub mod storage;

pub use contract::TokenContract;
pub use storage::{TokenState, TokenStorage};

/// Persistent store fields.
pub mod fields {
    /// Balances.
    pub const USERS: &str = "users";
    /// Allowances, one JSON object per owner.
    pub const ALLOWED: &str = "allowed";
    /// Time-locked balances.
    pub const LOCKED_AMOUNTS: &str = "lockedAmounts";
}

/// Event names.
#[allow(missing_docs)]
pub mod event_names {
    pub const INITED: &str = "Inited";
    pub const TRANSFER: &str = "Transfer";
    pub const APPROVED: &str = "Approved";
    pub const ALLOWED_LOCK: &str = "AllowedLock";
    pub const PAUSED: &str = "Paused";
    pub const RESUMED: &str = "Resumed";
    pub const STOPPED: &str = "Stopped";
    pub const LOCKED: &str = "Locked";
    pub const UNLOCKED: &str = "Unlocked";
}
