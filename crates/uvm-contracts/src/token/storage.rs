//! Declared storage of the token contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenState {
    /// Deployed, `init_token` not yet called.
    #[default]
    NotInited,
    /// Normal operation.
    Common,
    /// Transfers suspended until `resume`.
    Paused,
    /// Permanently halted.
    Stopped,
}

impl TokenState {
    /// Name reported by the `state` entry point.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotInited => "NOT_INITED",
            Self::Common => "COMMON",
            Self::Paused => "PAUSED",
            Self::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar token metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStorage {
    /// Display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Total supply in canonical decimal form.
    pub supply: String,
    /// Smallest-unit divisor, a power of ten.
    pub precision: i64,
    /// Lifecycle state.
    pub state: TokenState,
    /// Whether holders may lock balances.
    pub allow_lock: bool,
    /// Deployer; the only account allowed to administer the token.
    pub admin: String,
}

impl Default for TokenStorage {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            supply: "0".to_string(),
            precision: 0,
            state: TokenState::NotInited,
            allow_lock: false,
            admin: String::new(),
        }
    }
}
