//! Shared fixtures: a deployed token behind a `ContractService`.

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;
use uvm_contracts::prelude::*;

/// Address the token is deployed at.
pub const TOKEN_ADDRESS: &str = "CONtoken";

/// Installs a test subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A token service plus a block height shared by every call.
pub struct TokenFixture {
    pub service: ContractService<InMemoryKvStore, TokenContract>,
    pub block: u64,
}

impl TokenFixture {
    /// Deploys the token with `admin` as deployer, not yet initialized.
    pub fn deploy(admin: &str) -> Result<Self> {
        init_tracing();
        let mut service = ContractService::new(
            InMemoryKvStore::new(),
            TokenContract,
            RuntimeConfig::default(),
        );
        service.deploy(&InvocationContext::new(admin, TOKEN_ADDRESS))?;
        Ok(Self { service, block: 0 })
    }

    /// Deploys and runs `init_token` with `args`.
    pub fn init(admin: &str, args: &str) -> Result<Self> {
        let mut fixture = Self::deploy(admin)?;
        fixture.invoke(admin, "init_token", args)?;
        Ok(fixture)
    }

    pub fn ctx(&self, caller: &str) -> InvocationContext {
        InvocationContext::new(caller, TOKEN_ADDRESS).at_block(self.block)
    }

    pub fn invoke(&mut self, caller: &str, api: &str, arg: &str) -> Result<InvocationReceipt, ContractError> {
        let ctx = self.ctx(caller);
        self.service.invoke(&ctx, api, arg)
    }

    /// Runs an offline entry point; the token's queries always return a value.
    pub fn query(&mut self, api: &str, arg: &str) -> Result<String> {
        let ctx = self.ctx("observer");
        match self.service.query(&ctx, api, arg)? {
            Some(result) => Ok(result),
            None => bail!("{api} returned nothing"),
        }
    }

    pub fn balance(&mut self, owner: &str) -> Result<String> {
        self.query("balanceOf", owner)
    }
}
