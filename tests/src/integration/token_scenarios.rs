//! # Token Scenarios
//!
//! End-to-end token flows through `ContractService`: every call is a full
//! invocation with staging, commit and rollback.

#[cfg(test)]
mod tests {
    use crate::fixtures::TokenFixture;
    use anyhow::Result;
    use uvm_contracts::prelude::*;
    use uvm_core::prelude::*;

    // =============================================================================
    // ISSUANCE AND TRANSFER
    // =============================================================================

    #[test]
    fn test_init_then_transfer() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,1000000,100")?;
        assert_eq!(token.balance("admin")?, "1000000");

        token.invoke("admin", "transfer", "bob,100")?;
        assert_eq!(token.balance("admin")?, "999900");
        assert_eq!(token.balance("bob")?, "100");
        Ok(())
    }

    #[test]
    fn test_transfer_receipt_carries_event_and_writes() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,1000,1")?;
        let receipt = token.invoke("admin", "transfer", "bob,0025")?;

        let event = receipt.events_named("Transfer").next().expect("transfer event");
        let payload = loads_table(&event.payload)?.expect("object payload");
        let payload = payload.as_map();
        assert_eq!(payload.get_str("from"), Some("admin"));
        assert_eq!(payload.get_str("to"), Some("bob"));
        assert_eq!(payload.get_str("amount"), Some("25"));

        let users: Vec<_> = receipt
            .writes
            .iter()
            .filter(|w| w.field == "users")
            .map(|w| (w.key.as_str(), w.value.as_deref()))
            .collect();
        assert_eq!(users, vec![("admin", Some("975")), ("bob", Some("25"))]);
        Ok(())
    }

    #[test]
    fn test_amounts_beyond_64_bits() -> Result<()> {
        let supply = "340282366920938463463374607431768211456";
        let mut token = TokenFixture::init("admin", &format!("Big,BIG,{supply},1"))?;
        token.invoke("admin", "transfer", "bob,18446744073709551617")?;
        assert_eq!(token.balance("bob")?, "18446744073709551617");
        assert_eq!(
            token.balance("admin")?,
            "340282366920938463444927863358058659839"
        );
        Ok(())
    }

    // =============================================================================
    // ALLOWANCES
    // =============================================================================

    #[test]
    fn test_approve_then_transfer_from() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,1000000,100")?;
        token.invoke("admin", "transfer", "alice,1000")?;

        token.invoke("alice", "approve", "bob,50")?;
        token.invoke("bob", "transferFrom", "alice,bob,30")?;
        assert_eq!(token.query("approvedBalanceFrom", "bob,alice")?, "20");
        assert_eq!(token.balance("alice")?, "970");
        assert_eq!(token.balance("bob")?, "30");

        let err = token.invoke("bob", "transferFrom", "alice,bob,30").unwrap_err();
        assert!(matches!(err, ContractError::Validation(_)));
        assert_eq!(token.query("approvedBalanceFrom", "bob,alice")?, "20");
        assert_eq!(token.balance("alice")?, "970");
        Ok(())
    }

    #[test]
    fn test_allowances_listing() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,1000,1")?;
        token.invoke("alice", "approve", "bob,5")?;
        token.invoke("alice", "approve", "carol,6")?;

        let listing = loads_table(&token.query("allApprovedFromUser", "alice")?)?.expect("object");
        let spenders: Vec<String> = listing.as_map().iterate().map(|(k, _)| k).collect();
        assert_eq!(spenders, vec!["bob", "carol"]);
        assert_eq!(token.query("allApprovedFromUser", "dave")?, "{}");
        Ok(())
    }

    // =============================================================================
    // LOCKED BALANCES
    // =============================================================================

    #[test]
    fn test_lock_until_block() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,1000000,100")?;
        token.invoke("admin", "transfer", "alice,500")?;
        token.block = 100;

        assert!(token.invoke("alice", "lock", "100,200").is_err());
        token.invoke("admin", "openAllowLock", "")?;
        assert_eq!(token.query("isAllowLock", "")?, "true");

        token.invoke("alice", "lock", "100,200")?;
        assert_eq!(token.balance("alice")?, "400");
        assert_eq!(token.query("lockedBalanceOf", "alice")?, "100,200");

        token.block = 199;
        let err = token.invoke("alice", "unlock", "").unwrap_err();
        assert!(matches!(err, ContractError::Validation(_)));
        assert_eq!(token.balance("alice")?, "400");

        token.block = 200;
        let receipt = token.invoke("alice", "unlock", "")?;
        assert_eq!(token.balance("alice")?, "500");
        assert_eq!(token.query("lockedBalanceOf", "alice")?, "0,0");
        assert_eq!(
            receipt.events_named("Unlocked").next().map(|e| e.payload.as_str()),
            Some("alice,100,200")
        );
        Ok(())
    }

    // =============================================================================
    // ROLLBACK AND LIFECYCLE
    // =============================================================================

    #[test]
    fn test_failed_invocation_commits_nothing() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,100,1")?;
        let before = token.service.store().clone();

        assert!(token.invoke("admin", "transfer", "bob,101").is_err());
        assert!(token.invoke("admin", "transfer", "bob").is_err());
        assert!(token.invoke("admin", "transfer", "bob,abc").is_err());
        assert_eq!(token.service.store(), &before);
        assert_eq!(token.service.stats().failures, 3);
        Ok(())
    }

    /// In-memory store that refuses every write for one account.
    struct FailingAccountStore {
        inner: InMemoryKvStore,
        account: &'static str,
    }

    impl KvStore for FailingAccountStore {
        fn fast_map_get(&self, field: &str, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.fast_map_get(field, key)
        }

        fn fast_map_set(&mut self, field: &str, key: &str, value: Option<&str>) -> Result<(), StoreError> {
            if key == self.account {
                return Err(StoreError::Unavailable("disk".to_string()));
            }
            self.inner.fast_map_set(field, key, value)
        }
    }

    #[test]
    fn test_rejected_commit_conserves_balances() -> Result<()> {
        crate::fixtures::init_tracing();
        let store = FailingAccountStore {
            inner: InMemoryKvStore::new(),
            account: "bob",
        };
        let mut service = ContractService::new(store, TokenContract, RuntimeConfig::default());
        let ctx = InvocationContext::new("admin", crate::fixtures::TOKEN_ADDRESS);
        service.deploy(&ctx)?;
        service.invoke(&ctx, "init_token", "Coin,CN,1000,1")?;
        let before = service.store().inner.clone();

        let err = service.invoke(&ctx, "transfer", "bob,100").unwrap_err();
        assert!(matches!(err, ContractError::Store(StoreError::Unavailable(_))));
        assert_eq!(service.store().inner, before);
        assert_eq!(service.query(&ctx, "balanceOf", "admin")?.as_deref(), Some("1000"));
        assert_eq!(service.query(&ctx, "balanceOf", "bob")?.as_deref(), Some("0"));
        Ok(())
    }

    #[test]
    fn test_error_kinds() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,100,1")?;
        assert!(matches!(
            token.invoke("admin", "transfer", "bob"),
            Err(ContractError::ArgumentFormat(_))
        ));
        assert!(matches!(
            token.invoke("admin", "transfer", "bob,1.5"),
            Err(ContractError::Arithmetic(_))
        ));
        assert!(matches!(
            token.invoke("admin", "transfer", "bob,-1"),
            Err(ContractError::Validation(_))
        ));
        assert!(matches!(
            token.invoke("admin", "transfer", "no spaces allowed,1"),
            Err(ContractError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_pause_blocks_transfers_until_resume() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,100,1")?;
        token.invoke("admin", "pause", "")?;
        assert_eq!(token.query("state", "")?, "PAUSED");
        assert!(token.invoke("admin", "transfer", "bob,1").is_err());

        token.invoke("admin", "resume", "")?;
        token.invoke("admin", "transfer", "bob,1")?;
        assert_eq!(token.balance("bob")?, "1");
        Ok(())
    }

    #[test]
    fn test_offline_path_rejects_mutations() -> Result<()> {
        let mut token = TokenFixture::init("admin", "Coin,CN,100,1")?;
        let err = token.query("transfer", "bob,1").unwrap_err();
        assert!(err.to_string().contains("not offline"));
        assert_eq!(token.balance("bob")?, "0");
        Ok(())
    }
}
