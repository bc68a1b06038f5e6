//! # Ledger Properties
//!
//! Whatever mix of transfers and allowance spends succeeds or fails, the
//! token's balances always sum to its supply.

#[cfg(test)]
mod tests {
    use crate::fixtures::TokenFixture;
    use proptest::prelude::*;
    use uvm_core::prelude::BigNum;

    const ACCOUNTS: [&str; 4] = ["admin", "alice", "bob", "carol"];
    const SUPPLY: &str = "100000";

    #[derive(Clone, Debug)]
    enum Op {
        Transfer { from: usize, to: usize, amount: u64 },
        Allowance { owner: usize, spender: usize, approved: u64, spent: u64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..ACCOUNTS.len(), 0..ACCOUNTS.len(), 0_u64..60_000)
                .prop_map(|(from, to, amount)| Op::Transfer { from, to, amount }),
            (0..ACCOUNTS.len(), 0..ACCOUNTS.len(), 0_u64..5_000, 0_u64..6_000).prop_map(
                |(owner, spender, approved, spent)| Op::Allowance { owner, spender, approved, spent }
            ),
        ]
    }

    fn total(token: &mut TokenFixture) -> BigNum {
        ACCOUNTS.iter().fold(BigNum::zero(), |sum, owner| {
            let balance = token.balance(owner).unwrap();
            sum.add(&BigNum::parse(&balance).unwrap())
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn balances_always_sum_to_supply(ops in prop::collection::vec(op(), 1..30)) {
            let mut token = TokenFixture::init("admin", &format!("Coin,CN,{SUPPLY},1")).unwrap();
            let supply = BigNum::parse(SUPPLY).unwrap();

            for op in ops {
                // Individual calls may fail; only the sum matters.
                match op {
                    Op::Transfer { from, to, amount } => {
                        let _ = token.invoke(ACCOUNTS[from], "transfer", &format!("{},{amount}", ACCOUNTS[to]));
                    }
                    Op::Allowance { owner, spender, approved, spent } => {
                        let _ = token.invoke(ACCOUNTS[owner], "approve", &format!("{},{approved}", ACCOUNTS[spender]));
                        let _ = token.invoke(
                            ACCOUNTS[spender],
                            "transferFrom",
                            &format!("{},{},{spent}", ACCOUNTS[owner], ACCOUNTS[spender]),
                        );
                    }
                }
                prop_assert_eq!(total(&mut token), supply.clone());
            }
        }
    }
}
