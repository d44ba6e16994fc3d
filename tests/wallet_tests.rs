//! End-to-end wallet scenarios
//!
//! These tests exercise the full deposit/withdraw protocol against the
//! in-memory External Token Store, covering:
//! - Construction and configuration queries
//! - Deposit splits and event emission
//! - Withdrawal of the net balance and overdraft rejection
//! - Failure paths leaving all state untouched
//! - Conservation across mixed operation sequences
//!
//! Scenario tests run against both the synchronous and the shared ledger
//! where the semantics must match.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use token_wallet::{
        AccountId, Amount, InMemoryTokenStore, Ledger, SharedLedger, TokenId, TokenStore,
        WalletError, WalletEvent,
    };

    const TOKEN: TokenId = 1;
    const WALLET: AccountId = 100;
    const SAVINGS: AccountId = 200;
    const USER: AccountId = 300;

    /// One whole token at a 6-decimal scale
    const UNIT: Amount = 1_000_000;

    /// Store with `funds` minted to USER and approved for the wallet
    fn funded_store(funds: Amount) -> InMemoryTokenStore {
        let mut store = InMemoryTokenStore::new();
        store.mint(TOKEN, USER, funds);
        store.approve(TOKEN, USER, WALLET, funds);
        store
    }

    #[test]
    fn test_tracks_autosave_account_and_percent() {
        let ledger = Ledger::new(InMemoryTokenStore::new(), WALLET, SAVINGS, 5).unwrap();
        assert_eq!(ledger.auto_save_account(), SAVINGS);
        assert_eq!(ledger.auto_save_percent(), 5);
    }

    #[rstest]
    #[case::just_over(101)]
    #[case::max(255)]
    fn test_rejects_out_of_range_percent(#[case] percent: u8) {
        let result = Ledger::new(InMemoryTokenStore::new(), WALLET, SAVINGS, percent);
        assert_eq!(
            result.err(),
            Some(WalletError::InvalidConfiguration { percent })
        );
    }

    #[test]
    fn test_deposit_tracks_custody_in_both_ledgers() {
        let mut ledger = Ledger::new(funded_store(10 * UNIT), WALLET, SAVINGS, 5).unwrap();

        ledger.deposit_token(TOKEN, 10 * UNIT, USER).unwrap();

        // External custody moved to the wallet's account
        assert_eq!(ledger.store().balance_of(TOKEN, WALLET), 10 * UNIT);
        assert_eq!(ledger.store().balance_of(TOKEN, USER), 0);
        // Internal book splits 9.5 / 0.5
        assert_eq!(ledger.balance_of(TOKEN, USER), 9_500_000);
        assert_eq!(ledger.balance_of(TOKEN, SAVINGS), 500_000);
        assert_eq!(ledger.total_custody(TOKEN), 10 * UNIT);
    }

    #[test]
    fn test_deposit_emits_deposit_then_autosave() {
        let mut ledger = Ledger::new(funded_store(10 * UNIT), WALLET, SAVINGS, 5).unwrap();

        let events = ledger.deposit_token(TOKEN, 10 * UNIT, USER).unwrap();

        assert_eq!(
            events,
            vec![
                WalletEvent::Deposit {
                    token: TOKEN,
                    user: USER,
                    amount: 10 * UNIT,
                    balance: 9_500_000,
                },
                WalletEvent::AutoSave {
                    token: TOKEN,
                    user: USER,
                    amount: 500_000,
                    balance: 500_000,
                },
            ]
        );
    }

    #[test]
    fn test_withdraw_net_balance_drains_to_zero() {
        let mut ledger = Ledger::new(funded_store(10 * UNIT), WALLET, SAVINGS, 5).unwrap();
        ledger.deposit_token(TOKEN, 10 * UNIT, USER).unwrap();

        let events = ledger.withdraw_token(TOKEN, 9_500_000, USER).unwrap();

        assert_eq!(
            events,
            vec![WalletEvent::Withdraw {
                token: TOKEN,
                user: USER,
                amount: 9_500_000,
                balance: 0,
            }]
        );
        assert_eq!(ledger.balance_of(TOKEN, USER), 0);
        // The diverted share stays in custody for the autosave account
        assert_eq!(ledger.store().balance_of(TOKEN, USER), 9_500_000);
        assert_eq!(ledger.store().balance_of(TOKEN, WALLET), 500_000);
    }

    #[test]
    fn test_withdraw_gross_amount_after_split_is_rejected() {
        let mut ledger = Ledger::new(funded_store(10 * UNIT), WALLET, SAVINGS, 5).unwrap();
        ledger.deposit_token(TOKEN, 10 * UNIT, USER).unwrap();

        // Only the net 9.5 was credited, so withdrawing the gross 10 fails
        let result = ledger.withdraw_token(TOKEN, 10 * UNIT, USER);

        assert_eq!(
            result.err(),
            Some(WalletError::InsufficientBalance {
                token: TOKEN,
                user: USER,
                balance: 9_500_000,
                requested: 10 * UNIT,
            })
        );
        assert_eq!(ledger.balance_of(TOKEN, USER), 9_500_000);
    }

    #[test]
    fn test_repeat_withdrawal_after_drain_is_rejected() {
        let mut ledger = Ledger::new(funded_store(10 * UNIT), WALLET, SAVINGS, 5).unwrap();
        ledger.deposit_token(TOKEN, 10 * UNIT, USER).unwrap();
        ledger.withdraw_token(TOKEN, 9_500_000, USER).unwrap();

        let result = ledger.withdraw_token(TOKEN, 9_500_000, USER);

        assert!(matches!(
            result,
            Err(WalletError::InsufficientBalance { balance: 0, .. })
        ));
        assert_eq!(ledger.balance_of(TOKEN, USER), 0);
    }

    #[rstest]
    #[case::deposit(true)]
    #[case::withdrawal(false)]
    fn test_zero_amount_is_rejected(#[case] deposit: bool) {
        let mut ledger = Ledger::new(funded_store(UNIT), WALLET, SAVINGS, 5).unwrap();

        let result = if deposit {
            ledger.deposit_token(TOKEN, 0, USER)
        } else {
            ledger.withdraw_token(TOKEN, 0, USER)
        };

        assert!(matches!(result, Err(WalletError::InvalidAmount { .. })));
        assert_eq!(ledger.total_custody(TOKEN), 0);
    }

    #[test]
    fn test_failed_deposit_changes_nothing() {
        let mut store = InMemoryTokenStore::new();
        store.mint(TOKEN, USER, 10 * UNIT);
        // No approval, so the pull must fail
        let mut ledger = Ledger::new(store, WALLET, SAVINGS, 5).unwrap();

        let result = ledger.deposit_token(TOKEN, 10 * UNIT, USER);

        assert!(matches!(
            result,
            Err(WalletError::ExternalTransferFailed { .. })
        ));
        assert_eq!(ledger.balance_of(TOKEN, USER), 0);
        assert_eq!(ledger.balance_of(TOKEN, SAVINGS), 0);
        assert_eq!(ledger.store().balance_of(TOKEN, USER), 10 * UNIT);
        assert_eq!(ledger.store().balance_of(TOKEN, WALLET), 0);
    }

    /// Split correctness across percents and amounts: the diverted share
    /// is the floored percentage and the parts always re-sum to the gross
    #[rstest]
    #[case::five_percent_exact(5, 10 * UNIT, 500_000)]
    #[case::five_percent_floor(5, 99, 4)]
    #[case::one_percent_sub_unit(1, 99, 0)]
    #[case::zero_percent(0, 10 * UNIT, 0)]
    #[case::full_percent(100, 10 * UNIT, 10 * UNIT)]
    #[case::odd_percent(33, 1_000, 330)]
    fn test_split_scenarios(#[case] percent: u8, #[case] amount: Amount, #[case] save: Amount) {
        let mut store = InMemoryTokenStore::new();
        store.mint(TOKEN, USER, amount);
        store.approve(TOKEN, USER, WALLET, amount);
        let mut ledger = Ledger::new(store, WALLET, SAVINGS, percent).unwrap();

        ledger.deposit_token(TOKEN, amount, USER).unwrap();

        assert_eq!(ledger.balance_of(TOKEN, SAVINGS), save);
        assert_eq!(ledger.balance_of(TOKEN, USER), amount - save);
        assert_eq!(ledger.total_custody(TOKEN), amount);
    }

    #[test]
    fn test_conservation_across_mixed_sequence() {
        let mut ledger = Ledger::new(funded_store(100 * UNIT), WALLET, SAVINGS, 5).unwrap();

        let mut pulled: Amount = 0;
        let mut pushed: Amount = 0;

        for amount in [UNIT, 3 * UNIT, 7, 12_345_678] {
            ledger.deposit_token(TOKEN, amount, USER).unwrap();
            pulled += amount;
            assert_eq!(ledger.total_custody(TOKEN), pulled - pushed);
        }

        for amount in [UNIT / 2, 1, 2 * UNIT] {
            ledger.withdraw_token(TOKEN, amount, USER).unwrap();
            pushed += amount;
            assert_eq!(ledger.total_custody(TOKEN), pulled - pushed);
        }

        // Failed operations leave the running totals intact
        let overdraft = ledger.balance_of(TOKEN, USER) + 1;
        assert!(ledger.withdraw_token(TOKEN, overdraft, USER).is_err());
        assert_eq!(ledger.total_custody(TOKEN), pulled - pushed);
        assert_eq!(ledger.store().balance_of(TOKEN, WALLET), pulled - pushed);
    }

    #[test]
    fn test_events_track_running_balances() {
        let mut ledger = Ledger::new(funded_store(100 * UNIT), WALLET, SAVINGS, 5).unwrap();

        for amount in [UNIT, 2 * UNIT, 5 * UNIT] {
            let events = ledger.deposit_token(TOKEN, amount, USER).unwrap();
            match events[0] {
                WalletEvent::Deposit { balance, .. } => {
                    assert_eq!(balance, ledger.balance_of(TOKEN, USER));
                }
                _ => panic!("first event must be a Deposit"),
            }
            match events[1] {
                WalletEvent::AutoSave { balance, .. } => {
                    assert_eq!(balance, ledger.balance_of(TOKEN, SAVINGS));
                }
                _ => panic!("second event must be an AutoSave"),
            }
        }

        let events = ledger.withdraw_token(TOKEN, UNIT, USER).unwrap();
        match events[0] {
            WalletEvent::Withdraw { balance, .. } => {
                assert_eq!(balance, ledger.balance_of(TOKEN, USER));
            }
            _ => panic!("withdrawal must emit a Withdraw"),
        }
    }

    #[test]
    fn test_shared_ledger_matches_sync_scenario() {
        let ledger = SharedLedger::new(funded_store(10 * UNIT), WALLET, SAVINGS, 5).unwrap();

        ledger.deposit_token(TOKEN, 10 * UNIT, USER).unwrap();
        assert_eq!(ledger.balance_of(TOKEN, USER), 9_500_000);
        assert_eq!(ledger.balance_of(TOKEN, SAVINGS), 500_000);

        assert!(ledger.withdraw_token(TOKEN, 10 * UNIT, USER).is_err());
        ledger.withdraw_token(TOKEN, 9_500_000, USER).unwrap();
        assert_eq!(ledger.balance_of(TOKEN, USER), 0);
        assert_eq!(
            ledger.with_store(|s| s.balance_of(TOKEN, USER)),
            9_500_000
        );
    }

    #[test]
    fn test_multiple_users_and_tokens_are_independent() {
        let other_user = USER + 1;
        let other_token = TOKEN + 1;

        let mut store = InMemoryTokenStore::new();
        for user in [USER, other_user] {
            for token in [TOKEN, other_token] {
                store.mint(token, user, 10 * UNIT);
                store.approve(token, user, WALLET, 10 * UNIT);
            }
        }
        let mut ledger = Ledger::new(store, WALLET, SAVINGS, 5).unwrap();

        ledger.deposit_token(TOKEN, 10 * UNIT, USER).unwrap();
        ledger.deposit_token(other_token, 2 * UNIT, other_user).unwrap();

        assert_eq!(ledger.balance_of(TOKEN, USER), 9_500_000);
        assert_eq!(ledger.balance_of(TOKEN, other_user), 0);
        assert_eq!(ledger.balance_of(other_token, other_user), 1_900_000);
        assert_eq!(ledger.balance_of(other_token, USER), 0);
        // Autosave accrues per token
        assert_eq!(ledger.balance_of(TOKEN, SAVINGS), 500_000);
        assert_eq!(ledger.balance_of(other_token, SAVINGS), 100_000);
    }
}
