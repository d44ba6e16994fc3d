//! Thread-safe custodial wallet ledger
//!
//! This module provides `SharedLedger`, the concurrent counterpart of
//! [`Ledger`](crate::core::ledger::Ledger) for hosts that call the wallet
//! from multiple threads.
//!
//! # Design
//!
//! The balance book is a `DashMap` keyed by token, with each token's
//! per-user balances behind that token's entry lock. A deposit touches two
//! balance cells (depositor and autosave account), so the locking unit is
//! the token book rather than the single cell: holding one entry lock
//! makes the two-cell update atomic, and operations on different tokens
//! still proceed in parallel.
//!
//! # Thread Safety
//!
//! The External Token Store is called while the token's entry lock is
//! held, so no thread can observe a balance update without its
//! corresponding external transfer having committed, or vice versa.
//! Operations on the same token are serialized; no operation blocks
//! indefinitely because every lock is released when the operation
//! returns.

use crate::core::ledger::split_deposit;
use crate::core::traits::TokenStore;
use crate::types::{AccountId, Amount, TokenId, WalletError, WalletEvent};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe wallet with the same semantics as the synchronous `Ledger`
///
/// All operations take `&self` and are safe to call from multiple threads
/// concurrently. For single-threaded workloads the synchronous `Ledger`
/// is the better choice.
pub struct SharedLedger<S> {
    /// The wallet's own account within the External Token Store
    custody_account: AccountId,

    /// Account receiving the automatic diversion of every deposit
    auto_save_account: AccountId,

    /// Percentage of every deposit diverted to the autosave account
    auto_save_percent: u8,

    /// Per-token balance books behind per-entry locks
    books: DashMap<TokenId, HashMap<AccountId, Amount>>,

    /// The External Token Store, serialized behind a mutex
    ///
    /// Always locked after a token's book entry, never before, so the
    /// lock order is fixed and deadlock-free.
    store: Mutex<S>,
}

impl<S: TokenStore> SharedLedger<S> {
    /// Create a new shared ledger with an empty balance book
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `auto_save_percent` exceeds 100.
    pub fn new(
        store: S,
        custody_account: AccountId,
        auto_save_account: AccountId,
        auto_save_percent: u8,
    ) -> Result<Self, WalletError> {
        if auto_save_percent > 100 {
            return Err(WalletError::invalid_configuration(auto_save_percent));
        }

        Ok(SharedLedger {
            custody_account,
            auto_save_account,
            auto_save_percent,
            books: DashMap::new(),
            store: Mutex::new(store),
        })
    }

    /// The account receiving automatic deposit diversions
    pub fn auto_save_account(&self) -> AccountId {
        self.auto_save_account
    }

    /// The percentage of every deposit diverted to the autosave account
    pub fn auto_save_percent(&self) -> u8 {
        self.auto_save_percent
    }

    /// The wallet's own account within the External Token Store
    pub fn custody_account(&self) -> AccountId {
        self.custody_account
    }

    /// Read a user's tracked custodial balance for a token
    ///
    /// A snapshot: concurrent operations may change the balance as soon
    /// as the call returns.
    pub fn balance_of(&self, token: TokenId, user: AccountId) -> Amount {
        self.books
            .get(&token)
            .map(|book| book.get(&user).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Sum of all tracked custodial balances for a token
    pub fn total_custody(&self, token: TokenId) -> Amount {
        self.books
            .get(&token)
            .map(|book| book.values().fold(0, |sum: Amount, b| sum.saturating_add(*b)))
            .unwrap_or(0)
    }

    /// Run a closure against the External Token Store
    ///
    /// Takes the store lock for the duration of the closure. Used by
    /// embedders to manage the store's own surface (issuance,
    /// authorizations) after handing it to the ledger.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock_store())
    }

    /// Lock the store, recovering the guard from a poisoned mutex
    ///
    /// Store state stays consistent under poisoning because every
    /// mutation path in this module is transfer-then-commit.
    fn lock_store(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deposit tokens into the wallet
    ///
    /// Identical semantics to [`Ledger::deposit_token`], made atomic by
    /// holding the token's book lock across the external pull and both
    /// credits.
    ///
    /// [`Ledger::deposit_token`]: crate::core::ledger::Ledger::deposit_token
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount` is zero
    /// * `BalanceOverflow` - a credit would overflow; checked before the
    ///   pull, so nothing has moved
    /// * `ExternalTransferFailed` - the store rejected the pull; no
    ///   balance was mutated
    pub fn deposit_token(
        &self,
        token: TokenId,
        amount: Amount,
        depositor: AccountId,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        if amount == 0 {
            return Err(WalletError::invalid_amount("deposit"));
        }

        let (net, save) = split_deposit(amount, self.auto_save_percent);

        // Entry lock held for the rest of the operation: checks, pull,
        // and credits form one atomic transition for this token.
        let mut book = self.books.entry(token).or_insert_with(HashMap::new);

        let depositor_balance = book.get(&depositor).copied().unwrap_or(0);
        if depositor == self.auto_save_account {
            depositor_balance
                .checked_add(amount)
                .ok_or_else(|| WalletError::balance_overflow(token, depositor))?;
        } else {
            depositor_balance
                .checked_add(net)
                .ok_or_else(|| WalletError::balance_overflow(token, depositor))?;
            book.get(&self.auto_save_account)
                .copied()
                .unwrap_or(0)
                .checked_add(save)
                .ok_or_else(|| WalletError::balance_overflow(token, self.auto_save_account))?;
        }

        self.lock_store()
            .pull_from(token, depositor, self.custody_account, amount)
            .map_err(|e| WalletError::external_transfer_failed("deposit", &e))?;

        *book.entry(depositor).or_insert(0) += net;
        *book.entry(self.auto_save_account).or_insert(0) += save;

        let depositor_balance = book.get(&depositor).copied().unwrap_or(0);
        let save_balance = book.get(&self.auto_save_account).copied().unwrap_or(0);

        let mut events = vec![WalletEvent::Deposit {
            token,
            user: depositor,
            amount,
            balance: depositor_balance,
        }];
        if save > 0 {
            events.push(WalletEvent::AutoSave {
                token,
                user: depositor,
                amount: save,
                balance: save_balance,
            });
        }

        Ok(events)
    }

    /// Withdraw tokens from the wallet
    ///
    /// Identical semantics to [`Ledger::withdraw_token`], made atomic by
    /// holding the token's book lock across the check, debit, and
    /// external push.
    ///
    /// [`Ledger::withdraw_token`]: crate::core::ledger::Ledger::withdraw_token
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount` is zero
    /// * `InsufficientBalance` - `amount` exceeds the tracked balance;
    ///   nothing changed
    /// * `ExternalTransferFailed` - the store rejected the push; the
    ///   debit is rolled back, so nothing changed
    pub fn withdraw_token(
        &self,
        token: TokenId,
        amount: Amount,
        withdrawer: AccountId,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        if amount == 0 {
            return Err(WalletError::invalid_amount("withdrawal"));
        }

        let mut book = self.books.entry(token).or_insert_with(HashMap::new);

        let balance = book.get(&withdrawer).copied().unwrap_or(0);
        if balance < amount {
            return Err(WalletError::insufficient_balance(
                token, withdrawer, balance, amount,
            ));
        }

        let cell = book.entry(withdrawer).or_insert(0);
        *cell -= amount;
        let remaining = *cell;

        if let Err(e) = self
            .lock_store()
            .push_to(token, self.custody_account, withdrawer, amount)
        {
            // Roll the debit back so a rejected push changes nothing.
            *book.entry(withdrawer).or_insert(0) += amount;
            return Err(WalletError::external_transfer_failed("withdrawal", &e));
        }

        Ok(vec![WalletEvent::Withdraw {
            token,
            user: withdrawer,
            amount,
            balance: remaining,
        }])
    }
}
