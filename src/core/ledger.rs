//! The custodial wallet ledger
//!
//! This module provides the `Ledger` struct, the synchronous wallet core.
//! The ledger owns the mapping of (token, user) to custodial balance and
//! the immutable autosave configuration, and orchestrates every deposit
//! and withdrawal against the External Token Store.
//!
//! The ledger enforces the wallet's invariants:
//! - Conservation: custodial balances always sum to what was pulled in
//!   minus what was pushed out
//! - Exact splits: the autosave diversion and the net credit of a deposit
//!   always add back up to the gross amount
//! - No overdrafts: a withdrawal never exceeds the tracked balance
//! - All-or-nothing: a failed operation mutates nothing

use crate::core::traits::TokenStore;
use crate::types::{AccountId, Amount, TokenId, WalletError, WalletEvent};
use std::collections::HashMap;

/// Compute the autosave split of a gross deposit
///
/// Returns `(net, save)` where `save = floor(amount * percent / 100)` and
/// `net = amount - save`, so `net + save == amount` exactly and the
/// truncation remainder is folded into the depositor's net credit.
///
/// The product is computed as `(amount / 100) * percent` plus
/// `(amount % 100) * percent / 100`, which equals the floored quotient for
/// every `amount` and cannot overflow for any `percent <= 100`.
pub(crate) fn split_deposit(amount: Amount, percent: u8) -> (Amount, Amount) {
    let percent = Amount::from(percent);
    let save = (amount / 100) * percent + (amount % 100) * percent / 100;
    (amount - save, save)
}

/// The custodial wallet: per-(token, user) balances plus autosave config
///
/// Generic over the External Token Store it moves assets through. The
/// autosave account and percentage are fixed at construction; the only
/// mutable state is the balance book, and only `deposit_token` and
/// `withdraw_token` mutate it.
pub struct Ledger<S> {
    /// The wallet's own account within the External Token Store
    custody_account: AccountId,

    /// Account receiving the automatic diversion of every deposit
    auto_save_account: AccountId,

    /// Percentage of every deposit diverted to the autosave account
    auto_save_percent: u8,

    /// Custodial balances: token -> (user -> amount)
    ///
    /// Entries are created lazily on first deposit and never removed;
    /// a drained balance stays in the book at zero.
    balances: HashMap<TokenId, HashMap<AccountId, Amount>>,

    /// The External Token Store this ledger moves assets through
    store: S,
}

impl<S: TokenStore> Ledger<S> {
    /// Create a new ledger with an empty balance book
    ///
    /// # Arguments
    ///
    /// * `store` - The External Token Store to move assets through
    /// * `custody_account` - The wallet's own account in the store
    /// * `auto_save_account` - Account receiving deposit diversions
    /// * `auto_save_percent` - Percentage diverted, must be in [0, 100]
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

        Ok(Ledger {
            custody_account,
            auto_save_account,
            auto_save_percent,
            balances: HashMap::new(),
            store,
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
    /// Returns zero for any (token, user) pair that has never been
    /// deposited into. This is the wallet's own bookkeeping, distinct
    /// from the External Token Store's `balance_of`.
    pub fn balance_of(&self, token: TokenId, user: AccountId) -> Amount {
        self.balances
            .get(&token)
            .and_then(|book| book.get(&user))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all tracked custodial balances for a token
    ///
    /// Equals total pulled in minus total pushed out for that token at
    /// every observation point (the conservation invariant).
    pub fn total_custody(&self, token: TokenId) -> Amount {
        self.balances
            .get(&token)
            .map(|book| book.values().fold(0, |sum: Amount, b| sum.saturating_add(*b)))
            .unwrap_or(0)
    }

    /// Borrow the underlying External Token Store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying External Token Store
    ///
    /// Embedders use this to manage the store's own surface (issuance,
    /// authorizations) after handing it to the ledger.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Deposit tokens into the wallet
    ///
    /// Pulls `amount` of `token` from `depositor` into the wallet's
    /// custody, credits `amount - save` to the depositor and
    /// `save = floor(amount * auto_save_percent / 100)` to the autosave
    /// account, and returns the events describing the change: a `Deposit`
    /// always, followed by an `AutoSave` when the diverted amount is
    /// non-zero.
    ///
    /// The depositor must have authorized the wallet's custody account
    /// for at least `amount` in the External Token Store; that check
    /// belongs to the store, not the ledger.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount` is zero
    /// * `BalanceOverflow` - a credit would overflow; checked before the
    ///   pull, so nothing has moved
    /// * `ExternalTransferFailed` - the store rejected the pull; no
    ///   balance was mutated
    pub fn deposit_token(
        &mut self,
        token: TokenId,
        amount: Amount,
        depositor: AccountId,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        if amount == 0 {
            return Err(WalletError::invalid_amount("deposit"));
        }

        let (net, save) = split_deposit(amount, self.auto_save_percent);

        // Validate both credits before touching the store so a rejection
        // leaves external and custodial balances untouched.
        let depositor_balance = self.balance_of(token, depositor);
        if depositor == self.auto_save_account {
            depositor_balance
                .checked_add(amount)
                .ok_or_else(|| WalletError::balance_overflow(token, depositor))?;
        } else {
            depositor_balance
                .checked_add(net)
                .ok_or_else(|| WalletError::balance_overflow(token, depositor))?;
            self.balance_of(token, self.auto_save_account)
                .checked_add(save)
                .ok_or_else(|| WalletError::balance_overflow(token, self.auto_save_account))?;
        }

        self.store
            .pull_from(token, depositor, self.custody_account, amount)
            .map_err(|e| WalletError::external_transfer_failed("deposit", &e))?;

        let book = self.balances.entry(token).or_default();
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
    /// Debits exactly `amount` from the withdrawer's tracked balance and
    /// pushes it from the wallet's custody back to the withdrawer. No
    /// autosave diversion applies on withdrawal. Returns the `Withdraw`
    /// event describing the change.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - `amount` is zero
    /// * `InsufficientBalance` - `amount` exceeds the tracked balance;
    ///   checked before any debit or external call, so nothing changed
    /// * `ExternalTransferFailed` - the store rejected the push; the
    ///   debit is rolled back, so nothing changed
    pub fn withdraw_token(
        &mut self,
        token: TokenId,
        amount: Amount,
        withdrawer: AccountId,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        if amount == 0 {
            return Err(WalletError::invalid_amount("withdrawal"));
        }

        let balance = self.balance_of(token, withdrawer);
        if balance < amount {
            return Err(WalletError::insufficient_balance(
                token, withdrawer, balance, amount,
            ));
        }

        let book = self.balances.entry(token).or_default();
        let cell = book.entry(withdrawer).or_insert(0);
        *cell -= amount;
        let remaining = *cell;

        if let Err(e) = self
            .store
            .push_to(token, self.custody_account, withdrawer, amount)
        {
            // Roll the debit back so a rejected push changes nothing.
            if let Some(book) = self.balances.get_mut(&token) {
                *book.entry(withdrawer).or_insert(0) += amount;
            }
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
