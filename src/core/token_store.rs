//! In-memory reference implementation of the External Token Store
//!
//! This module provides `InMemoryTokenStore`, a HashMap-backed store with
//! ERC-20-style balance and allowance semantics. It is the store the test
//! suite and benchmarks run the ledger against, and a usable backend for
//! embedders that keep all assets in-process.
//!
//! The store is responsible for:
//! - Tracking per-(token, owner) external balances
//! - Tracking per-(token, owner, spender) transfer authorizations
//! - Enforcing the allowance check on every pull

use crate::core::traits::TokenStore;
use crate::types::{AccountId, Amount, TokenId, TransferError};
use std::collections::HashMap;

/// HashMap-backed External Token Store with allowance semantics
///
/// A pull consumes allowance: after `pull_from(token, owner, to, n)`
/// succeeds, `allowance(token, owner, to)` is reduced by `n`. A push only
/// requires the sender's balance.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    /// External balances keyed by (token, owner)
    balances: HashMap<(TokenId, AccountId), Amount>,

    /// Remaining authorizations keyed by (token, owner, spender)
    allowances: HashMap<(TokenId, AccountId, AccountId), Amount>,
}

impl InMemoryTokenStore {
    /// Create an empty store with no balances or allowances
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `owner` out of thin air
    ///
    /// This is the store's issuance primitive, used to seed balances
    /// before exercising the wallet. Saturates instead of wrapping if the
    /// balance would exceed `Amount::MAX`.
    pub fn mint(&mut self, token: TokenId, owner: AccountId, amount: Amount) {
        let balance = self.balances.entry((token, owner)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Authorize `spender` to pull up to `amount` of `token` from `owner`
    ///
    /// Replaces any previous authorization for the same (owner, spender)
    /// pair, mirroring the approve-overwrites semantics of the external
    /// ledgers this store stands in for.
    pub fn approve(&mut self, token: TokenId, owner: AccountId, spender: AccountId, amount: Amount) {
        self.allowances.insert((token, owner, spender), amount);
    }

    /// Read the remaining authorization for a (owner, spender) pair
    pub fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(0)
    }

    /// Move funds between two accounts, checking only the source balance
    fn transfer(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let balance = self.balance_of(token, from);
        if balance < amount {
            return Err(TransferError::InsufficientBalance {
                owner: from,
                balance,
                requested: amount,
            });
        }

        // Source was checked above; self-transfers must not double-count.
        if from != to {
            *self.balances.entry((token, from)).or_insert(0) -= amount;
            let dest = self.balances.entry((token, to)).or_insert(0);
            *dest = dest.saturating_add(amount);
        }

        Ok(())
    }
}

impl TokenStore for InMemoryTokenStore {
    fn pull_from(
        &mut self,
        token: TokenId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let allowance = self.allowance(token, owner, to);
        if allowance < amount {
            return Err(TransferError::InsufficientAllowance {
                owner,
                spender: to,
                allowance,
                requested: amount,
            });
        }

        self.transfer(token, owner, to, amount)?;

        // Consume the allowance only after the transfer committed.
        self.allowances.insert((token, owner, to), allowance - amount);

        Ok(())
    }

    fn push_to(
        &mut self,
        token: TokenId,
        from: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.transfer(token, from, recipient, amount)
    }

    fn balance_of(&self, token: TokenId, owner: AccountId) -> Amount {
        self.balances.get(&(token, owner)).copied().unwrap_or(0)
    }
}
