//! Core trait for the External Token Store collaborator
//!
//! The wallet never owns the asset-transfer primitive; it calls into an
//! External Token Store through this trait. Keeping the store behind a
//! trait lets the ledger run against the in-memory reference store in
//! tests and against a real asset backend in an embedding application.

use crate::types::{AccountId, Amount, TokenId, TransferError};

/// The asset-transfer primitive the ledger calls into
///
/// The store owns its own balance and allowance bookkeeping, distinct
/// from the ledger's custodial balances. Authorization (the allowance
/// check on `pull_from`) is the store's concern; the ledger never
/// duplicates it.
///
/// Calls are expected to return-or-fail synchronously: each transfer is
/// an atomic success or an atomic failure, never a partial move.
pub trait TokenStore {
    /// Move `amount` of `token` from `owner`'s balance into `to`'s custody
    ///
    /// Requires prior authorization by `owner` for `to` of at least
    /// `amount`. Fails without moving anything if the authorization or
    /// the balance is insufficient.
    fn pull_from(
        &mut self,
        token: TokenId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Move `amount` of `token` from `from`'s custody to `recipient`
    ///
    /// Fails without moving anything if `from`'s balance is insufficient.
    fn push_to(
        &mut self,
        token: TokenId,
        from: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Read `owner`'s external balance of `token`
    fn balance_of(&self, token: TokenId, owner: AccountId) -> Amount;
}
