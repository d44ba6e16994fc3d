//! Domain events emitted by wallet operations
//!
//! Every successful ledger operation returns the events describing the
//! state change it performed. Events are plain values: there is no global
//! event bus, and observers receive them from the operation's return
//! value.

use super::identity::{AccountId, Amount, TokenId};
use serde::Serialize;

/// Domain event describing a completed wallet state change
///
/// The `balance` field always carries the affected account's custodial
/// balance for the event's token *after* the operation, so a stream of
/// events can be checked against the ledger without re-querying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletEvent {
    /// A deposit was credited
    ///
    /// `amount` is the gross amount pulled from the depositor; `balance`
    /// is the depositor's post-credit custodial balance (net of the
    /// autosave diversion).
    Deposit {
        /// Token deposited
        token: TokenId,
        /// Depositor account
        user: AccountId,
        /// Gross amount deposited
        amount: Amount,
        /// Depositor's resulting custodial balance for this token
        balance: Amount,
    },

    /// A withdrawal was debited
    ///
    /// `balance` is the withdrawer's post-debit custodial balance.
    Withdraw {
        /// Token withdrawn
        token: TokenId,
        /// Withdrawer account
        user: AccountId,
        /// Amount withdrawn
        amount: Amount,
        /// Withdrawer's resulting custodial balance for this token
        balance: Amount,
    },

    /// A deposit's automatic diversion was credited to the autosave account
    ///
    /// Emitted alongside `Deposit` whenever the diverted amount is
    /// non-zero. `user` is the depositor whose deposit was split, not the
    /// autosave account; `balance` is the autosave account's post-credit
    /// custodial balance.
    AutoSave {
        /// Token deposited
        token: TokenId,
        /// Depositor whose deposit was split
        user: AccountId,
        /// Amount diverted to the autosave account
        amount: Amount,
        /// Autosave account's resulting custodial balance for this token
        balance: Amount,
    },
}
