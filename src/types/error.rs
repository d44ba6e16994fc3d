//! Error types for the token wallet
//!
//! This module defines all error types that can occur during wallet
//! operations. Every failure is surfaced synchronously to the caller as an
//! outright rejection of the operation; nothing is retried internally, and
//! a failed operation never leaves a partial balance mutation behind.
//!
//! # Error Categories
//!
//! - **Configuration Errors**: invalid autosave percentage at construction
//! - **Validation Errors**: zero amounts on deposit or withdrawal
//! - **Balance Errors**: overdraft attempts, arithmetic overflow
//! - **External Errors**: the External Token Store rejected a transfer

use super::identity::{AccountId, Amount, TokenId};
use thiserror::Error;

/// Main error type for wallet operations
///
/// Each variant carries enough context to diagnose the rejection without
/// re-querying the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Autosave percentage out of range at construction
    ///
    /// The percentage must be in [0, 100]. This is the only
    /// construction-time failure; a ledger that exists is always
    /// well-configured.
    #[error("Invalid autosave percent {percent}: must be between 0 and 100")]
    InvalidConfiguration {
        /// The rejected percentage
        percent: u8,
    },

    /// Zero amount passed to a deposit or withdrawal
    ///
    /// Amounts are unsigned base units, so the `amount > 0` precondition
    /// reduces to rejecting zero.
    #[error("Invalid amount for {operation}: amount must be positive")]
    InvalidAmount {
        /// Operation that rejected the amount ("deposit" or "withdrawal")
        operation: String,
    },

    /// Withdrawal exceeds the tracked custodial balance
    ///
    /// The check happens before any debit or external call, so a rejected
    /// withdrawal changes nothing.
    #[error("Insufficient balance for account {user} on token {token}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Token being withdrawn
        token: TokenId,
        /// Account attempting the withdrawal
        user: AccountId,
        /// Tracked custodial balance
        balance: Amount,
        /// Requested withdrawal amount
        requested: Amount,
    },

    /// The External Token Store rejected a pull or push
    ///
    /// The enclosing operation is fully rolled back: a failed pull happens
    /// before any credit, and a failed push re-credits the debit it
    /// followed.
    #[error("External transfer failed during {operation}: {reason}")]
    ExternalTransferFailed {
        /// Operation whose transfer failed ("deposit" or "withdrawal")
        operation: String,
        /// The store's reason for rejecting the transfer
        reason: String,
    },

    /// Crediting a balance would overflow
    ///
    /// Checked before the external pull so the rejection leaves both the
    /// external and custodial balances untouched.
    #[error("Balance overflow crediting account {user} on token {token}")]
    BalanceOverflow {
        /// Token being credited
        token: TokenId,
        /// Account whose balance would overflow
        user: AccountId,
    },
}

/// Failure reported by an External Token Store implementation
///
/// Store implementations return this from `pull_from` and `push_to`; the
/// ledger converts it into [`WalletError::ExternalTransferFailed`] at its
/// boundary, preserving the store's reason text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The source account's external balance is too small
    #[error("account {owner} has balance {balance}, needs {requested}")]
    InsufficientBalance {
        /// Account whose balance was checked
        owner: AccountId,
        /// The account's external balance
        balance: Amount,
        /// Amount the transfer required
        requested: Amount,
    },

    /// The owner has not authorized the spender for the amount
    #[error("account {owner} allows spender {spender} only {allowance}, needs {requested}")]
    InsufficientAllowance {
        /// Account whose funds would move
        owner: AccountId,
        /// Account attempting to move them
        spender: AccountId,
        /// Remaining authorized amount
        allowance: Amount,
        /// Amount the transfer required
        requested: Amount,
    },
}

// Helper functions for creating common errors

impl WalletError {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(percent: u8) -> Self {
        WalletError::InvalidConfiguration { percent }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: &str) -> Self {
        WalletError::InvalidAmount {
            operation: operation.to_string(),
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(
        token: TokenId,
        user: AccountId,
        balance: Amount,
        requested: Amount,
    ) -> Self {
        WalletError::InsufficientBalance {
            token,
            user,
            balance,
            requested,
        }
    }

    /// Create an ExternalTransferFailed error from a store rejection
    pub fn external_transfer_failed(operation: &str, cause: &TransferError) -> Self {
        WalletError::ExternalTransferFailed {
            operation: operation.to_string(),
            reason: cause.to_string(),
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(token: TokenId, user: AccountId) -> Self {
        WalletError::BalanceOverflow { token, user }
    }
}
