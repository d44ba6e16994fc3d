//! Token Wallet Library
//! # Overview
//!
//! This library provides a custodial token wallet that tracks per-user,
//! per-token balances and automatically diverts a fixed percentage of
//! every deposit to a designated autosave account.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (identities, events, errors)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - The synchronous custodial ledger
//!   - [`core::concurrent`] - Thread-safe ledger variant
//!   - [`core::traits`] - The External Token Store abstraction
//!   - [`core::token_store`] - In-memory reference store
//!
//! # Operations
//!
//! The wallet supports two balance-mutating operations:
//!
//! - **Deposit**: pull funds from the depositor's external balance into
//!   custody, credit the net amount to the depositor and the diverted
//!   amount to the autosave account
//! - **Withdrawal**: debit the withdrawer's tracked balance and push the
//!   funds back out of custody (requires sufficient tracked balance;
//!   no diversion applies)
//!
//! # Invariants
//!
//! - Conservation: custodial balances for a token always sum to total
//!   pulled in minus total pushed out
//! - Exact splits: `net + save == amount` for every deposit, with floor
//!   semantics and the remainder folded into the net credit
//! - All-or-nothing: a failed operation never leaves a partial mutation
//!
//! # Example
//!
//! ```
//! use token_wallet::{InMemoryTokenStore, Ledger};
//!
//! let mut store = InMemoryTokenStore::new();
//! store.mint(1, 300, 10_000_000);
//! store.approve(1, 300, 100, 10_000_000);
//!
//! // Wallet custody account 100, autosave account 200, 5 percent
//! let mut wallet = Ledger::new(store, 100, 200, 5).unwrap();
//! wallet.deposit_token(1, 10_000_000, 300).unwrap();
//!
//! assert_eq!(wallet.balance_of(1, 300), 9_500_000);
//! assert_eq!(wallet.balance_of(1, 200), 500_000);
//! ```

// Module declarations
pub mod core;
pub mod types;

pub use self::core::{InMemoryTokenStore, Ledger, SharedLedger, TokenStore};
pub use types::{AccountId, Amount, TokenId, TransferError, WalletError, WalletEvent};
