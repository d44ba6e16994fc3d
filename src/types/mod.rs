//! Types module
//!
//! Contains core data structures used throughout the wallet.
//! This module organizes types into logical submodules:
//! - `identity`: account, token, and amount identifiers
//! - `event`: domain events emitted by wallet operations
//! - `error`: error types for the wallet and the External Token Store

pub mod error;
pub mod event;
pub mod identity;

pub use error::{TransferError, WalletError};
pub use event::WalletEvent;
pub use identity::{AccountId, Amount, TokenId};
