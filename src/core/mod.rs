//! Core business logic module
//!
//! This module contains the wallet's core components:
//! - `traits` - the External Token Store abstraction
//! - `ledger` - the synchronous custodial ledger
//! - `token_store` - in-memory reference store with allowance semantics
//! - `concurrent` - thread-safe ledger variant

pub mod concurrent;
pub mod ledger;
pub mod token_store;
pub mod traits;

pub use concurrent::SharedLedger;
pub use ledger::Ledger;
pub use token_store::InMemoryTokenStore;
pub use traits::TokenStore;
