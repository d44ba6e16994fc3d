//! Concurrent implementation of the wallet core
//!
//! This module provides the thread-safe counterpart of the synchronous
//! ledger, for hosts that call the wallet from multiple threads:
//!
//! - **SharedLedger**: per-token entry locking over a DashMap book, with
//!   the External Token Store serialized behind the same critical section
//!
//! Operations on different tokens proceed in parallel; operations on the
//! same token are serialized, which is exactly the atomicity the wallet's
//! conservation invariant requires.

pub mod ledger;

pub use ledger::SharedLedger;
