//! Identity and amount types for the token wallet
//!
//! This module defines the aliases used to identify accounts and tokens
//! and to represent token amounts throughout the system.

/// Account identifier
///
/// Identifies a user account, the autosave account, or the wallet's own
/// custody account within the External Token Store.
pub type AccountId = u64;

/// Token identifier
///
/// Identifies a token (asset) tracked by the wallet. Each token has its
/// own independent balance book.
pub type TokenId = u32;

/// Token amount in base units
///
/// All arithmetic on amounts is integer arithmetic with explicit floor
/// semantics; there is no fractional representation. A token's display
/// scale (decimals) is a presentation concern outside the wallet.
pub type Amount = u128;
