//! Token ledger collaborator
//!
//! The book never owns token accounting; it consumes the `TokenLedger`
//! custody primitives defined here. The in-memory `AssetVault` is the
//! implementation used by tests and simulations.
//!
//! # Modules
//! - `errors`: Ledger-specific error types
//! - `vault`: The `TokenLedger` trait and the in-memory `AssetVault`

pub mod errors;
pub mod vault;

pub use errors::LedgerError;
pub use vault::{AssetVault, TokenLedger};
