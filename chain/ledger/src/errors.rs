//! Ledger error types

use thiserror::Error;

/// Failures raised by the token ledger's transfer primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient balance for {asset}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: u64,
        available: u64,
    },

    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: String },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}
