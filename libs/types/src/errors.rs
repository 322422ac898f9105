//! Error taxonomy for book operations
//!
//! Placement and cancellation failures are synchronous and leave no state
//! change behind. Ledger failures are defined by the ledger collaborator and
//! surfaced unchanged.

use thiserror::Error;

/// Placement failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    #[error("Invalid quantity: must be positive")]
    InvalidQuantity,

    #[error("Invalid price: zero is reserved")]
    InvalidPrice,

    #[error("Insufficient liquidity: opposing side of the book is empty")]
    InsufficientLiquidity,
}

/// Cancellation failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelError {
    #[error("Unknown order id")]
    UnknownOrder,

    #[error("Unauthorized: caller is not the order's trader")]
    Unauthorized,

    #[error("Order already filled")]
    OrderFilled,

    #[error("Order already cancelled")]
    OrderCancelled,

    #[error("Market orders cannot be cancelled")]
    MarketOrderUnsupported,
}
