//! Order lifecycle types
//!
//! An order record is created when the book admits a placement and is kept
//! forever for introspection; only its residual quantity and status mutate.
//!
//! Units discipline: a bid's quantities are **numeraire** units (how much
//! cash it can still spend), an ask's quantities are **index** units (how
//! much of the traded asset it can still deliver). The asymmetry is part of
//! the book's contract and every arithmetic site assumes it.

use crate::ids::{AccountId, OrderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Posts numeraire, seeks index.
    Bid,
    /// Posts index, seeks numeraire.
    Ask,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// Order kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    Limit,
    Market,
}

/// Order status.
///
/// `Filled` and `Cancelled` are terminal. A bid can be `Filled` while
/// carrying a dust residual smaller than one index unit's cost at its limit
/// price; that residual is retained, not refunded, and never matches again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Open,
    Partial,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// Complete order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Placement stamp (block height or sequence). Observability only;
    /// time priority is enforced by queue insertion order.
    pub epoch: u64,
    pub trader: AccountId,
    pub side: Side,
    pub kind: OrderKind,
    /// Limit price. `None` for market orders, which have no price of their
    /// own and execute at whatever the opposing ladder offers.
    pub price: Option<Price>,
    pub original_quantity: Quantity,
    pub residual_quantity: Quantity,
    pub status: OrderStatus,
}

impl Order {
    /// Create a limit order in its initial open state.
    pub fn new_limit(
        id: OrderId,
        epoch: u64,
        trader: AccountId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            epoch,
            trader,
            side,
            kind: OrderKind::Limit,
            price: Some(price),
            original_quantity: quantity,
            residual_quantity: quantity,
            status: OrderStatus::Open,
        }
    }

    /// Create a market order record.
    pub fn new_market(
        id: OrderId,
        epoch: u64,
        trader: AccountId,
        side: Side,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            epoch,
            trader,
            side,
            kind: OrderKind::Market,
            price: None,
            original_quantity: quantity,
            residual_quantity: quantity,
            status: OrderStatus::Open,
        }
    }

    /// The limit price, if this is a limit order.
    pub fn limit_price(&self) -> Option<Price> {
        self.price
    }

    /// Check if any quantity has been consumed.
    pub fn has_fills(&self) -> bool {
        self.residual_quantity < self.original_quantity
    }
}

/// A placement request as submitted by a trader.
///
/// Price and quantity arrive as raw integers; the engine validates them
/// (zero price, zero quantity) before any custody is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub kind: OrderKind,
    pub side: Side,
    pub price: u64,
    pub quantity: u64,
}

impl OrderRequest {
    /// A limit order at `price` for `quantity` units of the posted asset
    /// (numeraire for a bid, index for an ask).
    pub fn limit(side: Side, price: u64, quantity: u64) -> Self {
        Self {
            kind: OrderKind::Limit,
            side,
            price,
            quantity,
        }
    }

    /// A market order for `quantity` units of the posted asset.
    pub fn market(side: Side, quantity: u64) -> Self {
        Self {
            kind: OrderKind::Market,
            side,
            price: 0,
            quantity,
        }
    }

    /// A limit bid expressed as "buy `index_quantity` index units at
    /// `price`", converted to the numeraire quantity the book works in.
    pub fn bid_for_index(price: u64, index_quantity: u64) -> Self {
        Self::limit(Side::Bid, price, price * index_quantity)
    }
}
