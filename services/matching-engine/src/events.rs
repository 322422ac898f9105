//! Events emitted by engine operations
//!
//! Events are immutable records appended to the engine's log; a collaborator
//! drains them after each operation. Fill events carry both settlement legs
//! so a downstream consumer can mirror token movements without re-deriving
//! the matching arithmetic.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{OrderStatus, Side};

/// A placement was admitted (possibly already fully or partially matched).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub id: OrderId,
    pub trader: AccountId,
    pub side: Side,
    /// Limit price; `None` for market orders.
    pub price: Option<Price>,
    pub original_quantity: Quantity,
    pub residual_quantity: Quantity,
    pub status: OrderStatus,
    pub epoch: u64,
}

/// One fill between a resting maker and an incoming taker.
///
/// Executed at the maker's price. `index_quantity` is the index leg paid to
/// the bid-side trader; `numeraire_quantity` the numeraire leg paid to the
/// ask-side trader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillEvent {
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    pub maker: AccountId,
    pub taker: AccountId,
    pub price: Price,
    pub index_quantity: Quantity,
    pub numeraire_quantity: Quantity,
    pub epoch: u64,
}

/// An open or partially filled order was cancelled by its trader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub id: OrderId,
    pub trader: AccountId,
    pub side: Side,
    pub price: Price,
    /// Residual returned to the trader (numeraire for a bid, index for an
    /// ask).
    pub refunded: Quantity,
}

/// Enum wrapper for all engine events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    OrderPlaced(OrderPlacedEvent),
    Fill(FillEvent),
    OrderCancelled(OrderCancelledEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_round_trip() {
        let event = EngineEvent::OrderPlaced(OrderPlacedEvent {
            id: OrderId::new(1),
            trader: AccountId::new(),
            side: Side::Bid,
            price: Some(Price::new(10)),
            original_quantity: Quantity::new(100),
            residual_quantity: Quantity::new(70),
            status: OrderStatus::Partial,
            epoch: 5,
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"OrderPlaced\""));

        let deserialized: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_market_order_event_has_null_price() {
        let event = OrderPlacedEvent {
            id: OrderId::new(2),
            trader: AccountId::new(),
            side: Side::Ask,
            price: None,
            original_quantity: Quantity::new(5),
            residual_quantity: Quantity::ZERO,
            status: OrderStatus::Filled,
            epoch: 9,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"price\":null"));
    }
}
