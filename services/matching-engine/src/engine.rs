//! Matching engine core
//!
//! The engine owns the book state, the order registry, and the ledger
//! handle for one trading pair. Every public operation runs to completion
//! as a single atomic step: validation, custody, crossing, settlement, and
//! resting-book updates happen before the call returns, and the book never
//! rests with a crossed spread.

use ledger::{LedgerError, TokenLedger};
use thiserror::Error;
use tracing::info;
use types::errors::{CancelError, PlaceError};
use types::ids::{AccountId, OrderId};
use types::market::MarketPair;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderKind, OrderRequest, OrderStatus, Side};

use crate::book::Book;
use crate::events::{EngineEvent, OrderCancelledEvent, OrderPlacedEvent};
use crate::matching::{cross_ask, cross_bid};
use crate::registry::OrderRegistry;
use crate::settlement::SettlementDriver;

/// Top-level engine error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Placement rejected: {0}")]
    Place(#[from] PlaceError),

    #[error("Cancellation rejected: {0}")]
    Cancel(#[from] CancelError),

    #[error("Ledger failure: {0}")]
    Ledger(#[from] LedgerError),
}

/// Price-time priority matching engine for a single trading pair.
pub struct Engine<L: TokenLedger> {
    pair: MarketPair,
    book: Book,
    registry: OrderRegistry,
    ledger: L,
    /// Emitted events log (append-only).
    events: Vec<EngineEvent>,
}

impl<L: TokenLedger> Engine<L> {
    /// Create an engine for `pair`, settling against `ledger`.
    pub fn new(pair: MarketPair, ledger: L) -> Self {
        Self {
            pair,
            book: Book::new(),
            registry: OrderRegistry::new(),
            ledger,
            events: Vec::new(),
        }
    }

    // ───────────────────────── Placement ─────────────────────────

    /// Place an order for `trader`, stamped with `epoch`.
    ///
    /// Custody of the posted asset is taken up front; the order then crosses
    /// against the opposing ladder and any residual either rests (limit) or
    /// is refunded (market). Returns the assigned order id.
    pub fn place(
        &mut self,
        request: OrderRequest,
        trader: AccountId,
        epoch: u64,
    ) -> Result<OrderId, EngineError> {
        let quantity = Quantity::new(request.quantity);
        if quantity.is_zero() {
            return Err(PlaceError::InvalidQuantity.into());
        }

        match request.kind {
            OrderKind::Limit => {
                let price = Price::try_new(request.price).ok_or(PlaceError::InvalidPrice)?;
                self.place_limit(request.side, price, quantity, trader, epoch)
            }
            OrderKind::Market => self.place_market(request.side, quantity, trader, epoch),
        }
    }

    fn place_limit(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        trader: AccountId,
        epoch: u64,
    ) -> Result<OrderId, EngineError> {
        // Split borrows: ledger/pair for settlement, book/registry/events
        // for matching.
        let mut driver = SettlementDriver::new(&mut self.ledger, &self.pair);
        driver.take_custody(&trader, side, quantity)?;

        let id = self.registry.allocate();
        let remaining = match side {
            Side::Bid => cross_bid(
                &mut self.book,
                &mut self.registry,
                &mut driver,
                &mut self.events,
                id,
                trader,
                Some(price),
                quantity,
                epoch,
            )?,
            Side::Ask => cross_ask(
                &mut self.book,
                &mut self.registry,
                &mut driver,
                &mut self.events,
                id,
                trader,
                Some(price),
                quantity,
                epoch,
            )?,
        };

        let status = match side {
            // A bid whose residual cannot buy one index unit at its own
            // limit is finished: the dust stays in custody and never
            // matches again.
            Side::Bid if (remaining / price).is_zero() => OrderStatus::Filled,
            Side::Ask if remaining.is_zero() => OrderStatus::Filled,
            _ if remaining < quantity => OrderStatus::Partial,
            _ => OrderStatus::Open,
        };

        if status != OrderStatus::Filled {
            self.book.rest(side, price, id, remaining);
        }

        let mut order = Order::new_limit(id, epoch, trader, side, price, quantity);
        order.residual_quantity = remaining;
        order.status = status;
        self.admit(order);
        Ok(id)
    }

    fn place_market(
        &mut self,
        side: Side,
        quantity: Quantity,
        trader: AccountId,
        epoch: u64,
    ) -> Result<OrderId, EngineError> {
        // Checked before any custody is taken.
        let opposing_empty = match side {
            Side::Bid => self.book.best_ask().is_none(),
            Side::Ask => self.book.best_bid().is_none(),
        };
        if opposing_empty {
            return Err(PlaceError::InsufficientLiquidity.into());
        }

        let mut driver = SettlementDriver::new(&mut self.ledger, &self.pair);
        driver.take_custody(&trader, side, quantity)?;

        let id = self.registry.allocate();
        let remaining = match side {
            Side::Bid => cross_bid(
                &mut self.book,
                &mut self.registry,
                &mut driver,
                &mut self.events,
                id,
                trader,
                None,
                quantity,
                epoch,
            )?,
            Side::Ask => cross_ask(
                &mut self.book,
                &mut self.registry,
                &mut driver,
                &mut self.events,
                id,
                trader,
                None,
                quantity,
                epoch,
            )?,
        };

        // Market orders never rest: whatever liquidity exhaustion or dust
        // left behind goes straight back to the taker.
        if !remaining.is_zero() {
            driver.refund(&trader, side, remaining)?;
        }

        let status = if remaining.is_zero() {
            OrderStatus::Filled
        } else {
            OrderStatus::Partial
        };

        let mut order = Order::new_market(id, epoch, trader, side, quantity);
        order.residual_quantity = remaining;
        order.status = status;
        self.admit(order);
        Ok(id)
    }

    /// Record an admitted order and emit its placement event.
    fn admit(&mut self, order: Order) {
        info!(
            id = %order.id,
            trader = %order.trader,
            side = ?order.side,
            status = ?order.status,
            "order placed"
        );
        self.events.push(EngineEvent::OrderPlaced(OrderPlacedEvent {
            id: order.id,
            trader: order.trader,
            side: order.side,
            price: order.price,
            original_quantity: order.original_quantity,
            residual_quantity: order.residual_quantity,
            status: order.status,
            epoch: order.epoch,
        }));
        self.registry.insert(order);
    }

    // ───────────────────────── Cancellation ─────────────────────────

    /// Cancel an open or partially filled limit order.
    ///
    /// Only the order's own trader may cancel. The residual is refunded and
    /// the order leaves its queue immediately.
    pub fn cancel(&mut self, id: OrderId, caller: AccountId) -> Result<(), EngineError> {
        let owner = self.registry.owner_of(id).ok_or(CancelError::UnknownOrder)?;
        if owner != caller {
            return Err(CancelError::Unauthorized.into());
        }

        let order = self
            .registry
            .get_mut(id)
            .ok_or(CancelError::UnknownOrder)?;
        let Some(price) = order.limit_price() else {
            return Err(CancelError::MarketOrderUnsupported.into());
        };
        match order.status {
            OrderStatus::Filled => return Err(CancelError::OrderFilled.into()),
            OrderStatus::Cancelled => return Err(CancelError::OrderCancelled.into()),
            OrderStatus::Open | OrderStatus::Partial => {}
        }

        let side = order.side;
        let residual = order.residual_quantity;
        order.residual_quantity = Quantity::ZERO;
        order.status = OrderStatus::Cancelled;

        self.book.remove_resting(side, price, id, residual);

        let mut driver = SettlementDriver::new(&mut self.ledger, &self.pair);
        driver.refund(&caller, side, residual)?;

        info!(id = %id, trader = %caller, refunded = %residual, "order cancelled");
        self.events
            .push(EngineEvent::OrderCancelled(OrderCancelledEvent {
                id,
                trader: caller,
                side,
                price,
                refunded: residual,
            }));
        Ok(())
    }

    // ───────────────────────── Introspection ─────────────────────────

    /// Open depth at a price: `(bid_depth, ask_depth)`.
    pub fn depth(&self, price: Price) -> (Quantity, Quantity) {
        self.book.depth(price)
    }

    /// Resting bid ids at a price, in FIFO order.
    pub fn bids_at(&self, price: Price) -> Vec<OrderId> {
        self.book.orders_at(Side::Bid, price)
    }

    /// Resting ask ids at a price, in FIFO order.
    pub fn asks_at(&self, price: Price) -> Vec<OrderId> {
        self.book.orders_at(Side::Ask, price)
    }

    /// Best (highest) bid price.
    pub fn best_bid(&self) -> Option<Price> {
        self.book.best_bid()
    }

    /// Best (lowest) ask price.
    pub fn best_ask(&self) -> Option<Price> {
        self.book.best_ask()
    }

    /// All populated bid prices, descending (best first).
    pub fn all_bid_prices(&self) -> Vec<Price> {
        self.book.ladder(Side::Bid).descending()
    }

    /// All populated ask prices, ascending (best first).
    pub fn all_ask_prices(&self) -> Vec<Price> {
        self.book.ladder(Side::Ask).ascending()
    }

    /// Look up any order ever admitted.
    pub fn get_order(&self, id: OrderId) -> Option<&Order> {
        self.registry.get(id)
    }

    /// Aggregated top-of-book view: up to `depth` levels per side, best
    /// first, as `(price, open_depth)` pairs.
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        let side_view = |prices: Vec<Price>, side: Side| {
            prices
                .into_iter()
                .take(depth)
                .map(|price| {
                    let level_depth = match side {
                        Side::Bid => self.book.depth(price).0,
                        Side::Ask => self.book.depth(price).1,
                    };
                    (price, level_depth)
                })
                .collect()
        };
        BookSnapshot {
            pair: self.pair.clone(),
            bids: side_view(self.all_bid_prices(), Side::Bid),
            asks: side_view(self.all_ask_prices(), Side::Ask),
        }
    }

    /// The pair this engine trades.
    pub fn pair(&self) -> &MarketPair {
        &self.pair
    }

    /// The ledger collaborator.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The ledger collaborator, mutable (e.g. for funding flows).
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Aggregated book view for market data consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub pair: MarketPair,
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger::AssetVault;

    fn engine_with_balances(accounts: &[(AccountId, u64, u64)]) -> Engine<AssetVault> {
        let mut vault = AssetVault::new();
        for &(account, numeraire, index) in accounts {
            vault.deposit(account, "USDT", numeraire).unwrap();
            vault.deposit(account, "BTC", index).unwrap();
        }
        Engine::new(MarketPair::new("BTC/USDT"), vault)
    }

    #[test]
    fn test_place_rejects_zero_quantity() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 1_000, 10)]);

        let result = engine.place(OrderRequest::limit(Side::Bid, 10, 0), trader, 1);
        assert_eq!(result, Err(EngineError::Place(PlaceError::InvalidQuantity)));
        assert!(engine.get_order(OrderId::new(1)).is_none());
    }

    #[test]
    fn test_place_rejects_zero_price() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 1_000, 10)]);

        let result = engine.place(OrderRequest::limit(Side::Bid, 0, 100), trader, 1);
        assert_eq!(result, Err(EngineError::Place(PlaceError::InvalidPrice)));
    }

    #[test]
    fn test_limit_bid_rests_and_takes_custody() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 1_000, 0)]);

        let id = engine
            .place(OrderRequest::limit(Side::Bid, 10, 500), trader, 1)
            .unwrap();

        assert_eq!(id, OrderId::new(1));
        assert_eq!(engine.best_bid(), Some(Price::new(10)));
        assert_eq!(engine.depth(Price::new(10)).0, Quantity::new(500));
        assert_eq!(engine.ledger().balance_of(&trader, "USDT"), 500);
        assert_eq!(engine.ledger().holdings_of("USDT"), 500);

        let order = engine.get_order(id).unwrap();
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.residual_quantity, Quantity::new(500));
    }

    #[test]
    fn test_limit_ask_rests_and_takes_custody() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 0, 10)]);

        let id = engine
            .place(OrderRequest::limit(Side::Ask, 10, 5), trader, 1)
            .unwrap();

        assert_eq!(engine.best_ask(), Some(Price::new(10)));
        assert_eq!(engine.depth(Price::new(10)).1, Quantity::new(5));
        assert_eq!(engine.ledger().balance_of(&trader, "BTC"), 5);
        assert_eq!(engine.get_order(id).unwrap().status, OrderStatus::Open);
    }

    #[test]
    fn test_market_order_rejected_on_empty_book() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 1_000, 10)]);

        let result = engine.place(OrderRequest::market(Side::Bid, 100), trader, 1);
        assert_eq!(
            result,
            Err(EngineError::Place(PlaceError::InsufficientLiquidity))
        );
        // No custody was taken.
        assert_eq!(engine.ledger().balance_of(&trader, "USDT"), 1_000);
    }

    #[test]
    fn test_insufficient_balance_surfaces_ledger_error() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 100, 0)]);

        let result = engine.place(OrderRequest::limit(Side::Bid, 10, 500), trader, 1);
        assert!(matches!(result, Err(EngineError::Ledger(_))));
        assert_eq!(engine.best_bid(), None);
    }

    #[test]
    fn test_cancel_requires_owner() {
        let trader = AccountId::new();
        let stranger = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 1_000, 0)]);
        let id = engine
            .place(OrderRequest::limit(Side::Bid, 10, 500), trader, 1)
            .unwrap();

        assert_eq!(
            engine.cancel(id, stranger),
            Err(EngineError::Cancel(CancelError::Unauthorized))
        );
        assert_eq!(
            engine.cancel(OrderId::new(99), trader),
            Err(EngineError::Cancel(CancelError::UnknownOrder))
        );
        assert!(engine.cancel(id, trader).is_ok());
    }

    #[test]
    fn test_cancel_is_terminal() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 1_000, 0)]);
        let id = engine
            .place(OrderRequest::limit(Side::Bid, 10, 500), trader, 1)
            .unwrap();

        engine.cancel(id, trader).unwrap();
        assert_eq!(
            engine.cancel(id, trader),
            Err(EngineError::Cancel(CancelError::OrderCancelled))
        );
    }

    #[test]
    fn test_cancel_rejects_market_orders() {
        let maker = AccountId::new();
        let taker = AccountId::new();
        let mut engine = engine_with_balances(&[(maker, 0, 10), (taker, 1_000, 0)]);
        engine
            .place(OrderRequest::limit(Side::Ask, 10, 5), maker, 1)
            .unwrap();
        let id = engine
            .place(OrderRequest::market(Side::Bid, 30), taker, 2)
            .unwrap();

        assert_eq!(
            engine.cancel(id, taker),
            Err(EngineError::Cancel(CancelError::MarketOrderUnsupported))
        );
    }

    #[test]
    fn test_cancel_rejects_filled_orders() {
        let maker = AccountId::new();
        let taker = AccountId::new();
        let mut engine = engine_with_balances(&[(maker, 0, 10), (taker, 1_000, 0)]);
        let ask = engine
            .place(OrderRequest::limit(Side::Ask, 10, 5), maker, 1)
            .unwrap();
        engine
            .place(OrderRequest::limit(Side::Bid, 10, 50), taker, 2)
            .unwrap();

        assert_eq!(
            engine.cancel(ask, maker),
            Err(EngineError::Cancel(CancelError::OrderFilled))
        );
    }

    #[test]
    fn test_snapshot_orders_best_first() {
        let trader = AccountId::new();
        let mut engine = engine_with_balances(&[(trader, 10_000, 100)]);
        engine
            .place(OrderRequest::limit(Side::Bid, 9, 90), trader, 1)
            .unwrap();
        engine
            .place(OrderRequest::limit(Side::Bid, 10, 100), trader, 2)
            .unwrap();
        engine
            .place(OrderRequest::limit(Side::Ask, 12, 3), trader, 3)
            .unwrap();
        engine
            .place(OrderRequest::limit(Side::Ask, 14, 4), trader, 4)
            .unwrap();

        let snapshot = engine.snapshot(1);
        assert_eq!(snapshot.bids, vec![(Price::new(10), Quantity::new(100))]);
        assert_eq!(snapshot.asks, vec![(Price::new(12), Quantity::new(3))]);
    }

    #[test]
    fn test_events_emitted_in_order() {
        let maker = AccountId::new();
        let taker = AccountId::new();
        let mut engine = engine_with_balances(&[(maker, 0, 10), (taker, 1_000, 0)]);
        engine
            .place(OrderRequest::limit(Side::Ask, 10, 5), maker, 1)
            .unwrap();
        engine
            .place(OrderRequest::limit(Side::Bid, 10, 50), taker, 2)
            .unwrap();

        let events = engine.drain_events();
        assert!(matches!(events[0], EngineEvent::OrderPlaced(_)));
        assert!(matches!(events[1], EngineEvent::Fill(_)));
        assert!(matches!(events[2], EngineEvent::OrderPlaced(_)));
        assert!(engine.events().is_empty());
    }
}
