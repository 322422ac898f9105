//! Order registry: id allocation and permanent order records
//!
//! Ids come from a monotonic counter whose first allocation is 1; they are
//! never reused. Records are never destroyed — a filled or cancelled order
//! stays queryable forever. The trader map duplicates `Order::trader` so
//! cancellation can authorize a caller without touching the full record.

use std::collections::HashMap;
use types::ids::{AccountId, OrderId};
use types::order::Order;

/// Registry of every order the engine has ever admitted.
#[derive(Debug)]
pub struct OrderRegistry {
    next_id: u64,
    orders: HashMap<OrderId, Order>,
    traders: HashMap<OrderId, AccountId>,
}

impl OrderRegistry {
    /// Create an empty registry. The first allocated id is 1.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            orders: HashMap::new(),
            traders: HashMap::new(),
        }
    }

    /// Allocate the next order id. Strictly increasing, never reused.
    pub fn allocate(&mut self) -> OrderId {
        let id = OrderId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record an order and its trader.
    pub fn insert(&mut self, order: Order) {
        self.traders.insert(order.id, order.trader);
        self.orders.insert(order.id, order);
    }

    /// Look up an order.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Look up an order, mutable.
    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(&id)
    }

    /// The trader who placed an order, without loading the record.
    pub fn owner_of(&self, id: OrderId) -> Option<AccountId> {
        self.traders.get(&id).copied()
    }

    /// Number of recorded orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if no order was ever recorded.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for OrderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
