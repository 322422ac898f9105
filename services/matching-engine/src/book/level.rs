//! Aggregated book state at one price
//!
//! A level tracks, per side, the total open depth and the FIFO queue of
//! resting order ids. Depth is denominated in the side's posted asset:
//! numeraire for bids, index for asks. A level with zero depth on both
//! sides is empty and gets dropped from the book.

use types::numeric::Quantity;
use types::order::Side;

use super::queue::FifoQueue;

/// State at a single price on the book.
#[derive(Debug, Default)]
pub struct Level {
    bid_depth: Quantity,
    ask_depth: Quantity,
    bids: FifoQueue,
    asks: FifoQueue,
}

impl Level {
    /// Create an empty level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open depth on one side.
    pub fn depth(&self, side: Side) -> Quantity {
        match side {
            Side::Bid => self.bid_depth,
            Side::Ask => self.ask_depth,
        }
    }

    /// Increase one side's depth.
    pub fn add_depth(&mut self, side: Side, amount: Quantity) {
        match side {
            Side::Bid => self.bid_depth += amount,
            Side::Ask => self.ask_depth += amount,
        }
    }

    /// Decrease one side's depth.
    pub fn sub_depth(&mut self, side: Side, amount: Quantity) {
        match side {
            Side::Bid => self.bid_depth -= amount,
            Side::Ask => self.ask_depth -= amount,
        }
    }

    /// One side's FIFO queue.
    pub fn queue(&self, side: Side) -> &FifoQueue {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// One side's FIFO queue, mutable.
    pub fn queue_mut(&mut self, side: Side) -> &mut FifoQueue {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Check if both sides are drained.
    pub fn is_empty(&self) -> bool {
        self.bid_depth.is_zero() && self.ask_depth.is_zero()
    }
}
