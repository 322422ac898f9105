//! Matching Engine
//!
//! Price-time priority central limit order book for a single trading pair
//! of two fungible assets: a numeraire (unit of account) and an index
//! (traded asset). Limit and market orders cross against resting liquidity
//! best price first, FIFO within a price; settlement moves tokens between
//! counterparties through the ledger collaborator.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced
//! - Deterministic matching (same inputs → same outputs)
//! - The book never rests with a crossed spread
//! - Per-level depth equals the sum of live resting residuals
//!
//! Units discipline: bid quantities are numeraire, ask quantities are
//! index. All arithmetic is exact `u64` integer arithmetic; the remainder
//! of a floor division below one index unit's cost is dust.

pub mod book;
pub mod engine;
pub mod events;
pub mod matching;
pub mod registry;
pub mod settlement;

pub use engine::{BookSnapshot, Engine, EngineError};
pub use events::{EngineEvent, FillEvent, OrderCancelledEvent, OrderPlacedEvent};
