//! Ladder walkers: consume opposing liquidity best price first
//!
//! Both walkers take an optional price bound — `Some` for limit orders,
//! `None` for market sweeps — and return the taker's unspent residual. All
//! fills execute at the resting (maker) price. The walk re-queries the best
//! opposing price each round, so removing a drained level never invalidates
//! the traversal.
//!
//! Units: a bid walker's residual is numeraire; an ask walker's residual is
//! index. Resting bid residuals are numeraire, resting ask residuals are
//! index — every conversion goes through the level price with floor
//! division, and the sub-price remainder is dust.

use ledger::{LedgerError, TokenLedger};
use tracing::debug;
use types::ids::{AccountId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{OrderStatus, Side};

use crate::book::Book;
use crate::events::{EngineEvent, FillEvent};
use crate::registry::OrderRegistry;
use crate::settlement::SettlementDriver;

use super::crossing;

/// Cross an incoming bid against the ask ladder, ascending.
///
/// `remaining` is the taker's unspent numeraire custody; the return value
/// is what is left of it when no further ask level is admissible — because
/// the ladder is exhausted, the limit is reached, the taker is spent, or
/// the residual is dust (worth less than one index unit at the best ask).
#[allow(clippy::too_many_arguments)]
pub(crate) fn cross_bid<L: TokenLedger>(
    book: &mut Book,
    registry: &mut OrderRegistry,
    driver: &mut SettlementDriver<'_, L>,
    events: &mut Vec<EngineEvent>,
    taker_id: OrderId,
    taker: AccountId,
    limit: Option<Price>,
    mut remaining: Quantity,
    epoch: u64,
) -> Result<Quantity, LedgerError> {
    while !remaining.is_zero() {
        let Some(best) = book.best_ask() else { break };
        if !crossing::bid_takes(limit, best) {
            break;
        }

        // Whole index units the residual affords at this level. Zero means
        // the residual is dust here — and at every worse level above.
        let mut buyable = remaining / best;
        if buyable.is_zero() {
            break;
        }

        // Index bought at this level, credited to the taker in one batch
        // once the level is done.
        let mut accrued = Quantity::ZERO;

        loop {
            let Some(level) = book.level_mut(best) else {
                break;
            };
            let Some(head) = level.queue(Side::Ask).peek() else {
                break;
            };
            let maker = registry.get_mut(head).expect("queued order is registered");

            if maker.status == OrderStatus::Cancelled {
                // Tombstone: discovered on encounter, dropped without effect.
                level.queue_mut(Side::Ask).dequeue();
                continue;
            }

            let maker_rem = maker.residual_quantity; // index units
            if buyable >= maker_rem {
                // Fill the resting ask entirely.
                let spent = best.notional(maker_rem);
                remaining -= spent;
                buyable -= maker_rem;
                accrued += maker_rem;
                maker.residual_quantity = Quantity::ZERO;
                maker.status = OrderStatus::Filled;
                let maker_trader = maker.trader;
                level.sub_depth(Side::Ask, maker_rem);
                level.queue_mut(Side::Ask).dequeue();

                driver.release_numeraire(&maker_trader, spent)?;
                debug!(maker = %head, taker = %taker_id, price = %best, index = %maker_rem, "ask filled");
                events.push(EngineEvent::Fill(FillEvent {
                    maker_order_id: head,
                    taker_order_id: taker_id,
                    maker: maker_trader,
                    taker,
                    price: best,
                    index_quantity: maker_rem,
                    numeraire_quantity: spent,
                    epoch,
                }));

                if buyable.is_zero() {
                    break;
                }
            } else {
                // Partial fill of the resting ask; the taker cannot consume
                // any more at this level.
                let spent = best.notional(buyable);
                remaining -= spent;
                accrued += buyable;
                maker.residual_quantity -= buyable;
                maker.status = OrderStatus::Partial;
                let maker_trader = maker.trader;
                level.sub_depth(Side::Ask, buyable);

                driver.release_numeraire(&maker_trader, spent)?;
                debug!(maker = %head, taker = %taker_id, price = %best, index = %buyable, "ask partially filled");
                events.push(EngineEvent::Fill(FillEvent {
                    maker_order_id: head,
                    taker_order_id: taker_id,
                    maker: maker_trader,
                    taker,
                    price: best,
                    index_quantity: buyable,
                    numeraire_quantity: spent,
                    epoch,
                }));
                break;
            }
        }

        if !accrued.is_zero() {
            driver.release_index(&taker, accrued)?;
        }
        book.prune(Side::Ask, best);
    }

    Ok(remaining)
}

/// Cross an incoming ask against the bid ladder, descending.
///
/// `remaining` is the taker's undelivered index custody. Resting bids hold
/// numeraire; a bid whose residual cannot buy one index unit at its level
/// price is dust — finished, retained, and evicted on encounter, since no
/// ask can make progress against it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn cross_ask<L: TokenLedger>(
    book: &mut Book,
    registry: &mut OrderRegistry,
    driver: &mut SettlementDriver<'_, L>,
    events: &mut Vec<EngineEvent>,
    taker_id: OrderId,
    taker: AccountId,
    limit: Option<Price>,
    mut remaining: Quantity,
    epoch: u64,
) -> Result<Quantity, LedgerError> {
    while !remaining.is_zero() {
        let Some(best) = book.best_bid() else { break };
        if !crossing::ask_takes(limit, best) {
            break;
        }

        loop {
            let Some(level) = book.level_mut(best) else {
                break;
            };
            let Some(head) = level.queue(Side::Bid).peek() else {
                break;
            };
            let maker = registry.get_mut(head).expect("queued order is registered");

            if maker.status == OrderStatus::Cancelled {
                level.queue_mut(Side::Bid).dequeue();
                continue;
            }

            let maker_rem = maker.residual_quantity; // numeraire units
            let maker_buyable = maker_rem / best; // index units it can absorb
            if maker_buyable.is_zero() {
                // Dust bid: finished, dust retained, dropped from the queue.
                maker.status = OrderStatus::Filled;
                level.sub_depth(Side::Bid, maker_rem);
                level.queue_mut(Side::Bid).dequeue();
                debug!(maker = %head, price = %best, dust = %maker_rem, "dust bid evicted");
                continue;
            }

            let fill = remaining.min(maker_buyable); // index units
            let received = best.notional(fill); // numeraire to the taker
            remaining -= fill;
            maker.residual_quantity -= received;
            let maker_trader = maker.trader;
            level.sub_depth(Side::Bid, received);

            // Dust rule after the fill: if what is left cannot buy one unit
            // at this price, the bid is finished and leaves the queue.
            let leftover = maker.residual_quantity;
            if (leftover / best).is_zero() {
                maker.status = OrderStatus::Filled;
                level.sub_depth(Side::Bid, leftover);
                level.queue_mut(Side::Bid).dequeue();
            } else {
                maker.status = OrderStatus::Partial;
            }

            driver.release_index(&maker_trader, fill)?;
            driver.release_numeraire(&taker, received)?;
            debug!(maker = %head, taker = %taker_id, price = %best, index = %fill, "bid matched");
            events.push(EngineEvent::Fill(FillEvent {
                maker_order_id: head,
                taker_order_id: taker_id,
                maker: maker_trader,
                taker,
                price: best,
                index_quantity: fill,
                numeraire_quantity: received,
                epoch,
            }));

            if remaining.is_zero() {
                break;
            }
        }

        book.prune(Side::Bid, best);
    }

    Ok(remaining)
}
