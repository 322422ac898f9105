//! Settlement driver: fills and custody as ledger debit/credit pairs
//!
//! The only component that talks to the token ledger. A bid posts
//! numeraire and is owed index; an ask posts index and is owed numeraire.
//! Custody is taken up front at placement and held by the book until a fill
//! releases it to the counterparty, or a cancel/market-residual refund
//! returns it to its owner.

use ledger::{LedgerError, TokenLedger};
use types::ids::AccountId;
use types::market::MarketPair;
use types::numeric::Quantity;
use types::order::Side;

/// Translates book outcomes into ledger `pull`/`push` calls for one pair.
pub struct SettlementDriver<'a, L: TokenLedger> {
    ledger: &'a mut L,
    pair: &'a MarketPair,
}

impl<'a, L: TokenLedger> SettlementDriver<'a, L> {
    pub fn new(ledger: &'a mut L, pair: &'a MarketPair) -> Self {
        Self { ledger, pair }
    }

    /// The asset a side posts as collateral.
    fn posted_asset(&self, side: Side) -> &str {
        match side {
            Side::Bid => self.pair.numeraire(),
            Side::Ask => self.pair.index(),
        }
    }

    /// Take custody of the posted asset from a placing trader.
    pub fn take_custody(
        &mut self,
        trader: &AccountId,
        side: Side,
        amount: Quantity,
    ) -> Result<(), LedgerError> {
        let asset = self.posted_asset(side).to_string();
        self.ledger.pull(&asset, trader, amount)
    }

    /// Return unspent custody of the posted asset to its owner.
    pub fn refund(
        &mut self,
        trader: &AccountId,
        side: Side,
        amount: Quantity,
    ) -> Result<(), LedgerError> {
        let asset = self.posted_asset(side).to_string();
        self.ledger.push(&asset, trader, amount)
    }

    /// Pay out numeraire from custody (what an ask side earns).
    pub fn release_numeraire(&mut self, to: &AccountId, amount: Quantity) -> Result<(), LedgerError> {
        self.ledger.push(self.pair.numeraire(), to, amount)
    }

    /// Pay out index tokens from custody (what a bid side earns).
    pub fn release_index(&mut self, to: &AccountId, amount: Quantity) -> Result<(), LedgerError> {
        self.ledger.push(self.pair.index(), to, amount)
    }
}
