//! Asset vault — balance tracking and custody primitives
//!
//! The matching engine consumes the ledger through two primitives:
//! `pull` takes custody of a trader's tokens into the book's own holdings,
//! `push` releases book holdings to a trader. Both are synchronous and must
//! not call back into the book.
//!
//! `AssetVault` is the in-memory implementation used by tests and
//! simulations. Balances are stored as `HashMap<AccountId, HashMap<String,
//! u64>>` where the inner keys are asset symbol strings (e.g. "BTC",
//! "USDT"); the book's custody is tracked per asset in `holdings`.

use std::collections::HashMap;
use types::ids::AccountId;
use types::numeric::Quantity;

use crate::errors::LedgerError;

/// Custody primitives the matching engine is written against.
///
/// Failures propagate to the engine caller unchanged; the engine never
/// wraps or swallows them.
pub trait TokenLedger {
    /// Take custody: move `amount` of `asset` from a trader's balance into
    /// the book's own holdings.
    fn pull(&mut self, asset: &str, from: &AccountId, amount: Quantity) -> Result<(), LedgerError>;

    /// Release custody: move `amount` of `asset` from the book's holdings
    /// to a trader's balance.
    fn push(&mut self, asset: &str, to: &AccountId, amount: Quantity) -> Result<(), LedgerError>;
}

/// In-memory asset ledger.
#[derive(Debug, Default)]
pub struct AssetVault {
    /// Balances: account -> (asset -> amount)
    balances: HashMap<AccountId, HashMap<String, u64>>,
    /// The book's own custody, per asset.
    holdings: HashMap<String, u64>,
}

impl AssetVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a trader's balance out of thin air. Test funding only.
    pub fn deposit(
        &mut self,
        account_id: AccountId,
        asset: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let account_balances = self.balances.entry(account_id).or_default();
        let current = account_balances.entry(asset.to_string()).or_insert(0);
        *current = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Get a trader's balance for one asset.
    pub fn balance_of(&self, account_id: &AccountId, asset: &str) -> u64 {
        self.balances
            .get(account_id)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or(0)
    }

    /// Get the book's custody holdings for one asset.
    pub fn holdings_of(&self, asset: &str) -> u64 {
        self.holdings.get(asset).copied().unwrap_or(0)
    }

    /// Internal debit with underflow protection.
    fn debit(
        &mut self,
        account_id: &AccountId,
        asset: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let account_balances =
            self.balances
                .get_mut(account_id)
                .ok_or_else(|| LedgerError::AccountNotFound {
                    account_id: account_id.to_string(),
                })?;

        let current = account_balances.entry(asset.to_string()).or_insert(0);
        if *current < amount {
            return Err(LedgerError::InsufficientBalance {
                asset: asset.to_string(),
                required: amount,
                available: *current,
            });
        }
        *current -= amount;
        Ok(())
    }

    /// Internal credit with overflow protection.
    fn credit(
        &mut self,
        account_id: AccountId,
        asset: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let account_balances = self.balances.entry(account_id).or_default();
        let current = account_balances.entry(asset.to_string()).or_insert(0);
        *current = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}

impl TokenLedger for AssetVault {
    fn pull(&mut self, asset: &str, from: &AccountId, amount: Quantity) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.debit(from, asset, amount.as_u64())?;
        let held = self.holdings.entry(asset.to_string()).or_insert(0);
        *held = held
            .checked_add(amount.as_u64())
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn push(&mut self, asset: &str, to: &AccountId, amount: Quantity) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        let held = self.holdings.entry(asset.to_string()).or_insert(0);
        if *held < amount.as_u64() {
            return Err(LedgerError::InsufficientBalance {
                asset: asset.to_string(),
                required: amount.as_u64(),
                available: *held,
            });
        }
        *held -= amount.as_u64();
        self.credit(*to, asset, amount.as_u64())
    }
}
