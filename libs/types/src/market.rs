//! Trading pair identifier
//!
//! Format: "INDEX/NUMERAIRE" (e.g. "BTC/USDT"). The index asset is the
//! thing being priced; the numeraire is the unit of account. Both asset
//! symbols are fixed at engine construction and name ledger assets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The trading pair a book operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketPair(String);

impl MarketPair {
    /// Create a new pair from an "INDEX/NUMERAIRE" symbol.
    ///
    /// # Panics
    /// Panics if the format is invalid (must contain '/').
    pub fn new(symbol: impl Into<String>) -> Self {
        let s = symbol.into();
        assert!(s.contains('/'), "MarketPair must be in INDEX/NUMERAIRE format");
        Self(s)
    }

    /// Try to create a pair, returning None if invalid.
    pub fn try_new(symbol: impl Into<String>) -> Option<Self> {
        let s = symbol.into();
        if s.contains('/') {
            Some(Self(s))
        } else {
            None
        }
    }

    /// Get the pair symbol string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The traded (index) asset symbol.
    pub fn index(&self) -> &str {
        self.0.split('/').next().unwrap_or("")
    }

    /// The unit-of-account (numeraire) asset symbol.
    pub fn numeraire(&self) -> &str {
        self.0.split('/').nth(1).unwrap_or("")
    }
}

impl fmt::Display for MarketPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MarketPair {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
