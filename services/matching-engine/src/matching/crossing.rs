//! Crossing detection logic
//!
//! Determines whether an incoming order's price bound admits the best
//! opposing level. A `None` bound is a market order: every price is
//! acceptable.

use types::numeric::Price;

/// Check if a bid with the given limit takes liquidity at `ask_price`.
pub fn bid_takes(limit: Option<Price>, ask_price: Price) -> bool {
    limit.map_or(true, |p_limit| ask_price <= p_limit)
}

/// Check if an ask with the given limit takes liquidity at `bid_price`.
pub fn ask_takes(limit: Option<Price>, bid_price: Price) -> bool {
    limit.map_or(true, |p_limit| bid_price >= p_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_takes_cheaper_ask() {
        assert!(bid_takes(Some(Price::new(100)), Price::new(90)));
    }

    #[test]
    fn test_equal_prices_cross() {
        assert!(bid_takes(Some(Price::new(100)), Price::new(100)));
        assert!(ask_takes(Some(Price::new(100)), Price::new(100)));
    }

    #[test]
    fn test_no_cross_outside_limit() {
        assert!(!bid_takes(Some(Price::new(90)), Price::new(100)));
        assert!(!ask_takes(Some(Price::new(100)), Price::new(90)));
    }

    #[test]
    fn test_market_takes_any_price() {
        assert!(bid_takes(None, Price::new(1_000_000)));
        assert!(ask_takes(None, Price::new(1)));
    }
}
