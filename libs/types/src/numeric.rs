//! Exact integer numeric types for prices and quantities
//!
//! All book arithmetic is exact `u64` integer arithmetic. A price is quoted
//! as whole numeraire units per one index unit and must be positive (zero is
//! reserved as "no price" and is rejected at the placement boundary). A
//! quantity may be zero; its unit — numeraire or index — depends on the
//! order side and is documented at each use site.
//!
//! Floor division `Quantity / Price` answers "how many whole index units
//! does this much numeraire buy"; the remainder below one unit's cost is the
//! dust the matching rules are defined over.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Sub, SubAssign};

/// Price in numeraire units per one index unit.
///
/// Always positive. `new` panics on zero; use `try_new` at validation
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Create a new price.
    ///
    /// # Panics
    /// Panics if `value` is zero.
    pub fn new(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(value)
    }

    /// Try to create a price, returning None for the reserved zero value.
    pub fn try_new(value: u64) -> Option<Self> {
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Numeraire value of `units` index units at this price.
    pub fn notional(&self, units: Quantity) -> Quantity {
        Quantity(units.0 * self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity of an asset, in whole units.
///
/// For bids the unit is the numeraire; for asks it is the index asset.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    /// Create a new quantity.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check if the quantity is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "Quantity subtraction would underflow");
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        assert!(self.0 >= rhs.0, "Quantity subtraction would underflow");
        self.0 -= rhs.0;
    }
}

/// Whole index units purchasable with this numeraire amount at `price`.
///
/// Floor division: the remainder is dust.
impl Div<Price> for Quantity {
    type Output = Quantity;

    fn div(self, price: Price) -> Self::Output {
        Quantity(self.0 / price.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::new(100);
        assert_eq!(price.as_u64(), 100);
    }

    #[test]
    #[should_panic(expected = "Price must be positive")]
    fn test_price_zero_panics() {
        Price::new(0);
    }

    #[test]
    fn test_price_try_new() {
        assert!(Price::try_new(1).is_some());
        assert!(Price::try_new(0).is_none());
    }

    #[test]
    fn test_quantity_arithmetic() {
        let a = Quantity::new(70);
        let b = Quantity::new(30);
        assert_eq!(a + b, Quantity::new(100));
        assert_eq!(a - b, Quantity::new(40));

        let mut c = a;
        c += b;
        c -= Quantity::new(100);
        assert!(c.is_zero());
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn test_quantity_sub_underflow_panics() {
        let _ = Quantity::new(1) - Quantity::new(2);
    }

    #[test]
    fn test_floor_division() {
        // 95 numeraire at price 10 buys 9 whole index units; 5 is dust.
        assert_eq!(Quantity::new(95) / Price::new(10), Quantity::new(9));
        assert_eq!(Quantity::new(5) / Price::new(10), Quantity::ZERO);
    }

    #[test]
    fn test_notional() {
        assert_eq!(Price::new(12).notional(Quantity::new(3)), Quantity::new(36));
    }

    #[test]
    fn test_serialization() {
        let price = Price::new(50_000);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "50000");

        let qty: Quantity = serde_json::from_str("7").unwrap();
        assert_eq!(qty, Quantity::new(7));
    }
}
