//! Type-safe price representation using decimal arithmetic.
//!
//! All Constructo amounts are Indian rupees. The payment gateway works in
//! paise (1/100 rupee), so [`Price`] carries the conversion both ways.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A rupee amount with paise precision.
///
/// Wire format is a bare number (the API does not carry a currency field on
/// prices; everything is INR), hence `#[serde(transparent)]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal rupee amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from whole rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Create a price from paise (1/100 rupee).
    #[must_use]
    pub fn from_paise(paise: i64) -> Self {
        Self(Decimal::new(paise, 2))
    }

    /// The underlying decimal rupee amount.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Convert to paise, truncating sub-paise precision.
    ///
    /// Truncation (not rounding) matches the gateway-side conversion
    /// `int(amount * 100)`.
    #[must_use]
    pub fn to_paise(&self) -> i64 {
        (self.0 * Decimal::ONE_HUNDRED).trunc().to_i64().unwrap_or(0)
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{20b9}{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_paise() {
        assert_eq!(Price::from_rupees(4099).to_paise(), 409_900);
        assert_eq!(Price::from_paise(4099).to_paise(), 4_099);
        assert_eq!(Price::ZERO.to_paise(), 0);
    }

    #[test]
    fn test_to_paise_truncates() {
        // 10.999 rupees -> 1099 paise, matching int(amount * 100)
        let price = Price::new(Decimal::new(10_999, 3));
        assert_eq!(price.to_paise(), 1_099);
    }

    #[test]
    fn test_arithmetic() {
        let subtotal = Price::from_rupees(4000) + Price::from_paise(9900);
        assert_eq!(subtotal, Price::from_paise(409_900));

        let line = Price::from_rupees(899) * 3;
        assert_eq!(line, Price::from_rupees(2697));

        let total: Price = [Price::from_rupees(1), Price::from_rupees(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_rupees(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_paise(409_900).to_string(), "\u{20b9}4099.00");
        assert_eq!(Price::from_rupees(99).to_string(), "\u{20b9}99.00");
    }

    #[test]
    fn test_serde_accepts_numbers() {
        // The API sends bare JSON numbers for price fields.
        let price: Price = serde_json::from_str("8999").unwrap();
        assert_eq!(price, Price::from_rupees(8999));

        let price: Price = serde_json::from_str("99.5").unwrap();
        assert_eq!(price.to_paise(), 9_950);
    }
}
