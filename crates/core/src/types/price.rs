//! Non-negative price in taka using decimal arithmetic.
//!
//! The catalog quotes every price in Bangladeshi taka, so a price is a bare
//! amount; there is no currency conversion anywhere in the storefront.

use core::fmt;
use core::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display symbol for taka amounts.
pub const TAKA_SYMBOL: &str = "৳";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price.
///
/// ```
/// use greenleaf_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(500, 0)).unwrap();
/// assert_eq!(price.to_string(), "৳500");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount.normalize()))
    }

    /// Create a price from a whole number of taka.
    #[must_use]
    pub fn from_taka(taka: u32) -> Self {
        Self(Decimal::from(taka))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Sum of two prices, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Sum of two prices, clamped to the largest representable amount.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Whether the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Saturates instead of overflowing.
impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TAKA_SYMBOL}{}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let err = Price::new(Decimal::new(-150, 2)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::new(-150, 2)));
    }

    #[test]
    fn test_zero_price_accepted() {
        let price = Price::new(Decimal::ZERO).unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_display_drops_trailing_zeros() {
        let price = Price::new(Decimal::new(12_050, 2)).unwrap();
        assert_eq!(price.to_string(), "৳120.5");
        assert_eq!(Price::from_taka(300).to_string(), "৳300");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_taka(100), Price::from_taka(100), Price::from_taka(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_taka(250));
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        let max = Price::new(Decimal::MAX).unwrap();
        assert_eq!(
            Price::from_taka(1).checked_add(Price::from_taka(2)),
            Some(Price::from_taka(3))
        );
        assert_eq!(max.checked_add(max), None);
    }

    #[test]
    fn test_sum_saturates_at_max() {
        let max = Price::new(Decimal::MAX).unwrap();
        let total: Price = [max, max, Price::from_taka(1)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("500").unwrap();
        assert_eq!(price, Price::from_taka(500));
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
