//! Type-safe price representation using decimal arithmetic.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A US-dollar amount.
///
/// Every amount in the console is in USD, so the type carries no currency
/// code. [`Display`](fmt::Display) renders the en-US currency format used
/// in tables, e.g. `$1,299.99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount a form may enter: `$999,999,999.99`.
    pub const MAX: Self = Self(Decimal::from_parts(1_215_752_191, 23, 0, false, 2));

    /// Wrap a decimal dollar amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build a price from whole cents, e.g. `from_cents(79_999)` is `$799.99`.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

// Totals saturate at the decimal bounds instead of panicking.
impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(rhs)))
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.2}", rounded.abs());
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}${grouped}.{cents}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_like_en_us_currency() {
        assert_eq!(Price::from_cents(79_999).to_string(), "$799.99");
        assert_eq!(Price::from_cents(129_999).to_string(), "$1,299.99");
        assert_eq!(Price::from_cents(123_456_789).to_string(), "$1,234,567.89");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_formats_negative_amounts_with_leading_sign() {
        assert_eq!(Price::from_cents(-1_050).to_string(), "-$10.50");
    }

    #[test]
    fn test_rounds_to_cents() {
        assert_eq!(Price::new(Decimal::new(10_005, 3)).to_string(), "$10.01");
    }

    #[test]
    fn test_sums_and_scales() {
        let total: Price = [Price::from_cents(150), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(400));
        assert_eq!(Price::from_cents(8_999) * 3, Price::from_cents(26_997));
    }

    #[test]
    fn test_max_is_just_under_a_billion() {
        assert_eq!(Price::MAX, Price::from_cents(99_999_999_999));
        assert_eq!(Price::MAX.to_string(), "$999,999,999.99");
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge * 2, huge);
        assert_eq!(huge + Price::from_cents(1), huge);
        let total: Price = [huge, huge, Price::MAX].into_iter().sum();
        assert_eq!(total, huge);
    }
}
