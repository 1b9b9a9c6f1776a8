//! Naira amounts with lenient parsing and display formatting.
//!
//! Amounts cross the wire as JSON numbers or currency-formatted strings
//! (`"₦2,000"`), so deserialization accepts both. Malformed input parses
//! to zero rather than failing - a bad price on a cart line must never
//! abort checkout totalling.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency symbol used for display. No configurable currency in scope.
const NAIRA: &str = "\u{20a6}";

/// A monetary amount in naira, backed by decimal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero naira.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create from a whole-naira amount.
    #[must_use]
    pub fn from_major(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse an amount from either a numeric or currency-formatted
    /// string representation.
    ///
    /// Strips every character except digits, `.` and `-` before
    /// parsing, so `"₦2,000"` parses to `2000`. Anything that still
    /// fails to parse is zero.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        Self(cleaned.parse::<Decimal>().unwrap_or_default())
    }

    /// Whether this amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    /// Renders as `₦` followed by locale-grouped digits, e.g. `₦2,500`
    /// or `₦1,234,567.5`. Trailing fractional zeros are dropped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.0.normalize();
        let text = normalized.to_string();
        let (sign, unsigned) = text
            .strip_prefix('-')
            .map_or(("", text.as_str()), |rest| ("-", rest));
        let (int_part, frac_part) = unsigned
            .split_once('.')
            .map_or((unsigned, None), |(i, fr)| (i, Some(fr)));

        write!(f, "{sign}{NAIRA}{}", group_digits(int_part))?;
        if let Some(frac) = frac_part {
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}

/// Insert comma separators every three digits from the right.
fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0.to_f64().unwrap_or(0.0))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a currency-formatted string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money(Decimal::from_f64(v).unwrap_or_default()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Ok(Money::parse_lenient(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_currency_string() {
        assert_eq!(Money::parse_lenient("\u{20a6}2,000"), Money::from_major(2000));
    }

    #[test]
    fn test_parse_lenient_plain_number() {
        assert_eq!(Money::parse_lenient("2500"), Money::from_major(2500));
        assert_eq!(Money::parse_lenient("12.5").amount().to_string(), "12.5");
    }

    #[test]
    fn test_parse_lenient_malformed_is_zero() {
        assert_eq!(Money::parse_lenient(""), Money::ZERO);
        assert_eq!(Money::parse_lenient("free"), Money::ZERO);
        assert_eq!(Money::parse_lenient("1.2.3"), Money::ZERO);
    }

    #[test]
    fn test_parse_lenient_negative() {
        assert_eq!(Money::parse_lenient("-₦500"), Money::from_major(-500));
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::from_major(0).to_string(), "\u{20a6}0");
        assert_eq!(Money::from_major(999).to_string(), "\u{20a6}999");
        assert_eq!(Money::from_major(2500).to_string(), "\u{20a6}2,500");
        assert_eq!(Money::from_major(1_234_567).to_string(), "\u{20a6}1,234,567");
    }

    #[test]
    fn test_display_fraction_and_sign() {
        assert_eq!(Money::parse_lenient("1234.50").to_string(), "\u{20a6}1,234.5");
        assert_eq!(Money::from_major(-2500).to_string(), "-\u{20a6}2,500");
    }

    #[test]
    fn test_arithmetic() {
        let unit = Money::parse_lenient("\u{20a6}2,000");
        assert_eq!(unit * 2, Money::from_major(4000));
        assert_eq!(
            Money::from_major(4000) + Money::from_major(2500),
            Money::from_major(6500)
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_major(1), Money::from_major(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_major(3));
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Money = serde_json::from_str("2500").expect("number");
        assert_eq!(from_number, Money::from_major(2500));

        let from_float: Money = serde_json::from_str("2500.5").expect("float");
        assert_eq!(from_float.amount().to_string(), "2500.5");

        let from_string: Money = serde_json::from_str("\"\u{20a6}2,000\"").expect("string");
        assert_eq!(from_string, Money::from_major(2000));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&Money::from_major(2500)).expect("serialize");
        let value: f64 = json.parse().expect("numeric json");
        assert!((value - 2500.0).abs() < f64::EPSILON);
    }
}
