//! Money type for representing spending amounts and limits
//!
//! Amounts are plain decimals (`f64`). Group shares divide an amount by the
//! participant count and the fractional result is kept as-is, so no fixed
//! point representation is used.

use std::fmt;
use std::ops::{Add, Div, Sub};

/// Currency symbol used when displaying amounts
pub const CURRENCY_SYMBOL: &str = "€";

/// A monetary amount in euros
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Money(f64);

impl Money {
    /// Create a Money amount from a decimal value
    ///
    /// # Examples
    /// ```
    /// use spendcap::models::Money;
    /// let amount = Money::new(10.5);
    /// assert_eq!(amount.value(), 10.5);
    /// ```
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is finite and strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Check if the amount is finite and not below zero
    pub fn is_non_negative(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10", "10.50", "€10.50", "-3"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix(CURRENCY_SYMBOL).unwrap_or(rest).trim();
        if rest.starts_with(&['-', '+'][..]) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value: f64 = rest
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        if !value.is_finite() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a custom currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.0 < 0.0 {
            format!("-{}{}", symbol, -self.0)
        } else {
            format!("{}{}", symbol, self.0)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// Split an amount into equal parts
impl Div<usize> for Money {
    type Output = Self;

    fn div(self, parts: usize) -> Self {
        Self(self.0 / parts as f64)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(30.0).to_string(), "€30");
        assert_eq!(Money::new(12.5).to_string(), "€12.5");
        assert_eq!(Money::new(-4.25).to_string(), "-€4.25");
        assert_eq!(Money::zero().to_string(), "€0");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10").unwrap(), Money::new(10.0));
        assert_eq!(Money::parse(" 10.50 ").unwrap(), Money::new(10.5));
        assert_eq!(Money::parse("€7.25").unwrap(), Money::new(7.25));
        assert_eq!(Money::parse("-3").unwrap(), Money::new(-3.0));
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("inf").is_err());
        assert!(Money::parse("NaN").is_err());
        assert!(Money::parse("--150").is_err());
        assert!(Money::parse("-€-5").is_err());
        assert!(Money::parse("+7").is_err());
    }

    #[test]
    fn test_division_keeps_fraction() {
        let share = Money::new(10.0) / 3;
        assert_eq!(share.value(), 10.0 / 3.0);
    }

    #[test]
    fn test_positivity() {
        assert!(Money::new(0.01).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::new(f64::NAN).is_positive());
        assert!(Money::zero().is_non_negative());
        assert!(!Money::new(-1.0).is_non_negative());
    }

    #[test]
    fn test_sum() {
        let total: Money = [1.5, 2.0, 3.5].into_iter().map(Money::new).sum();
        assert_eq!(total, Money::new(7.0));
    }
}
