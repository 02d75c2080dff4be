//! # Money Module
//!
//! Ticket amounts as integer cents.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004   (f64)                              │
//! │                                                                         │
//! │  Points are rounded from amount × rate, so a float that lands on the    │
//! │  wrong side of .5 awards a different number of points.                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    150050 cents × 100 bps + 500000, / 1000000 = 15 points               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use puntos_core::money::Money;
//!
//! let ticket: Money = "1500.50".parse().unwrap();
//! assert_eq!(ticket.cents(), 150050);
//! assert_eq!(ticket.whole_units(), 1500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units, rounded toward zero.
    ///
    /// This is the per-ticket redemption ceiling: one point per whole unit.
    #[inline]
    pub const fn whole_units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses operator input such as `1500`, `1500.5` or `1500.50`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - At most two decimal places
    /// - Negative amounts are rejected (tickets are never negative)
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "ticket amount".to_string(),
            });
        }
        if s.starts_with('-') {
            return Err(ValidationError::OutOfRange {
                field: "ticket amount".to_string(),
                min: 0,
                max: i64::MAX / 100,
            });
        }
        let s = s.strip_prefix('+').unwrap_or(s);

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "ticket amount".to_string(),
            reason: reason.to_string(),
        };

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };
        if major.is_empty() && minor.is_empty() {
            return Err(invalid("expected a number"));
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a number"));
        }
        if minor.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major_value: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("amount too large"))?
        };
        // "5" after the point means 50 cents
        let minor_value: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("expected a number"))? * 10,
            _ => minor.parse().map_err(|_| invalid("expected a number"))?,
        };

        major_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor_value))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

/// Display for operator-facing output, e.g. `$1500.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amounts() {
        assert_eq!(Money::parse("1500.50").unwrap().cents(), 150050);
        assert_eq!(Money::parse("1500.5").unwrap().cents(), 150050);
        assert_eq!(Money::parse("30").unwrap().cents(), 3000);
        assert_eq!(Money::parse(" 30.\n").unwrap().cents(), 3000);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("+12.01").unwrap().cents(), 1201);
        assert_eq!(Money::parse("0").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Money::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("-5"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(Money::parse("1.005").is_err());
        assert!(Money::parse("12a").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1,500.00").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_whole_units_floor() {
        assert_eq!(Money::from_cents(3099).whole_units(), 30);
        assert_eq!(Money::from_cents(99).whole_units(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(150050).to_string(), "$1500.50");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }
}
