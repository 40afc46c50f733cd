use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A money amount stored as integer hundredths so sums stay exact.
/// `Amount::from_minor(80050)` is 800.50.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_minor(minor: i64) -> Self {
        Amount(minor)
    }

    /// Whole units, e.g. `Amount::from_units(800)` is 800.00.
    pub const fn from_units(units: i64) -> Self {
        Amount(units * 100)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// `None` when the sum does not fit.
    pub const fn checked_add(self, rhs: Amount) -> Option<Amount> {
        match self.0.checked_add(rhs.0) {
            Some(minor) => Some(Amount(minor)),
            None => None,
        }
    }
}

impl fmt::Display for Amount {
    /// 80050 -> "800.50", -5 -> "-0.05"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Accepts "800", "800.5", "800.50", ".50" and a leading minus.
    /// Digits past the second decimal place are truncated.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (units_str, fraction_str) = match digits.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (digits, ""),
        };

        if units_str.is_empty() && fraction_str.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(units_str) || !all_digits(fraction_str) {
            return Err(ParseAmountError::InvalidFormat(input.to_string()));
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str
                .parse()
                .map_err(|_| ParseAmountError::OutOfRange(input.to_string()))?
        };

        let mut fraction: String = fraction_str.chars().take(2).collect();
        while fraction.len() < 2 {
            fraction.push('0');
        }
        // two ascii digits always parse
        let hundredths: i64 = fraction.parse().unwrap_or(0);

        let minor = units
            .checked_mul(100)
            .and_then(|m| m.checked_add(hundredths))
            .ok_or_else(|| ParseAmountError::OutOfRange(input.to_string()))?;

        Ok(Amount(if negative { -minor } else { minor }))
    }
}

/// Saturates at the `i64` bounds. Use [`Amount::checked_add`] where the
/// overflow has to be reported.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat(s) => {
                write!(f, "invalid amount '{}', expected a number like 800 or 800.50", s)
            }
            ParseAmountError::OutOfRange(s) => write!(f, "amount '{}' is too large", s),
        }
    }
}

impl std::error::Error for ParseAmountError {}
