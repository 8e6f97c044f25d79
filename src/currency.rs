//! Currency formatting for report output.
//!
//! The MPS7 format does not say whether amounts are whole currency units or
//! cents, so the caller chooses a [`CurrencyUnit`]. Scaling and rounding go
//! through `rust_decimal` to avoid floating-point error.

use crate::error::{Mps7Error, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// The unit raw amounts are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyUnit {
    /// Whole currency units, e.g. dollars.
    #[default]
    Major,

    /// Hundredths of a currency unit, e.g. cents.
    Minor,
}

impl CurrencyUnit {
    /// Decimal places implied by the unit.
    pub fn scale(self) -> u32 {
        match self {
            CurrencyUnit::Major => 0,
            CurrencyUnit::Minor => 2,
        }
    }
}

impl FromStr for CurrencyUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(CurrencyUnit::Major),
            "minor" => Ok(CurrencyUnit::Minor),
            other => Err(format!("unknown currency unit '{}'", other)),
        }
    }
}

impl fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyUnit::Major => f.write_str("major"),
            CurrencyUnit::Minor => f.write_str("minor"),
        }
    }
}

/// Formats `amount` as dollars with thousands grouping and two decimals.
///
/// # Examples
///
/// ```
/// use mps7_reader::{format_currency, CurrencyUnit};
///
/// assert_eq!(format_currency(1234567, CurrencyUnit::Major).unwrap(), "$1,234,567.00");
/// assert_eq!(format_currency(-6050, CurrencyUnit::Minor).unwrap(), "-$60.50");
/// ```
///
/// # Errors
///
/// Returns [`Mps7Error::AmountOutOfRange`] if `amount` does not fit a
/// 96-bit decimal mantissa.
pub fn format_currency(amount: i128, unit: CurrencyUnit) -> Result<String> {
    let mut value = Decimal::try_from_i128_with_scale(amount, unit.scale())
        .map_err(|_| Mps7Error::AmountOutOfRange(amount.to_string()))?;
    value.rescale(2);

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let digits = format!("{:.2}", value.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    Ok(format!("{}${}.{}", sign, group_thousands(whole), cents))
}

/// Formats an unsigned total such as [`Summary::total_debits`](crate::Summary::total_debits).
///
/// # Errors
///
/// Returns [`Mps7Error::AmountOutOfRange`] if `total` does not fit an `i128`
/// or a 96-bit decimal mantissa.
pub fn format_total(total: u128, unit: CurrencyUnit) -> Result<String> {
    let amount =
        i128::try_from(total).map_err(|_| Mps7Error::AmountOutOfRange(total.to_string()))?;
    format_currency(amount, unit)
}

/// Inserts a comma between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
