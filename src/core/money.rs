//! Money helpers shared by the assignment engine and the cost aggregator.
//!
//! Amounts are kept as `f64` dollars like the entity columns. Rounding to cents
//! happens once, at the edge of the aggregator.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Nudge applied before rounding so that values like `2.675`, which are stored as
/// `2.67499999…`, still round half-up.
const ROUNDING_NUDGE: f64 = 1e-9;

/// How a receipt's `tax` column is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    /// `tax` is a flat amount in dollars
    Amount,
    /// `tax` is a percentage of the subtotal
    Percentage,
}

impl TaxType {
    /// Value stored in the `tax_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percentage => "percentage",
        }
    }

    /// Tax owed on `subtotal` for a receipt whose tax column holds `tax`.
    #[must_use]
    pub fn tax_amount(self, tax: f64, subtotal: f64) -> f64 {
        match self {
            Self::Amount => tax,
            Self::Percentage => subtotal * (tax / 100.0),
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "amount" => Ok(Self::Amount),
            "percentage" | "percent" => Ok(Self::Percentage),
            other => Err(Error::validation(format!(
                "Unknown tax type '{other}', expected 'amount' or 'percentage'"
            ))),
        }
    }
}

/// Rounds to two decimal places, half-up.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    ((value * 100.0) + value.signum() * ROUNDING_NUDGE).round() / 100.0
}

/// Compares two amounts within `tolerance`.
#[must_use]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Rejects negative, NaN and infinite amounts.
pub fn ensure_non_negative(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

/// Formats an amount like `$12.50`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}
