//! # Amount Module
//!
//! Reading form text into numbers, and numbers back into form text.
//!
//! ## Why f64 Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  COMPATIBILITY WITH STORED VALUES                                       │
//! │                                                                         │
//! │  Every price and margin already in the catalog was computed with       │
//! │  IEEE-754 doubles and rendered with 2 decimals. Re-running the same    │
//! │  formulas on the same doubles yields the same strings, digit for       │
//! │  digit. Switching to integer cents would move some of them by 0.01.    │
//! │                                                                         │
//! │  Rule: full precision inside a conversion, 2 decimals at the edge.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricebook_core::amount::{format_amount, parse_decimal, DecimalStyle, PurchasePrice};
//!
//! assert_eq!(parse_decimal("12.5 €"), Some(12.5));
//! assert_eq!(parse_decimal("abc"), None);
//!
//! assert_eq!(format_amount(1440.0, DecimalStyle::Fixed), "1440.00");
//! assert_eq!(format_amount(1440.0, DecimalStyle::Compact), "1440");
//!
//! // Zero purchase price never reaches a division
//! assert!(PurchasePrice::parse("0").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Parsing
// =============================================================================

/// Reads the leading decimal number out of a form input.
///
/// ## Rules
/// - Leading whitespace is skipped
/// - The longest numeric prefix wins: `"12abc"` → 12, `"12,5"` → 12
/// - Optional sign, fraction and exponent (`"-1.5e2"` → -150)
/// - No digit at all → `None` (`""`, `"."`, `"abc"`)
/// - Non-finite results → `None`
///
/// ## Example
/// ```rust
/// use pricebook_core::amount::parse_decimal;
///
/// assert_eq!(parse_decimal("  900"), Some(900.0));
/// assert_eq!(parse_decimal("-.5"), Some(-0.5));
/// assert_eq!(parse_decimal("12."), Some(12.0));
/// assert_eq!(parse_decimal(""), None);
/// ```
pub fn parse_decimal(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let scan_digits = |from: usize| {
        let mut i = from;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };

    let int_end = scan_digits(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = scan_digits(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it ("1e" reads as 1)
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_end = scan_digits(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Rounding & Formatting
// =============================================================================

/// Rounds to 2 decimals, halves away from zero.
///
/// Rounding looks at the exact value held by the double, not at its
/// shortest decimal form: `0.075` is stored as `0.07499999...` and rounds
/// down. Never returns negative zero.
///
/// ## Example
/// ```rust
/// use pricebook_core::amount::round_half_up;
///
/// assert_eq!(round_half_up(27.7777), 27.78);
/// assert_eq!(round_half_up(0.125), 0.13);
/// assert_eq!(round_half_up(0.075), 0.07);
/// ```
pub fn round_half_up(value: f64) -> f64 {
    let rounded = if is_cent_tie(value) {
        // value * 100 is exact for a tie
        (value * 100.0).round() / 100.0
    } else {
        // `{:.2}` rounds the exact decimal expansion, and there is no tie here
        format!("{:.2}", value).parse().unwrap_or(value)
    };

    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Whether the exact value lies halfway between two cents.
///
/// A tie is `(2k + 1) / 200`. As a binary fraction that is only possible
/// for odd multiples of 1/8, and scaling by 8 is exact.
fn is_cent_tie(value: f64) -> bool {
    let eighths = value * 8.0;
    eighths.fract() == 0.0 && eighths % 2.0 != 0.0
}

/// How an amount is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DecimalStyle {
    /// Always 2 decimals. Used for every computed form field.
    #[default]
    Fixed,
    /// Whole values without decimals, others with 2. Used in list views.
    Compact,
}

/// Formats an amount for display.
///
/// ## Example
/// ```rust
/// use pricebook_core::amount::{format_amount, DecimalStyle};
///
/// assert_eq!(format_amount(33.333333, DecimalStyle::Fixed), "33.33");
/// assert_eq!(format_amount(1200.0, DecimalStyle::Fixed), "1200.00");
/// assert_eq!(format_amount(1200.0, DecimalStyle::Compact), "1200");
/// assert_eq!(format_amount(1199.5, DecimalStyle::Compact), "1199.50");
/// ```
pub fn format_amount(value: f64, style: DecimalStyle) -> String {
    match style {
        DecimalStyle::Compact if value.fract() == 0.0 => {
            // + 0.0 turns -0.0 into 0.0
            format!("{:.0}", value.floor() + 0.0)
        }
        DecimalStyle::Fixed | DecimalStyle::Compact => format!("{:.2}", round_half_up(value)),
    }
}

// =============================================================================
// Purchase Price
// =============================================================================

/// A purchase price that is safe to divide by: finite and strictly positive.
///
/// Every conversion takes one of these, so a zero, negative or unreadable
/// purchase price can only ever lead to "no recomputation".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PurchasePrice(f64);

impl PurchasePrice {
    /// Wraps a value, or `None` if it is not a usable cost basis.
    ///
    /// ## Example
    /// ```rust
    /// use pricebook_core::amount::PurchasePrice;
    ///
    /// assert_eq!(PurchasePrice::new(900.0).map(|p| p.value()), Some(900.0));
    /// assert!(PurchasePrice::new(0.0).is_none());
    /// assert!(PurchasePrice::new(-1.0).is_none());
    /// assert!(PurchasePrice::new(f64::NAN).is_none());
    /// ```
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(PurchasePrice(value))
    }

    /// Parses form text into a purchase price.
    pub fn parse(input: &str) -> Option<Self> {
        parse_decimal(input).and_then(Self::new)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PurchasePrice {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        PurchasePrice::new(value).ok_or_else(|| ValidationError::MustBePositive {
            field: "purchase price".to_string(),
        })
    }
}

impl From<PurchasePrice> for f64 {
    fn from(price: PurchasePrice) -> Self {
        price.0
    }
}

impl fmt::Display for PurchasePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0, DecimalStyle::Compact))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_decimal("900"), Some(900.0));
        assert_eq!(parse_decimal("1200.50"), Some(1200.5));
        assert_eq!(parse_decimal("+3"), Some(3.0));
        assert_eq!(parse_decimal("-12.25"), Some(-12.25));
        assert_eq!(parse_decimal(".75"), Some(0.75));
        assert_eq!(parse_decimal("1.5e2"), Some(150.0));
    }

    #[test]
    fn test_parse_takes_numeric_prefix() {
        assert_eq!(parse_decimal("12abc"), Some(12.0));
        assert_eq!(parse_decimal("12,5"), Some(12.0));
        assert_eq!(parse_decimal("\t 7 €"), Some(7.0));
        assert_eq!(parse_decimal("1e"), Some(1.0));
        assert_eq!(parse_decimal("1e+"), Some(1.0));
        assert_eq!(parse_decimal("3.2.1"), Some(3.2));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("€12"), None);
        assert_eq!(parse_decimal("1e400"), None);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(33.3333), 33.33);
        assert_eq!(round_half_up(27.7777), 27.78);
        assert_eq!(round_half_up(2.5), 2.5);
        assert_eq!(round_half_up(0.005), 0.01);
        assert_eq!(round_half_up(-0.004), 0.0);
        assert!(round_half_up(-0.004).is_sign_positive());
    }

    #[test]
    fn test_round_uses_exact_binary_value() {
        // Stored just below the half cent
        assert_eq!(format_amount(0.075, DecimalStyle::Fixed), "0.07");
        assert_eq!(format_amount(0.725, DecimalStyle::Fixed), "0.72");
        assert_eq!(format_amount(1.005, DecimalStyle::Fixed), "1.00");
        assert_eq!(format_amount(0.825, DecimalStyle::Fixed), "0.82");

        // Exact ties go away from zero
        assert_eq!(format_amount(0.125, DecimalStyle::Fixed), "0.13");
        assert_eq!(format_amount(0.375, DecimalStyle::Fixed), "0.38");
        assert_eq!(format_amount(-0.125, DecimalStyle::Fixed), "-0.13");
        assert_eq!(format_amount(1234.625, DecimalStyle::Fixed), "1234.63");

        // Half units are not cent ties
        assert_eq!(format_amount(82.5, DecimalStyle::Fixed), "82.50");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_amount(1440.0, DecimalStyle::Fixed), "1440.00");
        assert_eq!(format_amount(250.0, DecimalStyle::Fixed), "250.00");
        assert_eq!(format_amount(-0.001, DecimalStyle::Fixed), "0.00");
        assert_eq!(format_amount(-16.666, DecimalStyle::Fixed), "-16.67");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_amount(1440.0, DecimalStyle::Compact), "1440");
        assert_eq!(format_amount(-0.0, DecimalStyle::Compact), "0");
        assert_eq!(format_amount(-5.0, DecimalStyle::Compact), "-5");
        assert_eq!(format_amount(1319.999, DecimalStyle::Compact), "1320.00");
    }

    #[test]
    fn test_purchase_price_guard() {
        assert!(PurchasePrice::parse("900").is_some());
        assert!(PurchasePrice::parse("0").is_none());
        assert!(PurchasePrice::parse("-10").is_none());
        assert!(PurchasePrice::parse("").is_none());
        assert!(PurchasePrice::parse("abc").is_none());
        assert_eq!(PurchasePrice::parse("899.9").unwrap().to_string(), "899.90");
    }

    #[test]
    fn test_purchase_price_deserialize_validates() {
        let ok: PurchasePrice = serde_json::from_str("900.0").unwrap();
        assert_eq!(ok.value(), 900.0);
        assert!(serde_json::from_str::<PurchasePrice>("0.0").is_err());
    }
}
