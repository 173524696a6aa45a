//! # Normal VAT Converter
//!
//! Conversions between HT, margin percent and TTC when VAT is charged on
//! the full sale price.
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     margin% = (ht − purchase) / purchase × 100                          │
//! │     ht      = purchase × (1 + margin% / 100)                            │
//! │     ttc     = ht × (1 + VAT_RATE)                                       │
//! │     ht      = ttc / (1 + VAT_RATE)                                      │
//! │                                                                         │
//! │     purchase 900, ht 1200  ──►  margin 33.33 %, ttc 1440.00             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function returns the full triple, the edited value included, so
//! callers never have to stitch results together.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::PurchasePrice;
use crate::VAT_RATE;

/// A consistent HT / margin / TTC triple at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NormalVatAmounts {
    pub ht: f64,
    pub margin_percent: f64,
    pub ttc: f64,
}

/// Tax-inclusive price for a tax-exclusive one.
#[inline]
pub fn ttc_from_ht(ht: f64) -> f64 {
    ht * (1.0 + VAT_RATE)
}

/// Tax-exclusive price for a tax-inclusive one.
#[inline]
pub fn ht_from_ttc(ttc: f64) -> f64 {
    ttc / (1.0 + VAT_RATE)
}

/// Margin percentage of a selling price over the purchase price.
#[inline]
pub fn margin_percent(ht: f64, purchase: PurchasePrice) -> f64 {
    (ht - purchase.value()) / purchase.value() * 100.0
}

/// Derives margin and TTC from an HT price.
///
/// ## Example
/// ```rust
/// use pricebook_core::amount::PurchasePrice;
/// use pricebook_core::normal_vat::from_ht;
///
/// let purchase = PurchasePrice::new(900.0).unwrap();
/// let amounts = from_ht(1200.0, purchase);
/// assert!((amounts.margin_percent - 33.333).abs() < 0.001);
/// assert!((amounts.ttc - 1440.0).abs() < 1e-9);
/// ```
pub fn from_ht(ht: f64, purchase: PurchasePrice) -> NormalVatAmounts {
    NormalVatAmounts {
        ht,
        margin_percent: margin_percent(ht, purchase),
        ttc: ttc_from_ht(ht),
    }
}

/// Derives HT and TTC from a margin percentage.
pub fn from_margin(margin_percent: f64, purchase: PurchasePrice) -> NormalVatAmounts {
    let ht = purchase.value() * (1.0 + margin_percent / 100.0);
    NormalVatAmounts {
        ht,
        margin_percent,
        ttc: ttc_from_ht(ht),
    }
}

/// Derives HT and margin from a TTC price.
pub fn from_ttc(ttc: f64, purchase: PurchasePrice) -> NormalVatAmounts {
    let ht = ht_from_ttc(ttc);
    NormalVatAmounts {
        ht,
        margin_percent: margin_percent(ht, purchase),
        ttc,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::round_half_up;

    fn purchase(value: f64) -> PurchasePrice {
        PurchasePrice::new(value).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_from_ht_scenario() {
        let amounts = from_ht(1200.0, purchase(900.0));
        assert_eq!(round_half_up(amounts.margin_percent), 33.33);
        assert_eq!(round_half_up(amounts.ttc), 1440.0);
        assert_eq!(amounts.ht, 1200.0);
    }

    #[test]
    fn test_from_margin() {
        let amounts = from_margin(25.0, purchase(100.0));
        assert_close(amounts.ht, 125.0);
        assert_close(amounts.ttc, 150.0);
        assert_eq!(amounts.margin_percent, 25.0);
    }

    #[test]
    fn test_from_ttc() {
        let amounts = from_ttc(1440.0, purchase(900.0));
        assert_close(amounts.ht, 1200.0);
        assert_close(amounts.margin_percent, 33.33);
    }

    #[test]
    fn test_negative_margin_below_cost() {
        let amounts = from_ht(450.0, purchase(900.0));
        assert_close(amounts.margin_percent, -50.0);
    }

    #[test]
    fn test_ht_survives_ttc_round_trip() {
        for &p in &[0.5, 1.0, 19.99, 900.0, 12_345.67] {
            for &ht in &[0.0, 0.01, 1.0, 99.99, 1200.0, 5_000.5, 250_000.0] {
                let ttc = from_ht(ht, purchase(p)).ttc;
                assert_close(from_ttc(ttc, purchase(p)).ht, ht);
            }
        }
    }

    #[test]
    fn test_margin_survives_ht_round_trip() {
        for &p in &[0.5, 1.0, 19.99, 900.0, 12_345.67] {
            for &m in &[-100.0, -12.5, 0.0, 9.99, 16.0, 33.33, 250.0] {
                let ht = from_margin(m, purchase(p)).ht;
                assert_close(from_ht(ht, purchase(p)).margin_percent, m);
            }
        }
    }
}
