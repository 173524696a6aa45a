//! # Stored Price Summary
//!
//! Margin figures and labels for products that are already saved, where
//! only the purchase price and the stored price are known.
//!
//! ```text
//!   regime   stored price   shown to customer    label
//!   ──────   ────────────   ─────────────────    ─────────────────────────────
//!   normal   HT             HT × 1.2 (TTC)       "1200.00 € HT / 1440.00 € TTC"
//!   margin   sell price     sell price           "1200.00 € TVM"
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::{format_amount, DecimalStyle};
use crate::margin::MarginClass;
use crate::normal_vat::ttc_from_ht;
use crate::types::VatRegime;
use crate::VAT_RATE;

/// Margin of a stored price over its purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    /// Margin in currency. After VAT under the margin scheme.
    pub cash: f64,
    pub percent: f64,
    pub class: MarginClass,
}

impl MarginSummary {
    /// Computes the margin of a stored price.
    ///
    /// Returns `None` when the purchase price is not strictly positive.
    ///
    /// ## Example
    /// ```rust
    /// use pricebook_core::margin::MarginClass;
    /// use pricebook_core::summary::MarginSummary;
    /// use pricebook_core::types::VatRegime;
    ///
    /// let summary = MarginSummary::for_stored_price(VatRegime::Margin, 900.0, 1200.0).unwrap();
    /// assert!((summary.cash - 250.0).abs() < 1e-9);
    /// assert_eq!(summary.class, MarginClass::High);
    ///
    /// assert!(MarginSummary::for_stored_price(VatRegime::Normal, 0.0, 10.0).is_none());
    /// ```
    pub fn for_stored_price(regime: VatRegime, purchase: f64, price: f64) -> Option<Self> {
        if purchase.is_nan() || purchase <= 0.0 {
            return None;
        }

        let cash = match regime {
            VatRegime::Normal => price - purchase,
            VatRegime::Margin => (price - purchase) / (1.0 + VAT_RATE),
        };
        let percent = cash * 100.0 / purchase;

        Some(MarginSummary {
            cash,
            percent,
            class: MarginClass::classify(percent),
        })
    }
}

/// Label describing a stored price and the tax it carries.
///
/// ## Example
/// ```rust
/// use pricebook_core::summary::price_label;
/// use pricebook_core::types::VatRegime;
///
/// assert_eq!(price_label(VatRegime::Normal, 1200.0, "€"), "1200.00 € HT / 1440.00 € TTC");
/// assert_eq!(price_label(VatRegime::Margin, 1200.0, "€"), "1200.00 € TVM");
/// ```
pub fn price_label(regime: VatRegime, price: f64, symbol: &str) -> String {
    let fixed = |value: f64| format_amount(value, DecimalStyle::Fixed);
    match regime {
        VatRegime::Normal => format!(
            "{} {symbol} HT / {} {symbol} TTC",
            fixed(price),
            fixed(ttc_from_ht(price))
        ),
        VatRegime::Margin => format!("{} {symbol} TVM", fixed(price)),
    }
}

/// The price a customer pays, as list views show it.
pub fn list_price(regime: VatRegime, price: f64, symbol: &str, style: DecimalStyle) -> String {
    let shown = match regime {
        VatRegime::Normal => ttc_from_ht(price),
        VatRegime::Margin => price,
    };
    format!("{} {symbol}", format_amount(shown, style))
}
