//! # Margin-Scheme VAT Converter
//!
//! Conversions for goods sold under "TVA sur marge": VAT is only due on the
//! gross margin, and the gross margin is treated as a tax-inclusive amount.
//!
//! ## Breakdown of a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase 900                          sell price 1200                  │
//! │  ├──────────────────────────────────────────┤                           │
//! │                          gross margin  = 1200 − 900      = 300.00       │
//! │                          VAT due       = 300 / 1.2 × 0.2 =  50.00       │
//! │                          net margin    = 300 − 50        = 250.00       │
//! │                          margin %      = 250 / 900 × 100 =  27.78       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Inverse Path
//! Going from a margin percent back to a sell price estimates the VAT as
//! `net × VAT_RATE` and adds it on top. Catalog prices were computed this
//! way, and the formula is kept exactly as is so recomputed prices match the
//! stored ones.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::PurchasePrice;
use crate::VAT_RATE;

/// Full breakdown of a margin-scheme sale at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarginVatAmounts {
    pub sell_price: f64,
    /// Sell price minus purchase price.
    pub gross_margin: f64,
    /// VAT owed on the gross margin.
    pub vat_due: f64,
    /// What the shop keeps.
    pub net_margin: f64,
    pub margin_percent: f64,
}

/// VAT contained in a tax-inclusive gross margin.
#[inline]
pub fn vat_due(gross_margin: f64) -> f64 {
    gross_margin / (1.0 + VAT_RATE) * VAT_RATE
}

/// Breaks a sell price down into margins.
///
/// ## Example
/// ```rust
/// use pricebook_core::amount::PurchasePrice;
/// use pricebook_core::margin_vat::from_sell_price;
///
/// let purchase = PurchasePrice::new(900.0).unwrap();
/// let sale = from_sell_price(1200.0, purchase);
/// assert!((sale.vat_due - 50.0).abs() < 1e-9);
/// assert!((sale.net_margin - 250.0).abs() < 1e-9);
/// ```
pub fn from_sell_price(sell_price: f64, purchase: PurchasePrice) -> MarginVatAmounts {
    let gross_margin = sell_price - purchase.value();
    let vat_due = vat_due(gross_margin);
    let net_margin = gross_margin - vat_due;
    MarginVatAmounts {
        sell_price,
        gross_margin,
        vat_due,
        net_margin,
        margin_percent: net_margin / purchase.value() * 100.0,
    }
}

/// Rebuilds a sell price from a net margin percentage.
///
/// The VAT is estimated on the net margin (see module docs).
pub fn from_margin_percent(margin_percent: f64, purchase: PurchasePrice) -> MarginVatAmounts {
    let net_margin = purchase.value() * margin_percent / 100.0;
    let vat_estimated = net_margin * VAT_RATE;
    let gross_margin = net_margin + vat_estimated;
    MarginVatAmounts {
        sell_price: purchase.value() + gross_margin,
        gross_margin,
        vat_due: vat_estimated,
        net_margin,
        margin_percent,
    }
}

/// Rebuilds a sell price from a net margin amount.
pub fn from_net_margin(net_margin: f64, purchase: PurchasePrice) -> MarginVatAmounts {
    let gross_margin = net_margin * (1.0 + VAT_RATE);
    MarginVatAmounts {
        sell_price: purchase.value() + gross_margin,
        gross_margin,
        vat_due: gross_margin - net_margin,
        net_margin,
        margin_percent: net_margin / purchase.value() * 100.0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
