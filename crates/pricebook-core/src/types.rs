//! # Domain Types
//!
//! Core domain types shared by the converters, the engine and the forms.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │   VatRegime     │   │   PriceTier     │   │   PriceField    │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  Normal         │   │  Retail         │   │  Price          │        │
//! │  │  Margin         │   │  Pro            │   │  MarginPercent  │        │
//! │  └─────────────────┘   └─────────────────┘   │  Ttc (normal)   │        │
//! │                                              │  NetMargin (TVM)│        │
//! │                                              └─────────────────┘        │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │                         TierPrice                                │   │
//! │  │  Normal(NormalVatPrice { ht, margin_percent, ttc })              │   │
//! │  │  Margin(MarginVatPrice { sell_price, margin_percent, net_margin })│  │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Strings in TierPrice?
//! A tier price is the content of three text inputs. The user may be halfway
//! through typing `"12."`, and that text has to survive the round trip
//! through the engine untouched. Numbers only exist inside a conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// VAT Regime
// =============================================================================

/// The tax regime a product is sold under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum VatRegime {
    /// Standard regime: VAT on the full sale price ("TVA normale").
    Normal,
    /// Margin scheme: VAT on the gross margin only ("TVA sur marge").
    Margin,
}

impl VatRegime {
    /// Wire/config spelling of the regime.
    pub const fn as_str(&self) -> &'static str {
        match self {
            VatRegime::Normal => "normal",
            VatRegime::Margin => "margin",
        }
    }
}

/// Imports without a regime column are treated as normal VAT.
impl Default for VatRegime {
    fn default() -> Self {
        VatRegime::Normal
    }
}

impl fmt::Display for VatRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VatRegime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(VatRegime::Normal),
            "margin" => Ok(VatRegime::Margin),
            _ => Err(ValidationError::NotAllowed {
                field: "vat regime".to_string(),
                allowed: vec!["normal".to_string(), "margin".to_string()],
            }),
        }
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// The two price lists every product carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    /// Shop counter price ("prix de vente magasin").
    Retail,
    /// Trade customer price ("prix de vente pro").
    Pro,
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceTier::Retail => f.write_str("retail"),
            PriceTier::Pro => f.write_str("pro"),
        }
    }
}

// =============================================================================
// Price Field
// =============================================================================

/// Which of the three linked inputs the user just edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum PriceField {
    /// HT under normal VAT, sell price under the margin scheme.
    Price,
    /// Margin percentage over the purchase price.
    MarginPercent,
    /// Tax-inclusive price. Normal VAT only.
    Ttc,
    /// Net margin cash after VAT. Margin scheme only.
    NetMargin,
}

impl PriceField {
    /// Returns true if the field is shown under the given regime.
    pub const fn applies_to(&self, regime: VatRegime) -> bool {
        match self {
            PriceField::Price | PriceField::MarginPercent => true,
            PriceField::Ttc => matches!(regime, VatRegime::Normal),
            PriceField::NetMargin => matches!(regime, VatRegime::Margin),
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceField::Price => "price",
            PriceField::MarginPercent => "margin_percent",
            PriceField::Ttc => "ttc",
            PriceField::NetMargin => "net_margin",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Tier Prices
// =============================================================================

/// The three inputs of one tier under normal VAT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NormalVatPrice {
    /// Tax-exclusive price.
    pub ht: String,
    pub margin_percent: String,
    /// Tax-inclusive price.
    pub ttc: String,
}

/// The three inputs of one tier under the margin scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarginVatPrice {
    /// Gross sale price (VAT is only due on the margin part of it).
    pub sell_price: String,
    pub margin_percent: String,
    /// Margin left after the VAT on the gross margin is paid.
    pub net_margin: String,
}

/// One tier's inputs, shaped by the regime they are expressed in.
///
/// ## Serialization
/// ```json
/// { "regime": "normal", "ht": "1200", "marginPercent": "33.33", "ttc": "1440.00" }
/// { "regime": "margin", "sellPrice": "1200", "marginPercent": "27.78", "netMargin": "250.00" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "regime", rename_all = "lowercase")]
pub enum TierPrice {
    Normal(NormalVatPrice),
    Margin(MarginVatPrice),
}

impl TierPrice {
    /// An untouched tier for the given regime.
    pub fn empty(regime: VatRegime) -> Self {
        match regime {
            VatRegime::Normal => TierPrice::Normal(NormalVatPrice::default()),
            VatRegime::Margin => TierPrice::Margin(MarginVatPrice::default()),
        }
    }

    /// The regime this tier is expressed in.
    pub const fn regime(&self) -> VatRegime {
        match self {
            TierPrice::Normal(_) => VatRegime::Normal,
            TierPrice::Margin(_) => VatRegime::Margin,
        }
    }

    /// HT or sell price text, depending on the regime.
    pub fn price(&self) -> &str {
        match self {
            TierPrice::Normal(p) => &p.ht,
            TierPrice::Margin(p) => &p.sell_price,
        }
    }

    /// Margin percentage text.
    pub fn margin_percent(&self) -> &str {
        match self {
            TierPrice::Normal(p) => &p.margin_percent,
            TierPrice::Margin(p) => &p.margin_percent,
        }
    }

    /// The regime's third input: TTC or net margin.
    pub fn companion(&self) -> &str {
        match self {
            TierPrice::Normal(p) => &p.ttc,
            TierPrice::Margin(p) => &p.net_margin,
        }
    }

    /// The third input's field tag for this regime.
    pub const fn companion_field(&self) -> PriceField {
        match self {
            TierPrice::Normal(_) => PriceField::Ttc,
            TierPrice::Margin(_) => PriceField::NetMargin,
        }
    }

    /// Text of a field, or `None` if the regime does not show it.
    pub fn field(&self, field: PriceField) -> Option<&str> {
        match (self, field) {
            (_, PriceField::Price) => Some(self.price()),
            (_, PriceField::MarginPercent) => Some(self.margin_percent()),
            (TierPrice::Normal(p), PriceField::Ttc) => Some(&p.ttc),
            (TierPrice::Margin(p), PriceField::NetMargin) => Some(&p.net_margin),
            _ => None,
        }
    }

    /// Returns a copy with one field replaced verbatim.
    ///
    /// Fields the regime does not show are ignored.
    pub fn with_field(&self, field: PriceField, value: &str) -> Self {
        let mut next = self.clone();
        let value = value.to_string();
        match (&mut next, field) {
            (TierPrice::Normal(p), PriceField::Price) => p.ht = value,
            (TierPrice::Normal(p), PriceField::MarginPercent) => p.margin_percent = value,
            (TierPrice::Normal(p), PriceField::Ttc) => p.ttc = value,
            (TierPrice::Margin(p), PriceField::Price) => p.sell_price = value,
            (TierPrice::Margin(p), PriceField::MarginPercent) => p.margin_percent = value,
            (TierPrice::Margin(p), PriceField::NetMargin) => p.net_margin = value,
            _ => {}
        }
        next
    }

    /// Checks if all three inputs are blank.
    pub fn is_empty(&self) -> bool {
        self.price().is_empty() && self.margin_percent().is_empty() && self.companion().is_empty()
    }
}

// =============================================================================
// Regime Owner
// =============================================================================

/// Who carries the regime being edited, which decides whether it may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RegimeOwner {
    /// A catalog product that serial-numbered items hang under.
    Parent {
        #[serde(rename = "serialItems")]
        serial_items: usize,
    },
    /// A single serial-numbered item.
    SerialItem { created: bool },
}

impl RegimeOwner {
    /// Checks if the regime is frozen.
    pub const fn regime_locked(&self) -> bool {
        match self {
            RegimeOwner::Parent { serial_items } => *serial_items > 0,
            RegimeOwner::SerialItem { created } => *created,
        }
    }
}

impl Default for RegimeOwner {
    fn default() -> Self {
        RegimeOwner::Parent { serial_items: 0 }
    }
}

// =============================================================================
// Product Prices
// =============================================================================

/// The numbers the catalog persists once a form passes validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductPrices {
    pub regime: VatRegime,
    /// Purchase price including fees.
    pub purchase_price: f64,
    /// HT under normal VAT, sell price under the margin scheme.
    pub retail_price: f64,
    /// HT under normal VAT, sell price under the margin scheme.
    pub pro_price: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
