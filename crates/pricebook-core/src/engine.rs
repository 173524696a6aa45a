//! # Price Engine
//!
//! The single entry point the product forms call whenever one of the three
//! linked price inputs changes.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types "1200" into the retail HT input                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PriceEngine::edit(tier, purchase = "900", Price, "1200")               │
//! │       │                                                                 │
//! │       ├── purchase unusable or "1200" unreadable?                       │
//! │       │        └──► store "1200" as typed, leave the other two alone    │
//! │       │                                                                 │
//! │       └── regime picks the converter                                    │
//! │                Normal ──► normal_vat::from_ht                           │
//! │                Margin ──► margin_vat::from_sell_price                   │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │       edited input kept verbatim, the other two as "0.00" strings       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Pure: same inputs, same output, no hidden state
//! - Never fails: bad input degrades to "store as typed"
//! - Idempotent: re-applying an edit changes nothing

use serde::Serialize;
use ts_rs::TS;

use crate::amount::{format_amount, parse_decimal, DecimalStyle, PurchasePrice};
use crate::error::{CoreError, CoreResult};
use crate::margin_vat::{self, MarginVatAmounts};
use crate::normal_vat::{self, NormalVatAmounts};
use crate::types::{
    MarginVatPrice, NormalVatPrice, PriceField, PriceTier, RegimeOwner, TierPrice, VatRegime,
};
use crate::validation::ensure_regime_editable;

// =============================================================================
// Price Engine
// =============================================================================

/// Stateless price/margin conversions over form inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceEngine;

impl PriceEngine {
    /// Applies one edit to a tier and returns the recomputed tier.
    ///
    /// ## Arguments
    /// * `current` - The tier as the form shows it now
    /// * `purchase` - Purchase price input text
    /// * `field` - Which input was edited
    /// * `value` - The text now in that input
    ///
    /// ## Returns
    /// The edited input holds `value` verbatim. The other two are recomputed
    /// and formatted with 2 decimals, unless the purchase price or `value`
    /// cannot be used, in which case they keep their previous text. A field
    /// that the tier's regime does not show leaves the tier untouched.
    ///
    /// ## Example
    /// ```rust
    /// use pricebook_core::engine::PriceEngine;
    /// use pricebook_core::types::{PriceField, TierPrice, VatRegime};
    ///
    /// let tier = TierPrice::empty(VatRegime::Normal);
    /// let tier = PriceEngine::edit(&tier, "900", PriceField::Price, "1200");
    ///
    /// assert_eq!(tier.price(), "1200");
    /// assert_eq!(tier.margin_percent(), "33.33");
    /// assert_eq!(tier.companion(), "1440.00");
    /// ```
    pub fn edit(current: &TierPrice, purchase: &str, field: PriceField, value: &str) -> TierPrice {
        let regime = current.regime();
        if !field.applies_to(regime) {
            return current.clone();
        }

        let recomputed = PurchasePrice::parse(purchase)
            .zip(parse_decimal(value))
            .and_then(|(purchase, input)| Self::convert(regime, field, input, purchase));

        match recomputed {
            Some(tier) => tier.with_field(field, value),
            None => current.with_field(field, value),
        }
    }

    /// Re-expresses a tier under another regime.
    ///
    /// The purchase price is held fixed and the populated price (HT or sell
    /// price) is carried over and run through the new regime's price path.
    /// A tier without a price comes back empty.
    ///
    /// ## Example
    /// ```rust
    /// use pricebook_core::engine::PriceEngine;
    /// use pricebook_core::types::{PriceField, TierPrice, VatRegime};
    ///
    /// let empty = TierPrice::empty(VatRegime::Normal);
    /// let normal = PriceEngine::edit(&empty, "900", PriceField::Price, "1200");
    /// let margin = PriceEngine::switch_regime(&normal, VatRegime::Margin, "900");
    ///
    /// assert_eq!(margin.price(), "1200");
    /// assert_eq!(margin.margin_percent(), "27.78");
    /// assert_eq!(margin.companion(), "250.00");
    /// ```
    pub fn switch_regime(current: &TierPrice, regime: VatRegime, purchase: &str) -> TierPrice {
        if current.regime() == regime {
            return current.clone();
        }

        let price = current.price();
        let carried = TierPrice::empty(regime);
        if price.is_empty() {
            return carried;
        }

        let carried = carried.with_field(PriceField::Price, price);
        Self::edit(&carried, purchase, PriceField::Price, price)
    }

    /// Re-derives a tier after the purchase price changed.
    ///
    /// The first populated input wins, in order: price, margin percent,
    /// then TTC / net margin. Nothing happens if the purchase price cannot
    /// be used.
    pub fn reprice(current: &TierPrice, purchase: &str) -> TierPrice {
        if PurchasePrice::parse(purchase).is_none() {
            return current.clone();
        }

        [
            PriceField::Price,
            PriceField::MarginPercent,
            current.companion_field(),
        ]
        .into_iter()
        .find_map(|field| {
            current
                .field(field)
                .filter(|text| !text.is_empty())
                .map(|text| Self::edit(current, purchase, field, text))
        })
        .unwrap_or_else(|| current.clone())
    }

    fn convert(
        regime: VatRegime,
        field: PriceField,
        input: f64,
        purchase: PurchasePrice,
    ) -> Option<TierPrice> {
        let tier = match (regime, field) {
            (VatRegime::Normal, PriceField::Price) => {
                normal_tier(normal_vat::from_ht(input, purchase))
            }
            (VatRegime::Normal, PriceField::MarginPercent) => {
                normal_tier(normal_vat::from_margin(input, purchase))
            }
            (VatRegime::Normal, PriceField::Ttc) => {
                normal_tier(normal_vat::from_ttc(input, purchase))
            }
            (VatRegime::Margin, PriceField::Price) => {
                margin_tier(margin_vat::from_sell_price(input, purchase))
            }
            (VatRegime::Margin, PriceField::MarginPercent) => {
                margin_tier(margin_vat::from_margin_percent(input, purchase))
            }
            (VatRegime::Margin, PriceField::NetMargin) => {
                margin_tier(margin_vat::from_net_margin(input, purchase))
            }
            _ => return None,
        };
        Some(tier)
    }
}

fn fixed(value: f64) -> String {
    format_amount(value, DecimalStyle::Fixed)
}

fn normal_tier(amounts: NormalVatAmounts) -> TierPrice {
    TierPrice::Normal(NormalVatPrice {
        ht: fixed(amounts.ht),
        margin_percent: fixed(amounts.margin_percent),
        ttc: fixed(amounts.ttc),
    })
}

fn margin_tier(amounts: MarginVatAmounts) -> TierPrice {
    TierPrice::Margin(MarginVatPrice {
        sell_price: fixed(amounts.sell_price),
        margin_percent: fixed(amounts.margin_percent),
        net_margin: fixed(amounts.net_margin),
    })
}

// =============================================================================
// Pricing Form
// =============================================================================

/// Everything a product form owns about prices.
///
/// Both tiers always share the form's regime and purchase price; every
/// mutation goes through [`PriceEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingForm {
    regime: VatRegime,
    purchase_price: String,
    retail: TierPrice,
    pro: TierPrice,
}

impl PricingForm {
    /// A blank form under the given regime.
    pub fn new(regime: VatRegime) -> Self {
        PricingForm {
            regime,
            purchase_price: String::new(),
            retail: TierPrice::empty(regime),
            pro: TierPrice::empty(regime),
        }
    }

    /// A form opened on a saved product.
    ///
    /// Stored prices land in the price inputs and the other fields are
    /// derived from them.
    pub fn from_stored(
        regime: VatRegime,
        purchase_price: &str,
        retail_price: &str,
        pro_price: &str,
    ) -> Self {
        let mut form = PricingForm::new(regime);
        form.purchase_price = purchase_price.to_string();
        form.retail =
            PriceEngine::edit(&form.retail, purchase_price, PriceField::Price, retail_price);
        form.pro = PriceEngine::edit(&form.pro, purchase_price, PriceField::Price, pro_price);
        form
    }

    #[inline]
    pub fn regime(&self) -> VatRegime {
        self.regime
    }

    #[inline]
    pub fn purchase_price(&self) -> &str {
        &self.purchase_price
    }

    /// Returns one tier's inputs.
    pub fn tier(&self, tier: PriceTier) -> &TierPrice {
        match tier {
            PriceTier::Retail => &self.retail,
            PriceTier::Pro => &self.pro,
        }
    }

    fn tier_mut(&mut self, tier: PriceTier) -> &mut TierPrice {
        match tier {
            PriceTier::Retail => &mut self.retail,
            PriceTier::Pro => &mut self.pro,
        }
    }

    /// Applies an edit to one tier.
    ///
    /// ## Errors
    /// `FieldNotInRegime` if the field is not shown under the form's regime
    /// (e.g. TTC while selling under the margin scheme).
    pub fn edit(
        &mut self,
        tier: PriceTier,
        field: PriceField,
        value: &str,
    ) -> CoreResult<&TierPrice> {
        if !field.applies_to(self.regime) {
            return Err(CoreError::FieldNotInRegime {
                field,
                regime: self.regime,
            });
        }

        let purchase = self.purchase_price.clone();
        let slot = self.tier_mut(tier);
        *slot = PriceEngine::edit(slot, &purchase, field, value);
        Ok(&*slot)
    }

    /// Stores the purchase price input and re-derives both tiers.
    pub fn set_purchase_price(&mut self, value: &str) {
        self.purchase_price = value.to_string();
        self.retail = PriceEngine::reprice(&self.retail, value);
        self.pro = PriceEngine::reprice(&self.pro, value);
    }

    /// Moves the form to another regime, if the owner still allows it.
    ///
    /// ## Errors
    /// `RegimeLocked` once serial-numbered items pin the current regime.
    pub fn switch_regime(&mut self, regime: VatRegime, owner: &RegimeOwner) -> CoreResult<()> {
        ensure_regime_editable(owner, Some(self.regime), regime)?;

        self.retail = PriceEngine::switch_regime(&self.retail, regime, &self.purchase_price);
        self.pro = PriceEngine::switch_regime(&self.pro, regime, &self.purchase_price);
        self.regime = regime;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
