//! # Pricing Commands
//!
//! Commands driving the pricing form and the stored-price helpers.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pricing Form Lifecycle                               │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Blank   │────►│ Purchase │────►│  Tiers   │────►│ Submitted│        │
//! │  │  Form    │     │  Price   │     │  Priced  │     │  Prices  │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │       ▲                │                 │                              │
//! │       │        set_purchase_price   edit_price        submit_form       │
//! │       │                             switch_regime                       │
//! │       │                                                                 │
//! │   reset_form ◄──────────────────────────────────────────                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pricebook_core::amount::parse_decimal;
use pricebook_core::summary::{list_price, price_label};
use pricebook_core::validation::validate_form;
use pricebook_core::{
    MarginClass, MarginSummary, PriceField, PriceTier, ProductPrices, RegimeOwner, TierPrice,
    VatRegime,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{DeskConfig, FormSession, FormState};

// =============================================================================
// DTOs
// =============================================================================

/// One tier as the form host renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierView {
    #[serde(flatten)]
    pub price: TierPrice,

    /// Colour class of the margin input, when it holds a number.
    pub margin_class: Option<MarginClass>,
}

impl From<&TierPrice> for TierView {
    fn from(tier: &TierPrice) -> Self {
        TierView {
            price: tier.clone(),
            margin_class: parse_decimal(tier.margin_percent()).map(MarginClass::classify),
        }
    }
}

/// The whole form, returned by every form command.
///
/// ## Serialization
/// ```json
/// {
///   "regime": "normal",
///   "purchasePrice": "900",
///   "regimeLocked": false,
///   "retail": { "regime": "normal", "ht": "1200", "marginPercent": "33.33",
///               "ttc": "1440.00", "marginClass": "high" },
///   "pro": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub regime: VatRegime,
    pub purchase_price: String,
    pub regime_locked: bool,
    pub retail: TierView,
    pub pro: TierView,
}

impl From<&FormSession> for FormView {
    fn from(session: &FormSession) -> Self {
        let form = &session.form;
        FormView {
            regime: form.regime(),
            purchase_price: form.purchase_price().to_string(),
            regime_locked: session.owner.regime_locked(),
            retail: TierView::from(form.tier(PriceTier::Retail)),
            pro: TierView::from(form.tier(PriceTier::Pro)),
        }
    }
}

/// A margin class and its flag colour.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginClassView {
    pub class: MarginClass,
    pub flag: &'static str,
}

/// Margin and labels of a stored product price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummaryView {
    /// Missing when the purchase price is not positive.
    pub summary: Option<MarginSummary>,
    pub label: String,
    pub list_price: String,
}

// =============================================================================
// Form Commands
// =============================================================================

/// Gets the current form.
pub fn get_form(form: &FormState) -> FormView {
    debug!("get_form command");
    form.with_session(|session| FormView::from(session))
}

/// Replaces the form with a blank one.
///
/// ## Arguments
/// * `regime` - Regime of the new form (default: configured default regime)
pub fn reset_form(form: &FormState, config: &DeskConfig, regime: Option<VatRegime>) -> FormView {
    let regime = regime.unwrap_or(config.session.default_regime);
    debug!(regime = %regime, "reset_form command");

    form.with_session_mut(|session| {
        *session = FormSession::new(regime);
        FormView::from(&*session)
    })
}

/// Stores the purchase price input and re-derives both tiers.
pub fn set_purchase_price(form: &FormState, value: &str) -> FormView {
    debug!(value = %value, "set_purchase_price command");

    form.with_session_mut(|session| {
        session.form.set_purchase_price(value);
        FormView::from(&*session)
    })
}

/// Applies one keystroke-level edit to a tier.
///
/// ## Errors
/// `BAD_REQUEST` when the field does not exist under the form's regime.
pub fn edit_price(
    form: &FormState,
    tier: PriceTier,
    field: PriceField,
    value: &str,
) -> Result<FormView, ApiError> {
    debug!(tier = %tier, field = %field, value = %value, "edit_price command");

    form.with_session_mut(|session| -> Result<FormView, ApiError> {
        session.form.edit(tier, field, value)?;
        Ok(FormView::from(&*session))
    })
}

/// Moves the form to another regime.
///
/// ## Errors
/// `BUSINESS_LOGIC` once serial-numbered items pin the regime.
pub fn switch_regime(form: &FormState, regime: VatRegime) -> Result<FormView, ApiError> {
    debug!(regime = %regime, "switch_regime command");

    form.with_session_mut(|session| -> Result<FormView, ApiError> {
        let owner = session.owner;
        session.form.switch_regime(regime, &owner)?;
        Ok(FormView::from(&*session))
    })
}

/// Records how many serial-numbered items hang under the product.
pub fn set_serial_items(form: &FormState, count: usize) -> FormView {
    debug!(count, "set_serial_items command");

    form.with_session_mut(|session| {
        session.owner = RegimeOwner::Parent {
            serial_items: count,
        };
        FormView::from(&*session)
    })
}

/// Validates the form and returns what would be persisted.
pub fn submit_form(form: &FormState) -> Result<ProductPrices, ApiError> {
    debug!("submit_form command");

    let prices = form.with_session(|session| validate_form(&session.form))?;
    Ok(prices)
}

// =============================================================================
// Stored Price Commands
// =============================================================================

/// Classifies a margin percentage.
pub fn classify_margin(margin_percent: f64) -> MarginClassView {
    debug!(margin_percent, "classify_margin command");

    let class = MarginClass::classify(margin_percent);
    MarginClassView {
        class,
        flag: class.flag(),
    }
}

/// Summarizes a stored price for list views.
pub fn summarize_price(
    config: &DeskConfig,
    regime: VatRegime,
    purchase_price: f64,
    price: f64,
) -> PriceSummaryView {
    debug!(regime = %regime, purchase_price, price, "summarize_price command");

    let symbol = &config.display.currency_symbol;
    PriceSummaryView {
        summary: MarginSummary::for_stored_price(regime, purchase_price, price),
        label: price_label(regime, price, symbol),
        list_price: list_price(regime, price, symbol, config.display.price_style),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pricebook_core::DecimalStyle;

    fn priced_form() -> FormState {
        let form = FormState::new(VatRegime::Normal);
        set_purchase_price(&form, "900");
        edit_price(&form, PriceTier::Retail, PriceField::Price, "1200").unwrap();
        edit_price(&form, PriceTier::Pro, PriceField::Price, "990").unwrap();
        form
    }

    #[test]
    fn test_edit_returns_recomputed_form() {
        let view = get_form(&priced_form());

        assert_eq!(view.retail.price.margin_percent(), "33.33");
        assert_eq!(view.retail.price.companion(), "1440.00");
        assert_eq!(view.retail.margin_class, Some(MarginClass::High));
        assert_eq!(view.pro.price.margin_percent(), "10.00");
        assert_eq!(view.pro.margin_class, Some(MarginClass::Medium));
    }

    #[test]
    fn test_blank_margin_has_no_class() {
        let form = FormState::new(VatRegime::Margin);
        let view = get_form(&form);
        assert_eq!(view.retail.margin_class, None);
    }

    #[test]
    fn test_form_view_serialization() {
        let json = serde_json::to_value(get_form(&priced_form())).unwrap();
        assert_eq!(json["regime"], "normal");
        assert_eq!(json["purchasePrice"], "900");
        assert_eq!(json["regimeLocked"], false);
        assert_eq!(json["retail"]["regime"], "normal");
        assert_eq!(json["retail"]["ht"], "1200");
        assert_eq!(json["retail"]["marginClass"], "high");
    }

    #[test]
    fn test_edit_foreign_field_is_bad_request() {
        let form = FormState::new(VatRegime::Normal);
        let err = edit_price(&form, PriceTier::Retail, PriceField::NetMargin, "5").unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_switch_regime_then_lock() {
        let form = priced_form();
        let view = switch_regime(&form, VatRegime::Margin).unwrap();
        assert_eq!(view.retail.price.margin_percent(), "27.78");
        assert_eq!(view.retail.price.companion(), "250.00");

        let view = set_serial_items(&form, 2);
        assert!(view.regime_locked);

        let err = switch_regime(&form, VatRegime::Normal).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(get_form(&form).regime, VatRegime::Margin);

        // Re-selecting the current regime is always fine
        assert!(switch_regime(&form, VatRegime::Margin).is_ok());
    }

    #[test]
    fn test_reset_form_uses_configured_default() {
        let form = priced_form();
        set_serial_items(&form, 1);

        let mut config = DeskConfig::default();
        config.session.default_regime = VatRegime::Margin;

        let view = reset_form(&form, &config, None);
        assert_eq!(view.regime, VatRegime::Margin);
        assert!(!view.regime_locked);
        assert_eq!(view.purchase_price, "");

        let view = reset_form(&form, &config, Some(VatRegime::Normal));
        assert_eq!(view.regime, VatRegime::Normal);
    }

    #[test]
    fn test_submit_form() {
        let prices = submit_form(&priced_form()).unwrap();
        assert_eq!(prices.purchase_price, 900.0);
        assert_eq!(prices.retail_price, 1200.0);
        assert_eq!(prices.pro_price, 990.0);

        let err = submit_form(&FormState::new(VatRegime::Normal)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "purchase price is required");
    }

    #[test]
    fn test_classify_margin() {
        let view = classify_margin(12.0);
        assert_eq!(view.class, MarginClass::Medium);
        assert_eq!(view.flag, "amber");
    }

    #[test]
    fn test_summarize_price() {
        let mut config = DeskConfig::default();
        config.display.price_style = DecimalStyle::Compact;

        let view = summarize_price(&config, VatRegime::Normal, 900.0, 1200.0);
        assert_eq!(view.label, "1200.00 € HT / 1440.00 € TTC");
        assert_eq!(view.list_price, "1440 €");
        assert_eq!(view.summary.map(|s| s.class), Some(MarginClass::High));

        let view = summarize_price(&config, VatRegime::Margin, 0.0, 50.0);
        assert!(view.summary.is_none());
        assert_eq!(view.label, "50.00 € TVM");
    }
}
