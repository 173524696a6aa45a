//! # Validation Module
//!
//! Submit-time checks for pricing forms, and the VAT regime lock.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      When Input Gets Checked                            │
//! │                                                                         │
//! │  While typing (engine)                                                  │
//! │  ├── Nothing is rejected                                                │
//! │  └── Unreadable text simply skips the recomputation                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  On submit (THIS MODULE)                                                │
//! │  ├── Purchase price: required, numeric, > 0                             │
//! │  └── Retail / pro price: required, numeric, >= 0                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ProductPrices handed to the catalog                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricebook_core::engine::PricingForm;
//! use pricebook_core::types::VatRegime;
//! use pricebook_core::validation::validate_form;
//!
//! let form = PricingForm::from_stored(VatRegime::Margin, "900", "1200", "1100");
//! let prices = validate_form(&form).unwrap();
//! assert_eq!(prices.retail_price, 1200.0);
//! ```

use crate::amount::{parse_decimal, PurchasePrice};
use crate::engine::PricingForm;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{PriceTier, ProductPrices, RegimeOwner, VatRegime};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the purchase price input.
///
/// ## Rules
/// - Must not be empty
/// - Must read as a number
/// - Must be strictly positive (it divides every margin)
///
/// ## Example
/// ```rust
/// use pricebook_core::validation::validate_purchase_price;
///
/// assert_eq!(validate_purchase_price("900").unwrap().value(), 900.0);
/// assert!(validate_purchase_price("").is_err());
/// assert!(validate_purchase_price("0").is_err());
/// ```
pub fn validate_purchase_price(input: &str) -> ValidationResult<PurchasePrice> {
    let value = required_number("purchase price", input)?;

    PurchasePrice::new(value).ok_or_else(|| ValidationError::MustBePositive {
        field: "purchase price".to_string(),
    })
}

/// Validates a price that is about to be stored.
///
/// ## Rules
/// - Must not be empty
/// - Must read as a number
/// - Must be non-negative (zero is a giveaway, not an error)
pub fn validate_stored_price(field: &str, input: &str) -> ValidationResult<f64> {
    let value = required_number(field, input)?;

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

fn required_number(field: &str, input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    parse_decimal(trimmed).ok_or_else(|| ValidationError::NotANumber {
        field: field.to_string(),
        value: trimmed.to_string(),
    })
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a whole pricing form and extracts what gets persisted.
///
/// The stored price of a tier is its price input: HT under normal VAT, the
/// sell price under the margin scheme.
pub fn validate_form(form: &PricingForm) -> ValidationResult<ProductPrices> {
    let purchase = validate_purchase_price(form.purchase_price())?;
    let retail_price = validate_stored_price("retail price", form.tier(PriceTier::Retail).price())?;
    let pro_price = validate_stored_price("pro price", form.tier(PriceTier::Pro).price())?;

    Ok(ProductPrices {
        regime: form.regime(),
        purchase_price: purchase.value(),
        retail_price,
        pro_price,
    })
}

// =============================================================================
// Regime Lock
// =============================================================================

/// Checks whether the VAT regime may move from `current` to `requested`.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  first selection (current = None)        ──► always allowed            │
/// │  same regime again                       ──► always allowed            │
/// │  parent product with serial items > 0    ──► RegimeLocked               │
/// │  serial item already created             ──► RegimeLocked               │
/// │  anything else                           ──► allowed                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use pricebook_core::types::{RegimeOwner, VatRegime};
/// use pricebook_core::validation::ensure_regime_editable;
///
/// let owner = RegimeOwner::Parent { serial_items: 2 };
/// assert!(ensure_regime_editable(&owner, Some(VatRegime::Normal), VatRegime::Normal).is_ok());
/// assert!(ensure_regime_editable(&owner, Some(VatRegime::Normal), VatRegime::Margin).is_err());
/// ```
pub fn ensure_regime_editable(
    owner: &RegimeOwner,
    current: Option<VatRegime>,
    requested: VatRegime,
) -> CoreResult<()> {
    match current {
        Some(current) if current != requested && owner.regime_locked() => {
            Err(CoreError::RegimeLocked { current, requested })
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceField;

    #[test]
    fn test_validate_purchase_price() {
        assert_eq!(validate_purchase_price(" 899.90 ").unwrap().value(), 899.9);

        assert!(matches!(
            validate_purchase_price(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_purchase_price("abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            validate_purchase_price("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_purchase_price("-12"),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_stored_price() {
        assert_eq!(validate_stored_price("retail price", "1200").unwrap(), 1200.0);
        assert_eq!(validate_stored_price("retail price", "0").unwrap(), 0.0);

        let err = validate_stored_price("pro price", "   ").unwrap_err();
        assert_eq!(err.to_string(), "pro price is required");

        let err = validate_stored_price("pro price", "-1").unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
        assert_eq!(err.to_string(), "pro price must not be negative");
    }

    #[test]
    fn test_validate_form_extracts_prices() {
        let form = PricingForm::from_stored(VatRegime::Normal, "900", "1200", "1100");
        let prices = validate_form(&form).unwrap();

        assert_eq!(prices.regime, VatRegime::Normal);
        assert_eq!(prices.purchase_price, 900.0);
        assert_eq!(prices.retail_price, 1200.0);
        assert_eq!(prices.pro_price, 1100.0);
    }

    #[test]
    fn test_validate_form_uses_price_input_not_ttc() {
        let mut form = PricingForm::new(VatRegime::Normal);
        form.set_purchase_price("900");
        form.edit(PriceTier::Retail, PriceField::Ttc, "1440").unwrap();
        form.edit(PriceTier::Pro, PriceField::Price, "1000").unwrap();

        let prices = validate_form(&form).unwrap();
        assert_eq!(prices.retail_price, 1200.0);
    }

    #[test]
    fn test_validate_form_reports_missing_price() {
        let mut form = PricingForm::new(VatRegime::Margin);
        form.set_purchase_price("900");
        form.edit(PriceTier::Retail, PriceField::Price, "1200").unwrap();

        let err = validate_form(&form).unwrap_err();
        assert_eq!(err.to_string(), "pro price is required");
    }

    #[test]
    fn test_regime_lock_rules() {
        let free = RegimeOwner::Parent { serial_items: 0 };
        let parent = RegimeOwner::Parent { serial_items: 1 };
        let created = RegimeOwner::SerialItem { created: true };
        let draft = RegimeOwner::SerialItem { created: false };

        assert!(ensure_regime_editable(&free, Some(VatRegime::Normal), VatRegime::Margin).is_ok());
        assert!(ensure_regime_editable(&draft, Some(VatRegime::Margin), VatRegime::Normal).is_ok());
        assert!(ensure_regime_editable(&parent, None, VatRegime::Margin).is_ok());
        assert!(
            ensure_regime_editable(&created, Some(VatRegime::Margin), VatRegime::Margin).is_ok()
        );

        let err = ensure_regime_editable(&created, Some(VatRegime::Margin), VatRegime::Normal)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "VAT regime is locked to margin, cannot switch to normal"
        );
        assert!(
            ensure_regime_editable(&parent, Some(VatRegime::Normal), VatRegime::Margin).is_err()
        );
    }
}
