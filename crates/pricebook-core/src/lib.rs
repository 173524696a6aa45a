//! # pricebook-core: Price & Margin Engine
//!
//! This crate holds every price, margin and VAT computation behind the
//! product forms, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricebook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    Product Forms                                │    │
//! │  │    purchase price ──► retail tier ──► pro tier ──► submit       │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ JSON lines                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    pricebook-desk commands                      │    │
//! │  │    edit_price, switch_regime, submit_form, etc.                 │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ pricebook-core (THIS CRATE) ★                   │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │  amount   │  │normal_vat │  │  engine   │  │ validation│    │    │
//! │  │   │  parse    │  │margin_vat │  │PriceEngine│  │  submit   │    │    │
//! │  │   │  format   │  │  margin   │  │PricingForm│  │  lock     │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO LOGGING • NO STATE • PURE FUNCTIONS               │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Regimes, tiers, fields and the tagged tier prices
//! - [`amount`] - Lenient parsing, rounding, formatting, `PurchasePrice`
//! - [`normal_vat`] - HT / margin / TTC conversions
//! - [`margin_vat`] - Sell price / margin / net margin conversions
//! - [`margin`] - Low / medium / high margin classes
//! - [`engine`] - `PriceEngine` and `PricingForm`
//! - [`summary`] - Margin and labels for stored prices
//! - [`validation`] - Submit checks and the regime lock
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **Never Fail While Typing**: unreadable input only skips recomputation
//! 3. **Full Precision Inside**: values are rounded only when rendered
//! 4. **Explicit Errors**: submit and regime errors are typed
//!
//! ## Example Usage
//!
//! ```rust
//! use pricebook_core::{PriceEngine, PriceField, TierPrice, VatRegime};
//!
//! // Retail tier under normal VAT, bought at 900
//! let tier = TierPrice::empty(VatRegime::Normal);
//! let tier = PriceEngine::edit(&tier, "900", PriceField::Price, "1200");
//! assert_eq!(tier.margin_percent(), "33.33");
//! assert_eq!(tier.companion(), "1440.00");
//!
//! // Same price sold under the margin scheme
//! let tier = PriceEngine::switch_regime(&tier, VatRegime::Margin, "900");
//! assert_eq!(tier.margin_percent(), "27.78");
//! assert_eq!(tier.companion(), "250.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod engine;
pub mod error;
pub mod margin;
pub mod margin_vat;
pub mod normal_vat;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::{DecimalStyle, PurchasePrice};
pub use engine::{PriceEngine, PricingForm};
pub use error::{CoreError, CoreResult, ValidationError};
pub use margin::MarginClass;
pub use summary::MarginSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// French standard VAT rate.
///
/// Both regimes use it: on the full price under normal VAT, on the gross
/// margin under the margin scheme.
pub const VAT_RATE: f64 = 0.20;

/// Margins below this percentage are flagged red.
pub const LOW_MARGIN_PERCENT: f64 = 10.0;

/// Margins at or above this percentage are flagged green.
pub const HEALTHY_MARGIN_PERCENT: f64 = 16.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_factor_matches_literal() {
        assert_eq!(1.0 + VAT_RATE, 1.2);
    }
}
