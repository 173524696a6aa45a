//! # Error Types
//!
//! Domain-specific error types for pricebook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricebook-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations (regime lock, ...)     │
//! │  └── ValidationError  - Submit-time input failures                      │
//! │                                                                         │
//! │  pricebook-desk errors (app)                                            │
//! │  └── ApiError         - What the form host sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Form                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Does NOT Error
//! The conversion paths (`normal_vat`, `margin_vat`, `engine`) never fail.
//! Bad keystrokes are stored as typed and the derived fields stay put, so
//! the user can keep typing. Errors only surface when the form is submitted
//! or when a business rule blocks an action outright.

use thiserror::Error;

use crate::types::{PriceField, VatRegime};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The VAT regime can no longer be changed.
    ///
    /// ## When This Occurs
    /// - The parent product already has serial-numbered items
    /// - The serial-numbered item itself has been created
    ///
    /// ## User Workflow
    /// ```text
    /// Parent product (TVA normale, 2 serial items)
    ///      │
    ///      ▼
    /// User clicks "TVA sur marge"
    ///      │
    ///      ▼
    /// RegimeLocked { current: Normal, requested: Margin }
    ///      │
    ///      ▼
    /// UI keeps the selector on "TVA normale"
    /// ```
    #[error("VAT regime is locked to {current}, cannot switch to {requested}")]
    RegimeLocked {
        current: VatRegime,
        requested: VatRegime,
    },

    /// An edit targeted a field that the active regime does not show.
    #[error("Field {field} does not exist under {regime} VAT")]
    FieldNotInRegime { field: PriceField, regime: VatRegime },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised when a form is submitted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value could not be read as a decimal number.
    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: String, value: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RegimeLocked {
            current: VatRegime::Normal,
            requested: VatRegime::Margin,
        };
        assert_eq!(
            err.to_string(),
            "VAT regime is locked to normal, cannot switch to margin"
        );

        let err = CoreError::FieldNotInRegime {
            field: PriceField::Ttc,
            regime: VatRegime::Margin,
        };
        assert_eq!(err.to_string(), "Field ttc does not exist under margin VAT");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "purchase price".to_string(),
        };
        assert_eq!(err.to_string(), "purchase price is required");

        let err = ValidationError::NotANumber {
            field: "retail price".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "retail price is not a number: 'abc'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "purchase price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
