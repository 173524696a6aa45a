//! # API Error Type
//!
//! Unified error type for desk commands, plus the configuration error.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in pricebook-desk                         │
//! │                                                                         │
//! │  Form host                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  {"command":"switch_regime","args":{"regime":"margin"}}                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command Function                                                │   │
//! │  │  Result<T, ApiError>                                             │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Malformed JSON? ──── serde_json::Error ──────────┐              │   │
//! │  │         │                                         │              │   │
//! │  │         ▼                                         ▼              │   │
//! │  │  Rule broken? ─── CoreError::RegimeLocked ──── ApiError ────────►│   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Success ───────────────────────────────────────────────────────►│   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ◄──── {"error":{"code":"BUSINESS_LOGIC","message":"VAT regime ..."}}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pricebook_core::{CoreError, ValidationError};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// API error returned from desk commands.
///
/// ## Serialization
/// This is what the form host receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "purchase price is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed on submit
    ValidationError,

    /// A business rule blocked the action (regime lock)
    BusinessLogic,

    /// The request itself was malformed or named something unknown
    BadRequest,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RegimeLocked { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::FieldNotInRegime { .. } => ApiError::bad_request(err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Request lines that do not parse, or args of the wrong shape.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid request: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading `desk.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pricebook_core::{PriceField, VatRegime};

    #[test]
    fn test_regime_locked_is_business_logic() {
        let err: ApiError = CoreError::RegimeLocked {
            current: VatRegime::Margin,
            requested: VatRegime::Normal,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(
            err.message,
            "VAT regime is locked to margin, cannot switch to normal"
        );
    }

    #[test]
    fn test_field_not_in_regime_is_bad_request() {
        let err: ApiError = CoreError::FieldNotInRegime {
            field: PriceField::NetMargin,
            regime: VatRegime::Normal,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_validation_unwraps_message() {
        let err: ApiError = CoreError::from(ValidationError::Required {
            field: "purchase price".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "purchase price is required");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::bad_request("nope")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "nope");
    }
}
