//! # Commands Module
//!
//! All commands exposed to the form host.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (envelope, dispatch)
//! ├── pricing.rs  ◄─── Form editing, submit, stored-price summaries
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Form host                                                              │
//! │  ─────────                                                              │
//! │  {"command":"edit_price",                                               │
//! │   "args":{"tier":"retail","field":"price","value":"1200"}}              │
//! │         │                                                               │
//! │         │ (one JSON object per stdin line)                              │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  dispatch(form, config, request)                                        │
//! │      └──► pricing::edit_price(form, tier, field, value)                 │
//! │              -> Result<FormView, ApiError>                              │
//! │         │                                                               │
//! │         │ (one JSON object per stdout line)                             │
//! │         ▼                                                               │
//! │  {"ok":{...form...}}   or   {"error":{"code":"...","message":"..."}}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command receives only the state it needs.

pub mod config;
pub mod pricing;

use pricebook_core::{PriceField, PriceTier, VatRegime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::{DeskConfig, FormState};

// =============================================================================
// Envelope
// =============================================================================

/// One request line.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub command: String,

    /// Command arguments. May be omitted for commands without any.
    #[serde(default)]
    pub args: Value,
}

/// One response line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Ok(Value),
    Error(ApiError),
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(value) => Response::Ok(value),
            Err(err) => Response::Error(err),
        }
    }
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetFormArgs {
    #[serde(default)]
    regime: Option<VatRegime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetPurchasePriceArgs {
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditPriceArgs {
    tier: PriceTier,
    field: PriceField,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwitchRegimeArgs {
    regime: VatRegime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetSerialItemsArgs {
    count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyMarginArgs {
    margin_percent: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummarizePriceArgs {
    regime: VatRegime,
    purchase_price: f64,
    price: f64,
}

fn args<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    Ok(serde_json::from_value(args)?)
}

fn ok<T: Serialize>(payload: T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::internal(e.to_string()))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Routes a request to its command.
///
/// ## Errors
/// `BAD_REQUEST` for unknown commands or arguments of the wrong shape, plus
/// whatever the command itself returns.
pub fn dispatch(
    form: &FormState,
    config: &DeskConfig,
    request: Request,
) -> Result<Value, ApiError> {
    match request.command.as_str() {
        "get_form" => ok(pricing::get_form(form)),
        "reset_form" => {
            let a: ResetFormArgs = args(request.args)?;
            ok(pricing::reset_form(form, config, a.regime))
        }
        "set_purchase_price" => {
            let a: SetPurchasePriceArgs = args(request.args)?;
            ok(pricing::set_purchase_price(form, &a.value))
        }
        "edit_price" => {
            let a: EditPriceArgs = args(request.args)?;
            ok(pricing::edit_price(form, a.tier, a.field, &a.value)?)
        }
        "switch_regime" => {
            let a: SwitchRegimeArgs = args(request.args)?;
            ok(pricing::switch_regime(form, a.regime)?)
        }
        "set_serial_items" => {
            let a: SetSerialItemsArgs = args(request.args)?;
            ok(pricing::set_serial_items(form, a.count))
        }
        "submit_form" => ok(pricing::submit_form(form)?),
        "classify_margin" => {
            let a: ClassifyMarginArgs = args(request.args)?;
            ok(pricing::classify_margin(a.margin_percent))
        }
        "summarize_price" => {
            let a: SummarizePriceArgs = args(request.args)?;
            ok(pricing::summarize_price(config, a.regime, a.purchase_price, a.price))
        }
        "get_config" => ok(config::get_config(config)),
        other => Err(ApiError::bad_request(format!("Unknown command: {}", other))),
    }
}
