//! # State Module
//!
//! Manages the desk's state, one focused type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐    │
//! │  │          FormState           │   │          DeskConfig          │    │
//! │  │                              │   │                              │    │
//! │  │  Mutex<FormSession>          │   │  currency symbol             │    │
//! │  │   • PricingForm              │   │  list price style            │    │
//! │  │   • RegimeOwner              │   │  default regime              │    │
//! │  └──────────────────────────────┘   └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • FormState: Protected by Mutex for exclusive access                   │
//! │  • DeskConfig: Read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod form;

pub use config::{DeskConfig, DisplayConfig, LoggingConfig, SessionConfig};
pub use form::{FormSession, FormState};
