//! # Form State
//!
//! The pricing form being edited, and who owns its VAT regime.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reset_form ──► blank form (default regime, no serial items)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_purchase_price / edit_price / switch_regime   (any order)          │
//! │       │                                                                 │
//! │       │  set_serial_items(n > 0) ──► regime now locked                  │
//! │       ▼                                                                 │
//! │  submit_form ──► ProductPrices (form stays as is)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use pricebook_core::{PricingForm, RegimeOwner, VatRegime};

/// One pricing form plus its regime owner.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub form: PricingForm,
    pub owner: RegimeOwner,
}

impl FormSession {
    /// A blank form for a product without serial items.
    pub fn new(regime: VatRegime) -> Self {
        FormSession {
            form: PricingForm::new(regime),
            owner: RegimeOwner::default(),
        }
    }
}

/// Thread-safe holder of the current form session.
#[derive(Debug)]
pub struct FormState {
    session: Mutex<FormSession>,
}

impl FormState {
    /// Creates a state holding a blank form.
    pub fn new(regime: VatRegime) -> Self {
        FormState {
            session: Mutex::new(FormSession::new(regime)),
        }
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FormSession) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// form_state.with_session_mut(|s| s.form.set_purchase_price("900"));
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FormSession) -> R,
    {
        f(&mut self.lock())
    }

    // Every mutation leaves the session consistent, so a poisoned lock is
    // still safe to read.
    fn lock(&self) -> MutexGuard<'_, FormSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
