//! # Margin Classification
//!
//! Advisory colouring of margin percentages, shared by every screen that
//! shows one.
//!
//! ```text
//!   margin %   ──────────┬──────────────┬──────────────►
//!                        10             16
//!              Low (red) │ Medium (amber)│ High (green)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{HEALTHY_MARGIN_PERCENT, LOW_MARGIN_PERCENT};

/// How healthy a margin is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MarginClass {
    /// Below 10 %.
    Low,
    /// From 10 % up to (not including) 16 %.
    Medium,
    /// 16 % and above.
    High,
}

impl MarginClass {
    /// Classifies a margin percentage.
    ///
    /// Comparisons are plain `<` checks in order, so a NaN margin falls
    /// through to `High` exactly as the list views always rendered it.
    ///
    /// ## Example
    /// ```rust
    /// use pricebook_core::margin::MarginClass;
    ///
    /// assert_eq!(MarginClass::classify(9.99), MarginClass::Low);
    /// assert_eq!(MarginClass::classify(10.0), MarginClass::Medium);
    /// assert_eq!(MarginClass::classify(15.99), MarginClass::Medium);
    /// assert_eq!(MarginClass::classify(16.0), MarginClass::High);
    /// ```
    pub fn classify(margin_percent: f64) -> Self {
        if margin_percent < LOW_MARGIN_PERCENT {
            MarginClass::Low
        } else if margin_percent < HEALTHY_MARGIN_PERCENT {
            MarginClass::Medium
        } else {
            MarginClass::High
        }
    }

    /// Flag colour shown next to the margin.
    pub const fn flag(&self) -> &'static str {
        match self {
            MarginClass::Low => "red",
            MarginClass::Medium => "amber",
            MarginClass::High => "green",
        }
    }
}

/// Shorthand for [`MarginClass::classify`].
#[inline]
pub fn classify(margin_percent: f64) -> MarginClass {
    MarginClass::classify(margin_percent)
}
