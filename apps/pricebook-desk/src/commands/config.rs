//! # Config Commands
//!
//! Commands for retrieving the desk configuration.

use tracing::debug;

use crate::state::DeskConfig;

/// Gets the current desk configuration.
///
/// ## When Used
/// - Form host startup (currency symbol, default regime)
/// - List views (price style)
///
/// ## Returns
/// Complete configuration (read-only)
pub fn get_config(config: &DeskConfig) -> DeskConfig {
    debug!("get_config command");
    config.clone()
}
