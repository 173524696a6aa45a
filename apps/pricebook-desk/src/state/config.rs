//! # Desk Configuration
//!
//! Configuration loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                     │
//! │     --regime margin                                                     │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     PRICEBOOK_CURRENCY_SYMBOL=$                                         │
//! │     PRICEBOOK_PRICE_STYLE=compact                                       │
//! │     PRICEBOOK_DEFAULT_REGIME=margin                                     │
//! │     PRICEBOOK_LOG=debug                                                 │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     ~/.config/pricebook-desk/desk.toml (Linux)                          │
//! │     ~/Library/Application Support/                                      │
//! │       com.pricebook.pricebook-desk/desk.toml (macOS)                    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [display]
//! currency_symbol = "€"
//! price_style = "compact"   # fixed | compact
//!
//! [session]
//! default_regime = "normal" # normal | margin
//!
//! [logging]
//! filter = "info,pricebook=debug"
//! ```

use pricebook_core::{DecimalStyle, VatRegime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Sections
// =============================================================================

/// How prices are rendered in labels and list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Symbol appended to amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Rendering of list prices.
    #[serde(default)]
    pub price_style: DecimalStyle,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: default_currency_symbol(),
            price_style: DecimalStyle::default(),
        }
    }
}

/// Form session defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Regime a fresh form opens with.
    #[serde(default)]
    pub default_regime: VatRegime,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,pricebook=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Desk Configuration
// =============================================================================

/// Complete desk configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DeskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (desk.toml), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading desk config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying any override.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "display.currency_symbol must not be empty".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("PRICEBOOK_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.display.currency_symbol = symbol;
        }

        if let Some(style) = lookup("PRICEBOOK_PRICE_STYLE") {
            match style.trim().to_lowercase().as_str() {
                "fixed" => self.display.price_style = DecimalStyle::Fixed,
                "compact" => self.display.price_style = DecimalStyle::Compact,
                _ => warn!(style = %style, "Unknown price style in environment"),
            }
        }

        if let Some(regime) = lookup("PRICEBOOK_DEFAULT_REGIME") {
            match regime.parse::<VatRegime>() {
                Ok(parsed) => {
                    debug!(regime = %parsed, "Overriding default regime from environment");
                    self.session.default_regime = parsed;
                }
                Err(e) => {
                    warn!(regime = %regime, error = %e, "Ignoring default regime from environment")
                }
            }
        }

        if let Some(filter) = lookup("PRICEBOOK_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pricebook", "pricebook-desk")
            .map(|dirs| dirs.config_dir().join("desk.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.display.currency_symbol, "€");
        assert_eq!(config.display.price_style, DecimalStyle::Fixed);
        assert_eq!(config.session.default_regime, VatRegime::Normal);
        assert_eq!(config.logging.filter, "info,pricebook=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: DeskConfig = toml::from_str(
            r#"
            [display]
            price_style = "compact"

            [session]
            default_regime = "margin"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.currency_symbol, "€");
        assert_eq!(config.display.price_style, DecimalStyle::Compact);
        assert_eq!(config.session.default_regime, VatRegime::Margin);
    }

    #[test]
    fn test_unknown_regime_in_toml_is_rejected() {
        let parsed = toml::from_str::<DeskConfig>("[session]\ndefault_regime = \"reduced\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = DeskConfig::default();
        config.apply_overrides(lookup(&[
            ("PRICEBOOK_CURRENCY_SYMBOL", "$"),
            ("PRICEBOOK_PRICE_STYLE", "Compact"),
            ("PRICEBOOK_DEFAULT_REGIME", "margin"),
            ("PRICEBOOK_LOG", "warn"),
        ]));

        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.display.price_style, DecimalStyle::Compact);
        assert_eq!(config.session.default_regime, VatRegime::Margin);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = DeskConfig::default();
        config.apply_overrides(lookup(&[
            ("PRICEBOOK_PRICE_STYLE", "scientific"),
            ("PRICEBOOK_DEFAULT_REGIME", "zero-rated"),
        ]));
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn test_empty_symbol_fails_validation() {
        let mut config = DeskConfig::default();
        config.display.currency_symbol = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pricebook-desk-{}.toml", std::process::id()));
        std::fs::write(&path, "[display]\ncurrency_symbol = \"CHF\"\n").unwrap();

        let config = DeskConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.display.currency_symbol, "CHF");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("pricebook-desk-does-not-exist.toml");
        let config = DeskConfig::load(Some(path)).unwrap();
        assert!(config.validate().is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_default_config_path_uses_app_dir() {
        // No home directory means no path at all
        if let Some(path) = DeskConfig::default_config_path() {
            assert!(path.ends_with("pricebook-desk/desk.toml"), "{}", path.display());
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DeskConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: DeskConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
