//! # Pricebook Desk Library
//!
//! Hosts a pricing form session for a product form, one JSON command per
//! line on stdin, one JSON response per line on stdout.
//!
//! ## Module Organization
//! ```text
//! pricebook_desk_lib/
//! ├── lib.rs          ◄─── You are here (startup & request loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── form.rs     ◄─── Form session (Mutex)
//! │   └── config.rs   ◄─── desk.toml + environment
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request envelope & dispatch
//! │   ├── pricing.rs  ◄─── Form and stored-price commands
//! │   └── config.rs   ◄─── get_config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Channels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   stdin  ──► requests  (one JSON object per line)                       │
//! │   stdout ◄── responses (one JSON object per line, same order)           │
//! │   stderr ◄── logs      (tracing, RUST_LOG or [logging] filter)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use anyhow::Context;
use clap::Parser;
use pricebook_core::VatRegime;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Request, Response};
use error::ApiError;
use state::{DeskConfig, FormState};

// =============================================================================
// Command Line
// =============================================================================

/// Command-line flags of `pricebook-desk`.
#[derive(Parser, Debug)]
#[command(name = "pricebook-desk", version, about = "Pricing form host over JSON lines")]
pub struct Cli {
    /// Config file (default: platform config dir / desk.toml)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Regime new forms open with (normal | margin)
    #[arg(long = "regime")]
    pub regime: Option<VatRegime>,

    /// Print the effective configuration as TOML and exit
    #[arg(long = "print-config")]
    pub print_config: bool,
}

// =============================================================================
// Desk
// =============================================================================

/// A running desk: one form session and its configuration.
#[derive(Debug)]
pub struct Desk {
    form: FormState,
    config: DeskConfig,
}

impl Desk {
    /// Creates a desk with a blank form in the configured default regime.
    pub fn new(config: DeskConfig) -> Self {
        Desk {
            form: FormState::new(config.session.default_regime),
            config,
        }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Handles one request line and returns the response line.
    pub fn handle_line(&self, line: &str) -> String {
        let result = serde_json::from_str::<Request>(line)
            .map_err(ApiError::from)
            .and_then(|request| {
                debug!(command = %request.command, "Request received");
                commands::dispatch(&self.form, &self.config, request)
            });

        if let Err(ref err) = result {
            warn!(code = ?err.code, message = %err.message, "Request rejected");
        }

        serde_json::to_string(&Response::from(result)).unwrap_or_else(|e| {
            format!(
                r#"{{"error":{{"code":"INTERNAL","message":"Failed to encode response: {}"}}}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }

    /// Answers every non-blank input line until the input ends.
    ///
    /// ## Returns
    /// Number of requests handled.
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<usize> {
        let mut handled = 0;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line);
            writeln!(output, "{}", response)?;
            output.flush()?;
            handled += 1;
        }

        Ok(handled)
    }
}

// =============================================================================
// Startup
// =============================================================================

/// Runs the desk until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load Configuration ─────────────────────────────────────────────►   │
/// │     • defaults → desk.toml → PRICEBOOK_* → --regime                     │
/// │                                                                         │
/// │  2. --print-config? ─── print TOML and exit ────────────────────────►   │
/// │                                                                         │
/// │  3. Initialize Logging ─────────────────────────────────────────────►   │
/// │     • RUST_LOG if set, else [logging] filter, written to stderr         │
/// │                                                                         │
/// │  4. Serve ──────────────────────────────────────────────────────────►   │
/// │     • stdin lines → dispatch → stdout lines                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config =
        DeskConfig::load(cli.config.clone()).context("Failed to load desk configuration")?;
    if let Some(regime) = cli.regime {
        config.session.default_regime = regime;
    }

    if cli.print_config {
        let text = toml::to_string_pretty(&config).context("Failed to render configuration")?;
        print!("{}", text);
        return Ok(());
    }

    init_tracing(&config.logging.filter);

    info!(
        regime = %config.session.default_regime,
        symbol = %config.display.currency_symbol,
        "Starting pricebook desk"
    );

    let desk = Desk::new(config);
    let handled = desk
        .serve(io::stdin().lock(), io::stdout().lock())
        .context("Request loop failed")?;

    info!(handled, "Input closed, shutting down");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pricebook=trace` - Show trace for pricebook crates only
/// - Default: the `[logging] filter` setting
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_handle_line_ok() {
        let desk = Desk::new(DeskConfig::default());
        let response = parse(&desk.handle_line(r#"{"command":"get_form"}"#));
        assert_eq!(response["ok"]["regime"], "normal");
    }

    #[test]
    fn test_handle_line_malformed_json() {
        let desk = Desk::new(DeskConfig::default());
        let response = parse(&desk.handle_line("{not json"));
        assert_eq!(response["error"]["code"], "BAD_REQUEST");
    }

    #[test]
    fn test_serve_answers_each_line_in_order() {
        let desk = Desk::new(DeskConfig::default());
        let input = concat!(
            r#"{"command":"set_purchase_price","args":{"value":"900"}}"#,
            "\n\n",
            r#"{"command":"edit_price","args":{"tier":"retail","field":"ttc","value":"1440"}}"#,
            "\n",
            r#"{"command":"submit_form"}"#,
            "\n",
        );

        let mut output = Vec::new();
        let handled = desk.serve(input.as_bytes(), &mut output).unwrap();
        assert_eq!(handled, 3);

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(parse)
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1]["ok"]["retail"]["ht"], "1200.00");
        assert_eq!(lines[2]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(lines[2]["error"]["message"], "pro price is required");
    }

    #[test]
    fn test_default_regime_from_config() {
        let mut config = DeskConfig::default();
        config.session.default_regime = VatRegime::Margin;
        let desk = Desk::new(config);

        let response = parse(&desk.handle_line(r#"{"command":"get_form"}"#));
        assert_eq!(response["ok"]["retail"]["regime"], "margin");
        assert_eq!(desk.config().session.default_regime, VatRegime::Margin);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["pricebook-desk", "--regime", "margin", "--print-config"]);
        assert_eq!(cli.regime, Some(VatRegime::Margin));
        assert!(cli.print_config);
        assert!(cli.config.is_none());

        assert!(Cli::try_parse_from(["pricebook-desk", "--regime", "reduced"]).is_err());
    }
}
