//! # Pricebook Desk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricebook Desk                                   │
//! │                                                                         │
//! │  Product form ──(JSON lines)──► pricebook-desk ──► pricebook-core       │
//! │                                                                         │
//! │  main.rs ────► Parses the command line                                  │
//! │  lib.rs ─────► Loads config, sets up logging, serves requests           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```text
//! $ echo '{"command":"get_form"}' | pricebook-desk --regime margin
//! {"ok":{"regime":"margin","purchasePrice":"",...}}
//! ```

use clap::Parser;
use pricebook_desk_lib::Cli;

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    pricebook_desk_lib::run(Cli::parse())
}
