//! # Gradus - Stage Unlock Engine
//!
//! The main binary for the Gradus progression gating engine.
//!
//! This application provides:
//! - CLI interface for unlock decisions and roster inspection
//! - TOML roster manifest loading
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/gradus (THE BINARY)         │
//! │                                               │
//! │  ┌─────────────┐        ┌─────────────────┐   │
//! │  │   CLI       │        │  Manifest (TOML)│   │
//! │  │  (clap)     │        │  → Roster       │   │
//! │  └──────┬──────┘        └────────┬────────┘   │
//! │         │                        │            │
//! │         └───────────┬────────────┘            │
//! │                     ▼                         │
//! │             ┌───────────────┐                 │
//! │             │  gradus-core  │                 │
//! │             │  (THE LOGIC)  │                 │
//! │             └───────────────┘                 │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Roster summary
//! gradus -f roster.toml status
//!
//! # Single unlock decision
//! gradus -f roster.toml check --stage 10 --learner 100 --today 2025-01-12
//!
//! # Per-stage report for one learner
//! gradus -f roster.toml report --program 1 --learner 100
//! ```

use clap::Parser;
use gradus::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — GRADUS_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("GRADUS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gradus=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Gradus startup banner.
fn print_banner() {
    println!(
        r#"
   ██████╗ ██████╗  █████╗ ██████╗ ██╗   ██╗███████╗
  ██╔════╝ ██╔══██╗██╔══██╗██╔══██╗██║   ██║██╔════╝
  ██║  ███╗██████╔╝███████║██║  ██║██║   ██║███████╗
  ██║   ██║██╔══██╗██╔══██║██║  ██║██║   ██║╚════██║
  ╚██████╔╝██║  ██║██║  ██║██████╔╝╚██████╔╝███████║
   ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝  ╚═════╝ ╚══════╝

  Stage Unlock Engine v{}

  Deterministic • Per-Learner • Recomputed on Every Read
"#,
        env!("CARGO_PKG_VERSION")
    );
}
