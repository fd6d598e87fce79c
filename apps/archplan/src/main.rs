//! # Archplan - Restoration Planner
//!
//! The main binary for the Archplan material planner.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            apps/archplan (THE BINARY)         │
//! │                                               │
//! │  ┌───────────┐   ┌──────────┐   ┌─────────┐   │
//! │  │   CLI     │   │  Config  │   │ Logging │   │
//! │  │  (clap)   │   │  (toml)  │   │(tracing)│   │
//! │  └─────┬─────┘   └────┬─────┘   └────┬────┘   │
//! │        └──────────────┼──────────────┘        │
//! │                       ▼                       │
//! │               ┌───────────────┐               │
//! │               │ archplan-core │               │
//! │               │  (THE LOGIC)  │               │
//! │               └───────────────┘               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! archplan -D data/saradominist.toml status
//! archplan -D data/saradominist.toml plan -c "Saradominist III"
//! archplan -D data/saradominist.toml plan -c "Saradominist III" -s storage.toml
//! archplan -D data/saradominist.toml show artefact "Amphora"
//! archplan -D data/saradominist.toml export -o game.snapshot
//! ```

use archplan::cli;
use archplan::config::ArchplanConfig;
use archplan::logging;
use clap::Parser;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    let config = match ArchplanConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    logging::init(&config.log, cli.verbose);

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Archplan startup banner.
fn print_banner() {
    println!(
        r#"
   ┌─┐┬─┐┌─┐┬ ┬┌─┐┬  ┌─┐┌┐┌
   ├─┤├┬┘│  ├─┤├─┘│  ├─┤│││
   ┴ ┴┴└─└─┘┴ ┴┴  ┴─┘┴ ┴┘└┘

  Restoration Planner v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
