//! # Logging
//!
//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr so that stdout carries only command output (and stays
//! parseable in `--json-mode`).

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor the config sets one.
const DEFAULT_FILTER: &str = "archplan=info,archplan_core=info";

/// Default filter with `--verbose`.
const VERBOSE_FILTER: &str = "archplan=debug,archplan_core=debug";

/// Pick the filter directive: `RUST_LOG`, then config, then default.
fn build_filter(config: &LogConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match (&config.filter, verbose) {
            (_, true) => VERBOSE_FILTER,
            (Some(filter), false) => filter.as_str(),
            (None, false) => DEFAULT_FILTER,
        };
        EnvFilter::new(directive)
    })
}

/// Install the global tracing subscriber.
pub fn init(config: &LogConfig, verbose: bool) {
    let filter = build_filter(config, verbose);

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
