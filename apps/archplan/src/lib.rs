//! # Archplan application library
//!
//! The CLI, configuration, and logging setup of the `archplan` binary,
//! exposed as a library so integration tests can drive commands directly.

pub mod cli;
pub mod config;
pub mod logging;
