//! Subscriber setup for hosts that don't install their own.
//!
//! The library only emits `tracing` events. A host either installs its own
//! subscriber or calls [`init_logging`] once at startup, typically with
//! [`crate::config::StockpileConfig::log_level`].

use crate::error::{Result, StockpileError};
use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber filtered by `directive` (e.g. `"info"`,
/// `"stockpile=debug"`). The environment is not consulted.
///
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_logging(directive: &str) -> Result<bool> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| StockpileError::Config(format!("invalid log level {:?}: {}", directive, e)))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    Ok(installed)
}
