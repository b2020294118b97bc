//! ---
//! ranklog_section: "01-core-functionality"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Shared primitives and utilities for the logging engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::DiagnosticsConfig;

const DIAG_ENV: &str = "RANKLOG_DIAG";

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Output format for internal diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticsFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the diagnostics subscriber once per process.
///
/// * `RANKLOG_DIAG` overrides the filter directive (e.g. `debug`,
///   `ranklog=trace`). When unset `RUST_LOG` is honoured, finally falling back
///   to the configured filter.
/// * Diagnostics go to stderr so they never interleave with rank output on
///   stdout.
pub fn init_tracing(service_name: &str, config: &DiagnosticsConfig) {
    INSTALLED.get_or_init(|| {
        let filter = match std::env::var(DIAG_ENV) {
            Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
                eprintln!(
                    "invalid {} directive ({}); using {}",
                    DIAG_ENV, err, config.filter
                );
                EnvFilter::new(&config.filter)
            }),
            Err(_) => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.filter)),
        };

        let layer = match config.format {
            DiagnosticsFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .boxed(),
            DiagnosticsFormat::Json => fmt::layer()
                .with_target(false)
                .json()
                .with_writer(std::io::stderr)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .ok();

        debug!(service = %service_name, format = ?config.format, "diagnostics initialised");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = DiagnosticsConfig::default();
        init_tracing("unit", &config);
        init_tracing("unit", &config);
        assert!(INSTALLED.get().is_some());
    }
}
