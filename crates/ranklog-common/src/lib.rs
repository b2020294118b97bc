//! ---
//! ranklog_section: "01-core-functionality"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Shared primitives and utilities for the logging engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! Core shared primitives for the ranklog workspace.
//! This crate exposes the severity scale, rank selection policy,
//! configuration loading, diagnostics setup and time rendering consumed
//! across the workspace.

pub mod config;
pub mod error;
pub mod level;
pub mod logging;
pub mod time;

pub use config::{DiagnosticsConfig, LoadedManagerConfig, ManagerConfig};
pub use error::{Error, Result};
pub use level::{RankSelector, Rgb, Severity};
pub use logging::{init_tracing, DiagnosticsFormat};
