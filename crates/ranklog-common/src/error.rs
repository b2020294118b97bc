//! ---
//! ranklog_section: "01-core-functionality"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Shared primitives and utilities for the logging engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("process has already joined the messaging runtime")]
    AlreadyJoined,
    #[error("unable to join the messaging runtime: {0}")]
    Join(String),
    #[error("configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}
