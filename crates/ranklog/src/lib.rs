//! ---
//! ranklog_section: "03-engine"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Rank-synchronized log and timer engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! Leveled, rank-aware logging and timers for process groups.
//!
//! A [`Manager`] joins the process group for its whole lifetime and decides,
//! for every call, whether this rank emits: the severity must not exceed the
//! configured maximum and the rank must be selected by the configured
//! [`RankSelector`]. When every rank logs, output is serialized with one
//! barrier per rank so lines always appear in rank order.

pub mod engine;
pub mod environment;
pub mod macros;
pub mod manager;
pub mod sink;
pub mod timer;

pub use engine::{Engine, ABORT_STATUS};
pub use environment::Environment;
pub use manager::Manager;
pub use ranklog_common::{ManagerConfig, RankSelector, Severity};
pub use ranklog_runtime::{Communicator, ProcessIdentity, Runtime};
pub use sink::{ColorChoice, MemorySink, OwnedRecord, Record, Sink, TerminalSink};
pub use timer::{Timer, TimerStack};
