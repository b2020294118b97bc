//! ---
//! ranklog_section: "03-engine"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Rank-synchronized log and timer engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! Output sinks receiving rendered rank lines.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use crossterm::style::{Color, Stylize};
use parking_lot::Mutex;
use ranklog_common::Severity;

/// One line to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub rank: usize,
    pub severity: Severity,
    pub message: &'a str,
}

impl Record<'_> {
    /// Uncolored rendering: `Rank N: [LABEL]: message`.
    pub fn render_plain(&self) -> String {
        format!(
            "Rank {}: [{}]: {}",
            self.rank,
            self.severity.label(),
            self.message
        )
    }

    pub fn to_owned_record(&self) -> OwnedRecord {
        OwnedRecord {
            rank: self.rank,
            severity: self.severity,
            message: self.message.to_owned(),
        }
    }
}

/// Destination for emitted lines.
pub trait Sink {
    fn emit(&mut self, record: &Record<'_>);

    fn flush(&mut self) {}
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&mut self, record: &Record<'_>) {
        (**self).emit(record)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn resolve(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
            }
        }
    }
}

/// Writes lines to stdout with a bold rank prefix and a colored label.
#[derive(Debug, Clone)]
pub struct TerminalSink {
    colored: bool,
}

impl TerminalSink {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            colored: choice.resolve(),
        }
    }

    /// Render a record exactly as it is written, without the newline.
    pub fn render(&self, record: &Record<'_>) -> String {
        if !self.colored {
            return record.render_plain();
        }
        let rgb = record.severity.color();
        let prefix = format!("Rank {}: ", record.rank).bold();
        let label = format!("[{}]", record.severity.label()).with(Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        });
        format!("{prefix}{label}: {}", record.message)
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl Sink for TerminalSink {
    fn emit(&mut self, record: &Record<'_>) {
        let line = self.render(record);
        let mut out = io::stdout().lock();
        // Rank output has nowhere else to report a broken stdout.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }

    fn flush(&mut self) {
        let _ = io::stdout().flush();
    }
}

/// Owned copy of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRecord {
    pub rank: usize,
    pub severity: Severity,
    pub message: String,
}

impl OwnedRecord {
    pub fn render_plain(&self) -> String {
        Record {
            rank: self.rank,
            severity: self.severity,
            message: &self.message,
        }
        .render_plain()
    }
}

/// Shared in-memory sink. Clones append to the same buffer, so one buffer can
/// observe the global emission order of several ranks.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<OwnedRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<OwnedRecord> {
        self.records.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(OwnedRecord::render_plain)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn emit(&mut self, record: &Record<'_>) {
        self.records.lock().push(record.to_owned_record());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_matches_layout() {
        let record = Record {
            rank: 3,
            severity: Severity::Warning,
            message: "disk almost full",
        };
        assert_eq!(record.render_plain(), "Rank 3: [WARNING]: disk almost full");
        assert_eq!(TerminalSink::new(ColorChoice::Never).render(&record), record.render_plain());
    }

    #[test]
    fn colored_rendering_wraps_prefix_and_label() {
        let sink = TerminalSink::new(ColorChoice::Always);
        let rendered = sink.render(&Record {
            rank: 0,
            severity: Severity::Emerg,
            message: "halt",
        });
        assert!(rendered.contains("Rank 0: "));
        assert!(rendered.contains("[EMERG]"));
        assert!(rendered.ends_with(": halt"));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(rendered.contains('\u{1b}'), "expected ANSI escapes in {rendered:?}");
        }
    }

    #[test]
    fn memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.emit(&Record {
            rank: 1,
            severity: Severity::Info,
            message: "hello",
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.lines(), vec!["Rank 1: [INFO]: hello".to_owned()]);
        sink.clear();
        assert!(writer.is_empty());
    }
}
