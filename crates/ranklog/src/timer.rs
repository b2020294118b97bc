//! ---
//! ranklog_section: "03-engine"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Rank-synchronized log and timer engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use ranklog_common::time::wall_clock_now;
use ranklog_common::Severity;

/// A named timer opened at a severity.
#[derive(Debug, Clone)]
pub struct Timer {
    pub name: String,
    pub severity: Severity,
    /// Wall-clock start, used for display.
    pub started_at: DateTime<Local>,
    started: Instant,
}

impl Timer {
    pub fn start(severity: Severity, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity,
            started_at: wall_clock_now(),
            started: Instant::now(),
        }
    }

    /// Monotonic time elapsed since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// LIFO stack of open timers; the top is the most recently started.
#[derive(Debug, Default)]
pub struct TimerStack {
    timers: Vec<Timer>,
}

impl TimerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timer: Timer) -> &Timer {
        self.timers.push(timer);
        &self.timers[self.timers.len() - 1]
    }

    pub fn pop(&mut self) -> Option<Timer> {
        self.timers.pop()
    }

    pub fn top(&self) -> Option<&Timer> {
        self.timers.last()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Names of open timers from the oldest to the most recent.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.timers.iter().map(|timer| timer.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_most_recent_first() {
        let mut stack = TimerStack::new();
        stack.push(Timer::start(Severity::Info, "outer"));
        stack.push(Timer::start(Severity::Debug, "inner"));
        assert_eq!(stack.top().map(|t| t.name.as_str()), Some("inner"));
        assert_eq!(stack.names().collect::<Vec<_>>(), vec!["outer", "inner"]);

        let popped = stack.pop().unwrap();
        assert_eq!(popped.name, "inner");
        assert_eq!(popped.severity, Severity::Debug);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop().unwrap().name, "outer");
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }
}
