//! ---
//! ranklog_section: "03-engine"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Rank-synchronized log and timer engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! The log/timer engine.
//!
//! Every operation first checks the rank filter and the severity filter
//! fixed at construction; nothing is observable unless both pass. Under
//! [`RankSelector::All`] the emitting ranks take turns in rank order and every
//! rank joins one barrier per turn, so a log call costs `size` barriers and
//! every rank must make the same calls at the same severities.

use ranklog_common::time::{format_duration, format_timestamp, wall_clock_now};
use ranklog_common::{ManagerConfig, RankSelector, Severity};
use ranklog_runtime::{ProcessIdentity, Runtime};
use tracing::{debug, trace, warn};

use crate::sink::{Record, Sink};
use crate::timer::{Timer, TimerStack};

/// Exit status used when the engine aborts the group.
pub const ABORT_STATUS: i32 = 1;

const OPEN_TIMERS_WARNING: &str = "Timers are running at the time of environment destruction.";

pub struct Engine<S: Sink> {
    config: ManagerConfig,
    rank: usize,
    size: usize,
    timers: TimerStack,
    sink: S,
}

impl<S: Sink> Engine<S> {
    pub fn new(config: ManagerConfig, identity: &ProcessIdentity, sink: S) -> Self {
        Self {
            config,
            rank: identity.rank,
            size: identity.size,
            timers: TimerStack::new(),
            sink,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn timers(&self) -> &TimerStack {
        &self.timers
    }

    /// Names of open timers from the oldest to the most recent.
    pub fn open_timers(&self) -> Vec<String> {
        self.timers.names().map(str::to_owned).collect()
    }

    pub fn sufficient_level(&self, severity: Severity) -> bool {
        self.config.level.permits(severity)
    }

    pub fn sufficient_rank(&self) -> bool {
        self.config.ranks.selects(self.rank)
    }

    /// Whether a call at `severity` would act on this rank.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.sufficient_rank() && self.sufficient_level(severity)
    }

    /// Emit `message` at `severity` if both filters pass.
    pub fn log<R: Runtime + ?Sized>(&mut self, runtime: &R, severity: Severity, message: &str) {
        if !self.enabled(severity) {
            return;
        }
        match self.config.ranks {
            RankSelector::Leader => self.emit(severity, message),
            RankSelector::All => {
                for turn in 0..self.size {
                    if turn == self.rank {
                        self.emit(severity, message);
                    }
                    trace!(rank = self.rank, turn, "log barrier");
                    runtime.barrier();
                }
            }
        }
    }

    /// Emit `message` at emergency severity on this rank regardless of the
    /// filters, then abort the whole group.
    pub fn abort<R: Runtime + ?Sized>(&mut self, runtime: &R, message: &str) -> ! {
        warn!(rank = self.rank, "aborting process group");
        self.emit(Severity::Emerg, message);
        self.sink.flush();
        runtime.abort(ABORT_STATUS)
    }

    /// Push a timer and report its start, if both filters pass.
    pub fn timer_start<R: Runtime + ?Sized>(
        &mut self,
        runtime: &R,
        severity: Severity,
        name: impl Into<String>,
    ) {
        if !self.enabled(severity) {
            return;
        }
        let timer = self.timers.push(Timer::start(severity, name));
        let message = format!(
            "Timer: `{}` started at: {}",
            timer.name,
            format_timestamp(&timer.started_at)
        );
        debug!(rank = self.rank, depth = self.timers.len(), "timer started");
        self.log(runtime, severity, &message);
    }

    /// Pop the most recent timer and report its duration at the severity it
    /// was started with. An empty stack is a silent no-op.
    pub fn timer_stop<R: Runtime + ?Sized>(&mut self, runtime: &R) {
        if !self.sufficient_rank() {
            return;
        }
        let Some(timer) = self.timers.pop() else {
            trace!(rank = self.rank, "timer_stop on empty stack");
            return;
        };
        let elapsed = timer.elapsed();
        let stopped_at = wall_clock_now();
        let message = format!(
            "Timer: `{}` stopped at: {} with duration: {}",
            timer.name,
            format_timestamp(&stopped_at),
            format_duration(elapsed)
        );
        debug!(rank = self.rank, depth = self.timers.len(), ?elapsed, "timer stopped");
        self.log(runtime, timer.severity, &message);
    }

    /// Warn about and stop every open timer, most recent first.
    ///
    /// Stops go through [`Engine::timer_stop`], so the usual filters apply to
    /// both the warning and the stop lines.
    pub fn drain_timers<R: Runtime + ?Sized>(&mut self, runtime: &R) {
        let open = self.timers.len();
        if open == 0 {
            return;
        }
        warn!(rank = self.rank, open, "timers still running at shutdown");
        self.log(runtime, Severity::Warning, OPEN_TIMERS_WARNING);
        for _ in 0..open {
            self.timer_stop(runtime);
        }
    }

    fn emit(&mut self, severity: Severity, message: &str) {
        self.sink.emit(&Record {
            rank: self.rank,
            severity,
            message,
        });
    }
}

impl<S: Sink + std::fmt::Debug> std::fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("rank", &self.rank)
            .field("size", &self.size)
            .field("timers", &self.timers)
            .field("sink", &self.sink)
            .finish()
    }
}
