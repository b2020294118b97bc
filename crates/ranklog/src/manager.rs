//! ---
//! ranklog_section: "03-engine"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Rank-synchronized log and timer engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! The user-facing handle combining the engine with the lifecycle guard.

use ranklog_common::{ManagerConfig, Severity};
use ranklog_runtime::{Communicator, ProcessIdentity, Runtime};
use tracing::warn;

use crate::engine::Engine;
use crate::environment::Environment;
use crate::sink::{Sink, TerminalSink};

/// Logging and timers for one rank of a process group.
///
/// Dropping the manager stops any timers still open (after a warning line)
/// and only then leaves the runtime; the engine is declared before the
/// environment so its drain runs while barriers are still valid.
pub struct Manager<R: Runtime, S: Sink = TerminalSink> {
    engine: Engine<S>,
    environment: Environment<R>,
}

impl<R: Runtime> Manager<R, TerminalSink> {
    /// Manage `runtime`, writing to stdout.
    pub fn new(runtime: R, config: ManagerConfig) -> Self {
        Self::with_sink(runtime, config, TerminalSink::default())
    }
}

#[cfg(feature = "mpi")]
impl<S: Sink> Manager<ranklog_runtime::MpiRuntime, S> {
    /// Join `MPI_COMM_WORLD` and manage it for the lifetime of the handle.
    pub fn join_mpi(config: ManagerConfig, sink: S) -> ranklog_common::Result<Self> {
        Ok(Self::with_sink(ranklog_runtime::MpiRuntime::join()?, config, sink))
    }
}

impl<R: Runtime, S: Sink> Manager<R, S> {
    pub fn with_sink(runtime: R, config: ManagerConfig, sink: S) -> Self {
        let environment = Environment::new(runtime);
        let engine = Engine::new(config, environment.identity(), sink);
        Self {
            engine,
            environment,
        }
    }

    pub fn identity(&self) -> &ProcessIdentity {
        self.environment.identity()
    }

    pub fn rank(&self) -> usize {
        self.environment.rank()
    }

    pub fn size(&self) -> usize {
        self.environment.size()
    }

    pub fn communicator(&self) -> &Communicator {
        self.environment.communicator()
    }

    pub fn config(&self) -> &ManagerConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    /// Collective barrier across the whole group.
    pub fn barrier(&self) {
        self.environment.runtime().barrier();
    }

    /// Whether a call at `severity` would act on this rank.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.engine.enabled(severity)
    }

    pub fn log(&mut self, severity: Severity, message: &str) {
        self.engine
            .log(self.environment.runtime(), severity, message);
    }

    pub fn emerg(&mut self, message: &str) {
        self.log(Severity::Emerg, message);
    }

    pub fn alert(&mut self, message: &str) {
        self.log(Severity::Alert, message);
    }

    pub fn crit(&mut self, message: &str) {
        self.log(Severity::Crit, message);
    }

    pub fn err(&mut self, message: &str) {
        self.log(Severity::Err, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.log(Severity::Warning, message);
    }

    pub fn notice(&mut self, message: &str) {
        self.log(Severity::Notice, message);
    }

    pub fn info(&mut self, message: &str) {
        self.log(Severity::Info, message);
    }

    pub fn debug(&mut self, message: &str) {
        self.log(Severity::Debug, message);
    }

    /// Print `message` at emergency severity on this rank and terminate the
    /// whole group with a non-zero status.
    pub fn abort(&mut self, message: &str) -> ! {
        self.engine.abort(self.environment.runtime(), message)
    }

    pub fn timer_start(&mut self, severity: Severity, name: impl Into<String>) {
        self.engine
            .timer_start(self.environment.runtime(), severity, name);
    }

    pub fn timer_stop(&mut self) {
        self.engine.timer_stop(self.environment.runtime());
    }

    /// Run `body` between a `timer_start` and the matching `timer_stop`.
    pub fn timed<T>(
        &mut self,
        severity: Severity,
        name: impl Into<String>,
        body: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.timer_start(severity, name);
        let output = body(self);
        self.timer_stop();
        output
    }

    /// Names of open timers from the oldest to the most recent.
    pub fn open_timers(&self) -> Vec<String> {
        self.engine.open_timers()
    }
}

impl<R: Runtime, S: Sink> Drop for Manager<R, S> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            // The group is going down; draining would enter barriers peers never reach.
            if !self.engine.timers().is_empty() {
                warn!(rank = self.rank(), "skipping timer drain while unwinding");
            }
            return;
        }
        self.engine.drain_timers(self.environment.runtime());
    }
}

impl<R: Runtime + std::fmt::Debug, S: Sink + std::fmt::Debug> std::fmt::Debug for Manager<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("engine", &self.engine)
            .field("environment", &self.environment)
            .finish()
    }
}
