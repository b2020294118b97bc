//! ---
//! ranklog_section: "03-engine"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Rank-synchronized log and timer engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use ranklog_runtime::{Communicator, ProcessIdentity, Runtime};
use tracing::debug;

/// Scoped membership in the process group: the runtime is left when the
/// guard is dropped, on every exit path.
#[derive(Debug)]
pub struct Environment<R: Runtime> {
    runtime: R,
}

impl<R: Runtime> Environment<R> {
    /// Take ownership of an already-joined runtime.
    pub fn new(runtime: R) -> Self {
        let identity = runtime.identity();
        debug!(
            rank = identity.rank,
            size = identity.size,
            communicator = %identity.communicator,
            "environment established"
        );
        Self { runtime }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn identity(&self) -> &ProcessIdentity {
        self.runtime.identity()
    }

    pub fn rank(&self) -> usize {
        self.runtime.rank()
    }

    pub fn size(&self) -> usize {
        self.runtime.size()
    }

    pub fn communicator(&self) -> &Communicator {
        &self.runtime.identity().communicator
    }
}

impl<R: Runtime> Drop for Environment<R> {
    fn drop(&mut self) {
        debug!(rank = self.runtime.rank(), "leaving process group");
        self.runtime.leave();
    }
}
