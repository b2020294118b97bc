//! ---
//! ranklog_section: "02-runtime"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Messaging runtime contract and adapters."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! Adapters over the messaging runtime that hosts a process group.
//!
//! The logging engine only needs four things from the runtime: who this
//! process is ([`ProcessIdentity`]), a collective barrier, a group-wide abort,
//! and a way to leave. [`Runtime`] captures exactly that contract.

pub mod identity;
#[cfg(feature = "mpi")]
pub mod mpi;
pub mod solo;
pub mod threads;

pub use identity::{Communicator, ProcessIdentity};
#[cfg(feature = "mpi")]
pub use crate::mpi::MpiRuntime;
pub use solo::SoloRuntime;
pub use threads::{GroupAbort, GroupError, ThreadGroup, ThreadRuntime};

/// Membership of one process in a message-passing process group.
pub trait Runtime {
    /// Identity established when the process joined. Unchanged until leave.
    fn identity(&self) -> &ProcessIdentity;

    /// Block until every process in the communicator has reached its matching
    /// barrier call.
    fn barrier(&self);

    /// Terminate every process in the group with `status`. Never returns.
    fn abort(&self, status: i32) -> !;

    /// Release this process's membership. Calling it again is a no-op; any
    /// barrier or abort afterwards is a caller bug.
    fn leave(&mut self);

    fn rank(&self) -> usize {
        self.identity().rank
    }

    fn size(&self) -> usize {
        self.identity().size
    }
}

impl<R: Runtime + ?Sized> Runtime for Box<R> {
    fn identity(&self) -> &ProcessIdentity {
        (**self).identity()
    }

    fn barrier(&self) {
        (**self).barrier()
    }

    fn abort(&self, status: i32) -> ! {
        (**self).abort(status)
    }

    fn leave(&mut self) {
        (**self).leave()
    }
}
