//! ---
//! ranklog_section: "02-runtime"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Messaging runtime contract and adapters."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! MPI-backed runtime over the world communicator.

use ::mpi::environment::Universe;
use ::mpi::topology::SimpleCommunicator;
use ::mpi::traits::{Communicator as _, CommunicatorCollectives as _};
use ranklog_common::{Error, Result};
use tracing::debug;

use crate::{Communicator, ProcessIdentity, Runtime};

/// Membership in `MPI_COMM_WORLD`. Dropping the runtime finalizes MPI.
pub struct MpiRuntime {
    world: SimpleCommunicator,
    universe: Option<Universe>,
    identity: ProcessIdentity,
}

impl MpiRuntime {
    /// Initialize MPI. Only the first join in a process succeeds; MPI itself
    /// aborts the job if initialization fails.
    pub fn join() -> Result<Self> {
        let universe = ::mpi::initialize().ok_or(Error::AlreadyJoined)?;
        let world = universe.world();
        let rank = usize::try_from(world.rank())
            .map_err(|_| Error::Join(format!("negative rank {}", world.rank())))?;
        let size = usize::try_from(world.size())
            .map_err(|_| Error::Join(format!("negative size {}", world.size())))?;
        debug!(rank, size, "joined MPI world");
        Ok(Self {
            world,
            universe: Some(universe),
            identity: ProcessIdentity::new(Communicator::World, rank, size),
        })
    }

    pub fn is_joined(&self) -> bool {
        self.universe.is_some()
    }
}

impl Runtime for MpiRuntime {
    fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    fn barrier(&self) {
        debug_assert!(self.is_joined(), "barrier after leave");
        self.world.barrier();
    }

    fn abort(&self, status: i32) -> ! {
        self.world.abort(status)
    }

    fn leave(&mut self) {
        if let Some(universe) = self.universe.take() {
            debug!(rank = self.identity.rank, "finalizing MPI");
            drop(universe);
        }
    }
}

impl std::fmt::Debug for MpiRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpiRuntime")
            .field("identity", &self.identity)
            .field("joined", &self.is_joined())
            .finish()
    }
}
