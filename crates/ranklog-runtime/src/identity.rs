//! ---
//! ranklog_section: "02-runtime"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Messaging runtime contract and adapters."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::fmt;

/// Opaque handle naming the group of mutually-communicating processes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Communicator {
    /// The world communicator of an MPI job.
    World,
    /// A group consisting of just this process.
    Solo,
    /// An in-process group of threads; the id is unique per [`crate::ThreadGroup`].
    Threads(u64),
}

impl fmt::Display for Communicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Communicator::World => f.write_str("world"),
            Communicator::Solo => f.write_str("solo"),
            Communicator::Threads(id) => write!(f, "threads#{id}"),
        }
    }
}

/// Who this process is within its communicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub communicator: Communicator,
    /// Zero-based rank.
    pub rank: usize,
    /// Number of processes in the communicator.
    pub size: usize,
}

impl ProcessIdentity {
    pub fn new(communicator: Communicator, rank: usize, size: usize) -> Self {
        debug_assert!(rank < size, "rank {rank} outside group of {size}");
        Self {
            communicator,
            rank,
            size,
        }
    }

    pub fn is_leader(&self) -> bool {
        self.rank == 0
    }
}
