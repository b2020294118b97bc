//! ---
//! ranklog_section: "02-runtime"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Messaging runtime contract and adapters."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
//! In-process process groups: every rank is a thread and the collective
//! barrier is shared between them.
//!
//! This mirrors the collective model closely enough to exercise rank-ordered
//! output without an MPI launcher. An abort poisons the barrier so that peers
//! blocked in it (or arriving later) unwind instead of hanging, which is the
//! in-process equivalent of the runtime killing every process in the group.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{Communicator, ProcessIdentity, Runtime};

/// Exit status recorded when a rank panics instead of aborting.
pub const PANIC_STATUS: i32 = 101;

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Unwind payload carried by every rank of an aborted group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupAbort {
    /// Rank that requested the abort.
    pub rank: usize,
    pub status: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("process group must contain at least one rank")]
    Empty,
    #[error("rank {rank} aborted the group with status {status}")]
    Aborted { rank: usize, status: i32 },
    #[error("rank {rank} panicked: {message}")]
    Panicked { rank: usize, message: String },
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    aborted: Option<GroupAbort>,
}

#[derive(Debug)]
struct Shared {
    size: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl Shared {
    fn new(size: usize) -> Self {
        Self {
            size,
            state: Mutex::new(BarrierState::default()),
            released: Condvar::new(),
        }
    }

    fn wait(&self, rank: usize) {
        let mut state = self.state.lock();
        if let Some(abort) = state.aborted {
            drop(state);
            panic::resume_unwind(Box::new(abort));
        }
        let generation = state.generation;
        state.arrived += 1;
        trace!(rank, generation, arrived = state.arrived, "barrier arrival");
        if state.arrived == self.size {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            return;
        }
        while state.generation == generation && state.aborted.is_none() {
            self.released.wait(&mut state);
        }
        if state.generation == generation {
            if let Some(abort) = state.aborted {
                drop(state);
                panic::resume_unwind(Box::new(abort));
            }
        }
    }

    fn poison(&self, abort: GroupAbort) -> GroupAbort {
        let mut state = self.state.lock();
        let first = *state.aborted.get_or_insert(abort);
        self.released.notify_all();
        first
    }

    fn aborted(&self) -> Option<GroupAbort> {
        self.state.lock().aborted
    }
}

/// One rank's membership in a [`ThreadGroup`].
#[derive(Debug)]
pub struct ThreadRuntime {
    identity: ProcessIdentity,
    shared: Arc<Shared>,
    joined: bool,
}

impl ThreadRuntime {
    pub fn is_joined(&self) -> bool {
        self.joined
    }
}

impl Runtime for ThreadRuntime {
    fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    fn barrier(&self) {
        debug_assert!(self.joined, "barrier after leave");
        self.shared.wait(self.identity.rank);
    }

    fn abort(&self, status: i32) -> ! {
        let abort = GroupAbort {
            rank: self.identity.rank,
            status,
        };
        warn!(rank = abort.rank, status, "aborting thread group");
        let first = self.shared.poison(abort);
        panic::resume_unwind(Box::new(first))
    }

    fn leave(&mut self) {
        if std::mem::replace(&mut self.joined, false) {
            debug!(rank = self.identity.rank, communicator = %self.identity.communicator, "left thread group");
        }
    }
}

/// Launcher for in-process process groups.
#[derive(Debug, Clone, Copy)]
pub struct ThreadGroup;

impl ThreadGroup {
    /// Run `body` once per rank on `size` threads and collect the results in
    /// rank order.
    ///
    /// Fails with [`GroupError::Aborted`] if any rank called
    /// [`Runtime::abort`], or [`GroupError::Panicked`] if a rank panicked; in
    /// both cases the remaining ranks are released from their barriers.
    pub fn run<T, F>(size: usize, body: F) -> Result<Vec<T>, GroupError>
    where
        F: Fn(ThreadRuntime) -> T + Sync,
        T: Send,
    {
        if size == 0 {
            return Err(GroupError::Empty);
        }
        let id = NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed);
        let shared = Arc::new(Shared::new(size));
        debug!(group = id, size, "launching thread group");

        let outcomes: Vec<thread::Result<T>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..size)
                .map(|rank| {
                    let runtime = ThreadRuntime {
                        identity: ProcessIdentity::new(Communicator::Threads(id), rank, size),
                        shared: Arc::clone(&shared),
                        joined: true,
                    };
                    let shared = Arc::clone(&shared);
                    let body = &body;
                    scope.spawn(move || {
                        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(runtime)));
                        if let Err(payload) = &outcome {
                            if payload.downcast_ref::<GroupAbort>().is_none() {
                                shared.poison(GroupAbort {
                                    rank,
                                    status: PANIC_STATUS,
                                });
                            }
                        }
                        outcome
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().and_then(|outcome| outcome))
                .collect()
        });

        let mut results = Vec::with_capacity(size);
        let mut failure = None;
        for (rank, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(value) => results.push(value),
                Err(payload) if payload.downcast_ref::<GroupAbort>().is_some() => {}
                Err(payload) => {
                    failure.get_or_insert(GroupError::Panicked {
                        rank,
                        message: panic_message(payload.as_ref()),
                    });
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }
        if let Some(abort) = shared.aborted() {
            return Err(GroupError::Aborted {
                rank: abort.rank,
                status: abort.status,
            });
        }
        Ok(results)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
