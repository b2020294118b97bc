//! ---
//! ranklog_section: "02-runtime"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Messaging runtime contract and adapters."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use tracing::debug;

use crate::{Communicator, ProcessIdentity, Runtime};

/// A process group of one. Barriers return immediately.
#[derive(Debug)]
pub struct SoloRuntime {
    identity: ProcessIdentity,
    joined: bool,
}

impl SoloRuntime {
    pub fn join() -> Self {
        debug!("joined solo runtime");
        Self {
            identity: ProcessIdentity::new(Communicator::Solo, 0, 1),
            joined: true,
        }
    }

    pub fn is_joined(&self) -> bool {
        self.joined
    }
}

impl Runtime for SoloRuntime {
    fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    fn barrier(&self) {
        debug_assert!(self.joined, "barrier after leave");
    }

    fn abort(&self, status: i32) -> ! {
        std::process::exit(status)
    }

    fn leave(&mut self) {
        if std::mem::replace(&mut self.joined, false) {
            debug!("left solo runtime");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_is_rank_zero_of_one() {
        let mut runtime = SoloRuntime::join();
        assert_eq!(runtime.rank(), 0);
        assert_eq!(runtime.size(), 1);
        assert!(runtime.identity().is_leader());
        runtime.barrier();
        runtime.leave();
        runtime.leave();
        assert!(!runtime.is_joined());
    }
}
