//! ---
//! ranklog_section: "02-runtime"
//! ranklog_subsection: "tests"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Barrier semantics of in-process process groups."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use ranklog_runtime::{Runtime, ThreadGroup};

#[test]
fn barrier_separates_phases() {
    let arrivals = AtomicUsize::new(0);
    let observed = ThreadGroup::run(5, |runtime| {
        arrivals.fetch_add(1, Ordering::SeqCst);
        runtime.barrier();
        arrivals.load(Ordering::SeqCst)
    })
    .unwrap();
    assert!(observed.iter().all(|seen| *seen == 5), "{observed:?}");
}

#[test]
fn round_robin_turns_follow_rank_order() {
    let order = Mutex::new(Vec::new());
    ThreadGroup::run(6, |runtime| {
        for turn in 0..runtime.size() {
            if turn == runtime.rank() {
                order.lock().push(runtime.rank());
            }
            runtime.barrier();
        }
    })
    .unwrap();
    assert_eq!(order.into_inner(), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn barrier_is_reusable_across_many_generations() {
    let totals = ThreadGroup::run(3, |runtime| {
        let mut rounds = 0;
        for _ in 0..200 {
            runtime.barrier();
            rounds += 1;
        }
        rounds
    })
    .unwrap();
    assert_eq!(totals, vec![200, 200, 200]);
}
