//! Stress Tests
//!
//! Random interleavings of lock, read and release calls from many threads.
//! Checks that no two transactions ever hold the same version at once, and
//! that writers still get through when readers release what they take.

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tuplecc::prelude::*;

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 2_000;
const VERSIONS: usize = 4;

/// Per-position count of threads that believe they hold the lock
///
/// `release_read` gives back whatever a successful read took.
fn hammer<C: ConcurrencyControl>(release_read: fn(&C)) -> Arc<Relation<usize, C>> {
    let ids = Arc::new(TransactionIdAllocator::new());
    let relation: Arc<Relation<usize, C>> = Arc::new(Relation::new());
    for i in 0..VERSIONS {
        relation.insert(VersionedTuple::new(&ids.begin(), i));
    }

    let inside: Arc<Vec<AtomicUsize>> =
        Arc::new((0..VERSIONS).map(|_| AtomicUsize::new(0)).collect());
    let violations = Arc::new(AtomicUsize::new(0));
    let locked = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ids = Arc::clone(&ids);
            let relation = Arc::clone(&relation);
            let inside = Arc::clone(&inside);
            let violations = Arc::clone(&violations);
            let locked = Arc::clone(&locked);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                barrier.wait();
                for _ in 0..OPS_PER_THREAD {
                    let pos = rng.gen_range(0..VERSIONS);
                    let version = relation.get(pos).unwrap();
                    let txn = ids.begin();

                    if rng.gen_bool(0.5) {
                        if version.cc().read(&txn) {
                            release_read(version.cc());
                        }
                        continue;
                    }
                    if version.cc().try_lock(&txn) {
                        locked.fetch_add(1, Ordering::SeqCst);
                        if inside[pos].fetch_add(1, Ordering::SeqCst) != 0 {
                            violations.fetch_add(1, Ordering::SeqCst);
                        }
                        assert_eq!(version.cc().holder(), txn.id());
                        inside[pos].fetch_sub(1, Ordering::SeqCst);
                        assert!(version.cc().unlock_as(&txn));
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(violations.load(Ordering::SeqCst), 0);
    assert!(locked.load(Ordering::SeqCst) > 0);
    for pos in 0..VERSIONS {
        assert!(!relation.get(pos).unwrap().cc().is_locked());
    }
    relation
}

#[test]
fn test_stress_single_writer_mvto() {
    hammer::<Mvto>(|_| {});
}

#[test]
fn test_stress_single_writer_mvocc() {
    hammer::<Mvocc>(|_| {});
}

#[test]
fn test_stress_single_writer_mv2pl() {
    let relation = hammer::<Mv2pl>(|cc| assert!(cc.unlock_read()));
    for pos in 0..VERSIONS {
        assert_eq!(relation.get(pos).unwrap().cc().read_count(), 0);
    }
}
