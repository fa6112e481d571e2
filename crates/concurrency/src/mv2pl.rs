//! Multi-version two-phase locking (MV2PL)
//!
//! Each version carries a shared read count next to the exclusive holder.
//! Readers may enter while no writer holds the version; a writer may claim
//! the version only while there are no readers. The two fields are separate
//! atomics, so both paths check, claim, then re-check:
//!
//! ```text
//! reader: holder == 0?  count += 1  holder still 0?  else count -= 1
//! writer: count == 0?   CAS holder  count still 0?   else holder = 0
//! ```
//!
//! Visibility is the plain `[begin, end)` check. Ordering comes from lock
//! acquisition, not timestamps.

use crate::control::ConcurrencyControl;
use crate::window::VersionWindow;
use std::sync::atomic::{fence, AtomicU64, Ordering};
use tuplecc_core::{Protocol, Transaction, INVALID_TXN_ID};

/// MV2PL state embedded in each version
#[derive(Debug)]
pub struct Mv2pl {
    window: VersionWindow,
    read_count: AtomicU64,
}

impl Mv2pl {
    /// Number of readers currently holding a shared lock
    #[inline]
    pub fn read_count(&self) -> u64 {
        self.read_count.load(Ordering::Acquire)
    }

    /// Release a shared lock taken by a successful [`read`](ConcurrencyControl::read)
    ///
    /// Returns `false` without touching the count if there are no readers
    /// to release.
    pub fn unlock_read(&self) -> bool {
        let released = self
            .read_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            })
            .is_ok();
        if !released {
            tracing::warn!("MV2PL unlock_read without a matching read");
        }
        released
    }
}

impl ConcurrencyControl for Mv2pl {
    const PROTOCOL: Protocol = Protocol::TwoPhaseLocking;

    fn new(creator: &Transaction) -> Self {
        Mv2pl {
            window: VersionWindow::new(creator.id()),
            read_count: AtomicU64::new(0),
        }
    }

    #[inline]
    fn window(&self) -> &VersionWindow {
        &self.window
    }

    fn try_lock(&self, txn: &Transaction) -> bool {
        let id = txn.id();
        if self.read_count() != 0 {
            tracing::trace!(txn = id, readers = self.read_count(), "MV2PL lock refused: readers");
            return false;
        }
        if let Err(holder) = self.window.claim(id) {
            tracing::trace!(txn = id, holder, "MV2PL lock refused: version held");
            return false;
        }

        // A reader may have entered between the first check and the claim.
        fence(Ordering::SeqCst);

        if self.read_count() != 0 {
            self.window.release();
            tracing::trace!(txn = id, "MV2PL lock given back: reader entered");
            return false;
        }
        true
    }

    fn read(&self, txn: &Transaction) -> bool {
        let holder = self.window.holder();
        if holder != INVALID_TXN_ID {
            tracing::trace!(txn = txn.id(), holder, "MV2PL read refused: writer holds version");
            return false;
        }

        self.read_count.fetch_add(1, Ordering::AcqRel);
        fence(Ordering::SeqCst);

        let holder = self.window.holder();
        if holder != INVALID_TXN_ID {
            self.read_count.fetch_sub(1, Ordering::AcqRel);
            tracing::trace!(txn = txn.id(), holder, "MV2PL read given back: writer entered");
            return false;
        }
        true
    }

    #[inline]
    fn is_valid(&self, txn: &Transaction) -> bool {
        self.window.contains(txn.id())
    }
}
