//! Multi-version timestamp ordering (MVTO)
//!
//! On top of the shared window, each version tracks the largest id that has
//! read it (the read watermark). Two rules follow:
//!
//! 1. A version is only visible to transactions at or above its watermark,
//!    so an older transaction can never observe a version a younger one has
//!    already read.
//! 2. A writer whose id is below the watermark must abort: a logically later
//!    transaction has already read the version it wants to replace.
//!
//! ```text
//! T4.read   watermark 4
//! T5.read   watermark 5
//! T4.lock   claim ok, watermark 5 > 4  -> give back, fail
//! T5.lock   claim ok, watermark 5 <= 5 -> success
//! ```

use crate::control::ConcurrencyControl;
use crate::window::VersionWindow;
use std::sync::atomic::{fence, AtomicU64, Ordering};
use tuplecc_core::{Protocol, Transaction, TxnId};

/// MVTO state embedded in each version
#[derive(Debug)]
pub struct Mvto {
    window: VersionWindow,
    /// Largest id that has read this version; only ever raised
    read_ts: AtomicU64,
}

impl Mvto {
    /// Largest transaction id that has read this version
    #[inline]
    pub fn read_watermark(&self) -> TxnId {
        self.read_ts.load(Ordering::Acquire)
    }
}

impl ConcurrencyControl for Mvto {
    const PROTOCOL: Protocol = Protocol::TimestampOrdering;

    fn new(creator: &Transaction) -> Self {
        Mvto {
            window: VersionWindow::new(creator.id()),
            read_ts: AtomicU64::new(creator.id()),
        }
    }

    #[inline]
    fn window(&self) -> &VersionWindow {
        &self.window
    }

    fn try_lock(&self, txn: &Transaction) -> bool {
        let id = txn.id();
        if let Err(holder) = self.window.claim(id) {
            tracing::trace!(txn = id, holder, "MVTO lock refused: version held");
            return false;
        }

        // Pairs with the fence in `read`: either we see the later reader's
        // watermark or that reader runs after our claim is visible.
        fence(Ordering::SeqCst);

        let watermark = self.read_watermark();
        if watermark > id {
            self.window.release();
            tracing::trace!(txn = id, watermark, "MVTO lock refused: read by later txn");
            return false;
        }
        true
    }

    fn read(&self, txn: &Transaction) -> bool {
        let id = txn.id();
        let mut current = self.read_ts.load(Ordering::Acquire);
        while current < id {
            match self
                .read_ts
                .compare_exchange_weak(current, id, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
        fence(Ordering::SeqCst);
        true
    }

    #[inline]
    fn is_valid(&self, txn: &Transaction) -> bool {
        let id = txn.id();
        self.window.contains(id) && id >= self.read_watermark()
    }
}
