//! Multi-version optimistic concurrency control (MVOCC)
//!
//! Transactions run in three phases:
//!
//! 1. **Read**: versions are read freely. Visibility is the plain
//!    `[begin, end)` check; nothing is recorded on the version.
//! 2. **Validation**: the transaction takes a second, later id (its commit
//!    id) via [`Transaction::reassign`]. Locking a version first re-checks
//!    that the version is still visible to the commit id, then claims it.
//!    If another transaction retired the version in between, validation
//!    fails and the caller aborts.
//! 3. **Write**: the holder installs its successor, retires the old version
//!    at its commit id and releases it with [`ConcurrencyControl::unlock_as`].

use crate::control::ConcurrencyControl;
use crate::window::VersionWindow;
use tuplecc_core::{Protocol, Transaction};

/// MVOCC state embedded in each version
#[derive(Debug)]
pub struct Mvocc {
    window: VersionWindow,
}

impl ConcurrencyControl for Mvocc {
    const PROTOCOL: Protocol = Protocol::Optimistic;

    fn new(creator: &Transaction) -> Self {
        Mvocc {
            window: VersionWindow::new(creator.id()),
        }
    }

    #[inline]
    fn window(&self) -> &VersionWindow {
        &self.window
    }

    /// `txn` is expected to carry its commit id
    fn try_lock(&self, txn: &Transaction) -> bool {
        let id = txn.id();
        if !self.is_valid(txn) {
            tracing::trace!(
                txn = id,
                begin = self.begin(),
                end = self.end(),
                "MVOCC validation failed: version no longer visible"
            );
            return false;
        }
        match self.window.claim(id) {
            Ok(()) => true,
            Err(holder) => {
                tracing::trace!(txn = id, holder, "MVOCC lock refused: version held");
                false
            }
        }
    }

    #[inline]
    fn read(&self, _txn: &Transaction) -> bool {
        true
    }

    #[inline]
    fn is_valid(&self, txn: &Transaction) -> bool {
        self.window.contains(txn.id())
    }
}
