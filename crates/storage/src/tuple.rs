//! Versioned tuples
//!
//! A [`VersionedTuple`] pairs an opaque payload with the concurrency-control
//! state of one version. Once inserted into a relation the payload is
//! immutable; only the atomics inside the state change.
//!
//! Two constructors mirror the two ways a version comes into existence:
//! - [`VersionedTuple::new`]: a fresh insert
//! - [`VersionedTuple::successor`]: copy-on-write of a prior version, the
//!   next link in that tuple's version chain
//!
//! In both cases the new state is bound to the creating transaction and is
//! born held by it until the relation publishes it.

use tuplecc_concurrency::ConcurrencyControl;
use tuplecc_core::Transaction;

/// One version of a tuple
#[derive(Debug)]
pub struct VersionedTuple<P, C: ConcurrencyControl> {
    cc: C,
    payload: P,
}

impl<P, C: ConcurrencyControl> VersionedTuple<P, C> {
    /// Version created by `txn` holding `payload`
    pub fn new(txn: &Transaction, payload: P) -> Self {
        VersionedTuple {
            cc: C::new(txn),
            payload,
        }
    }

    /// Next version after `prior`, created by `txn`
    ///
    /// Copies the payload; the concurrency-control state is fresh and bound
    /// to `txn`, not copied.
    pub fn successor(txn: &Transaction, prior: &VersionedTuple<P, C>) -> Self
    where
        P: Clone,
    {
        Self::new(txn, prior.payload.clone())
    }

    /// Concurrency-control state of this version
    #[inline]
    pub fn cc(&self) -> &C {
        &self.cc
    }

    /// Payload of this version
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable payload, available only before the version is shared
    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Consume the version, returning its payload
    pub fn into_payload(self) -> P {
        self.payload
    }
}
