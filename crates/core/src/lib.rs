//! Core types for tuplecc
//!
//! This crate defines the fundamental types shared by every protocol:
//! - [`TxnId`] and its reserved sentinels
//! - [`TransactionIdAllocator`]: monotonic, process-scoped id source
//! - [`Transaction`]: handle holding one allocated id
//! - [`Protocol`]: which concurrency-control protocol governs a version
//! - [`CcError`]: why an operation was refused

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod protocol;
pub mod txn;

pub use error::{CcError, CcResult};
pub use protocol::Protocol;
pub use txn::{Transaction, TransactionIdAllocator, TxnId, INVALID_TXN_ID, MAX_TXN_ID};
