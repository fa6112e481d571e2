//! Concurrency-control protocols for tuplecc
//!
//! This crate implements the per-version state machines:
//! - [`VersionWindow`]: holder plus `[begin, end)` visibility window
//! - [`ConcurrencyControl`]: the uniform capability set
//!   (try_lock, unlock, read, is_valid, retire, delete)
//! - [`Mvto`]: timestamp ordering with a read watermark
//! - [`Mvocc`]: optimistic, validated at a separate commit id
//! - [`Mv2pl`]: two-phase locking with a shared read count
//!
//! All state is plain atomics; nothing here blocks or retries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod control;
pub mod mv2pl;
pub mod mvocc;
pub mod mvto;
pub mod window;

pub use control::ConcurrencyControl;
pub use mv2pl::Mv2pl;
pub use mvocc::Mvocc;
pub use mvto::Mvto;
pub use window::VersionWindow;
