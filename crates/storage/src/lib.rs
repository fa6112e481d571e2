//! Storage layer for tuplecc
//!
//! This crate holds the versions the protocols operate on:
//! - [`VersionedTuple`]: payload plus one concurrency-control state
//! - [`Relation`]: append-only, position-stable sequence of versions
//! - [`RelationConfig`]: sizing, loadable from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod relation;
pub mod tuple;

pub use config::{RelationConfig, DEFAULT_INITIAL_CAPACITY, MAX_INITIAL_CAPACITY};
pub use error::{RelationError, Result};
pub use relation::{Relation, TupleRef};
pub use tuple::VersionedTuple;
