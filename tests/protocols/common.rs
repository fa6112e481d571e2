//! Shared fixtures for protocol tests

use tuplecc::prelude::*;

/// Payload used throughout the scenarios
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub a: i32,
    pub b: f32,
    pub c: f64,
}

impl Row {
    pub fn sample() -> Self {
        Row { a: 1, b: 2.0, c: 3.0 }
    }
}

/// Route `tracing` output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Fresh allocator and relation for one scenario
pub fn setup<C: ConcurrencyControl>() -> (TransactionIdAllocator, Relation<Row, C>) {
    init_tracing();
    let relation = RelationBuilder::new()
        .initial_capacity(100)
        .build()
        .expect("default config is valid");
    (TransactionIdAllocator::new(), relation)
}
