//! MVTO Scenarios
//!
//! - Create, read, update a single tuple
//! - Only the latest reader may update
//! - Visibility window after a read

use crate::common::{setup, Row};
use tuplecc::prelude::*;

#[test]
fn test_mvto_create_tuple() {
    let (ids, relation) = setup::<Mvto>();
    let t1 = ids.begin();
    let pos = relation.insert(VersionedTuple::new(&t1, Row::sample()));
    assert_eq!(pos, 0);
    assert_eq!(relation.len(), 1);
}

#[test]
fn test_mvto_create_read_update() {
    let (ids, relation) = setup::<Mvto>();

    let t1 = ids.begin();
    let pos = relation.insert(VersionedTuple::new(&t1, Row::sample()));

    let t2 = ids.begin();
    let tup1 = relation.get(pos).unwrap();
    assert!(tup1.cc().is_valid(&t2), "this is a valid update");
    assert!(tup1.cc().read(&t2));

    let mut tup2 = VersionedTuple::successor(&t2, &tup1);
    tup2.payload_mut().b = 3.0;

    assert!(tup1.cc().try_lock(&t2), "this lock should succeed");
    let new_pos = relation.insert(tup2);
    assert!(tup1.cc().retire(&t2));
    tup1.cc().unlock();

    assert_eq!(tup1.cc().end(), t2.id());
    assert!(!tup1.cc().is_locked());
    assert_eq!(relation.get(new_pos).unwrap().payload().b, 3.0);
}

#[test]
fn test_mvto_only_latest_reader_updates() {
    let (ids, relation) = setup::<Mvto>();

    let t3 = ids.begin();
    let t4 = ids.begin();
    let t5 = ids.begin();

    let pos = relation.insert(VersionedTuple::new(&t3, Row::sample()));
    let tup3 = relation.get(pos).unwrap();

    tup3.cc().read(&t4);
    tup3.cc().read(&t5);
    assert_eq!(tup3.cc().read_watermark(), t5.id());

    assert!(!tup3.cc().try_lock(&t4), "t4 was overtaken by reader t5");
    assert!(tup3.cc().try_lock(&t5), "t5 is the latest reader");

    let mut tup4 = VersionedTuple::successor(&t5, &tup3);
    tup4.payload_mut().b = 3.0;
    relation.insert(tup4);

    assert!(!tup3.cc().retire(&t4), "t4 does not hold the lock");
    assert!(tup3.cc().retire(&t5), "this retire should succeed");
}

#[test]
fn test_mvto_visibility_window() {
    let (ids, relation) = setup::<Mvto>();

    let t1 = ids.begin();
    let pos = relation.insert(VersionedTuple::new(&t1, Row::sample()));
    let tup = relation.get(pos).unwrap();
    assert_eq!(tup.cc().begin(), 1);
    assert_eq!(tup.cc().end(), MAX_TXN_ID);

    let t2 = ids.begin();
    tup.cc().read(&t2);
    assert_eq!(tup.cc().read_watermark(), 2);

    let t3 = ids.begin();
    assert!(tup.cc().is_valid(&t3));
}

#[test]
fn test_mvto_update_after_later_read_aborts() {
    let (ids, relation) = setup::<Mvto>();
    let pos = relation.insert(VersionedTuple::new(&ids.begin(), Row::sample()));

    let writer = ids.begin();
    let reader = ids.begin();
    relation.checked_read(&reader, pos).unwrap();

    let err = relation
        .update_version(&writer, pos, |r| r.a = 2)
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(relation.len(), 1);

    // Retrying with a fresh, later transaction succeeds
    let retry = ids.begin();
    let next = relation.update_version(&retry, pos, |r| r.a = 2).unwrap();
    assert_eq!(relation.get(next).unwrap().payload().a, 2);
}
