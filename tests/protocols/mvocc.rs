//! MVOCC Scenarios
//!
//! - Create, update a single tuple
//! - Two transactions race to validate against the same version

use crate::common::{setup, Row};
use tuplecc::prelude::*;

#[test]
fn test_mvocc_create_tuple() {
    let (ids, relation) = setup::<Mvocc>();
    let pos = relation.insert(VersionedTuple::new(&ids.begin(), Row::sample()));
    assert!(!relation.get(pos).unwrap().cc().is_locked());
}

#[test]
fn test_mvocc_create_read_update() {
    let (ids, relation) = setup::<Mvocc>();

    let t1 = ids.begin();
    let pos = relation.insert(VersionedTuple::new(&t1, Row::sample()));

    let t2 = ids.begin();
    let tup1 = relation.get(pos).unwrap();
    assert!(tup1.cc().is_valid(&t2), "this is a valid update");

    let mut tup2 = VersionedTuple::successor(&t2, &tup1);
    tup2.payload_mut().b = 3.0;

    assert!(tup1.cc().try_lock(&t2), "this lock should succeed");
    relation.insert(tup2);
    assert!(tup1.cc().retire(&t2));
    assert!(tup1.cc().unlock_as(&t2));
}

#[test]
fn test_mvocc_validation_race() {
    let (ids, relation) = setup::<Mvocc>();

    let t3 = ids.begin();
    let mut t4 = ids.begin();
    let mut t5 = ids.begin();

    let pos = relation.insert(VersionedTuple::new(&t3, Row::sample()));
    let tup3 = relation.get(pos).unwrap();

    // Read phase: both build a successor from the same version
    let mut tup4 = VersionedTuple::successor(&t4, &tup3);
    let mut tup5 = VersionedTuple::successor(&t5, &tup3);
    tup4.payload_mut().b = 3.0;
    tup5.payload_mut().b = 3.0;

    // Validation phase: commit ids
    t4.reassign(&ids);
    t5.reassign(&ids);
    assert!(t5.id() > t4.id());

    assert!(tup3.cc().try_lock(&t4), "first committer locks");
    assert_eq!(tup3.cc().holder(), t4.id());
    assert!(!tup3.cc().try_lock(&t5), "second committer must fail");

    // Write phase
    relation.insert(tup4);
    assert!(tup3.cc().retire(&t4));
    assert!(tup3.cc().unlock_as(&t4));

    // t5 has to abort; its successor is discarded by the caller
    drop(tup5);
    assert_eq!(relation.len(), 2);
    assert!(!tup3.cc().is_valid(&t5));
}

#[test]
fn test_mvocc_update_version_uses_commit_id() {
    let (ids, relation) = setup::<Mvocc>();
    let pos = relation.insert(VersionedTuple::new(&ids.begin(), Row::sample()));

    let mut txn = ids.begin();
    let seen = relation.checked_read(&txn, pos).unwrap();
    assert_eq!(seen, Row::sample());

    let commit = txn.reassign(&ids);
    let next = relation.update_version(&txn, pos, |r| r.c = 9.0).unwrap();

    let successor = relation.get(next).unwrap();
    assert_eq!(successor.cc().begin(), commit);
    assert_eq!(relation.get(pos).unwrap().cc().end(), commit);
}
