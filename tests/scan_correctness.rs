//! End-to-end correctness for the two enumeration operations.
//!
//! Test strategy:
//! 1. The Schlage worked example: the alternate set is closed and ordered
//! 2. A full 3-pin, 3-cut keyspace against a brute-force pairwise oracle
//! 3. Serial vs parallel uniqueness agreement
//! 4. Boundary keyspaces (single pin, binary cuts)

use bitting_audit::compat::can_open;
use bitting_audit::scan::ScanOptions;
use bitting_audit::types::{Bitting, Keyspace};

/// Brute-force oracle: materialize the whole keyspace and test every
/// ordered pair, independent of the short-circuiting scan under test.
fn count_unique_oracle(keyspace: &Keyspace) -> u128 {
    let all: Vec<Bitting> = (0..keyspace.size())
        .map(|index| keyspace.bitting_at(index))
        .collect();
    let mut with_alternates = 0u128;
    for reference in &all {
        let duplicated = all
            .iter()
            .filter(|candidate| *candidate != reference)
            .any(|candidate| can_open(reference, candidate).expect("equal lengths"));
        if duplicated {
            with_alternates += 1;
        }
    }
    keyspace.size() - with_alternates
}

#[test]
fn test_schlage_alternate_set_is_closed() {
    let keyspace = Keyspace::new(5, 9).expect("valid keyspace");
    let reference = Bitting::new(vec![1, 1, 1, 1, 3]);
    let reference_index = keyspace.index_of(&reference);

    let alternates: Vec<Bitting> = keyspace
        .find_alternates(&reference)
        .expect("valid reference")
        .collect();

    assert!(
        !alternates.is_empty(),
        "a 5-pin Schlage bitting has working alternates"
    );
    for alternate in &alternates {
        assert_ne!(alternate, &reference, "the reference reported itself");
        assert!(
            keyspace.index_of(alternate) > reference_index,
            "alternate {} is not above the reference",
            alternate
        );
        assert!(
            can_open(&reference, alternate).expect("equal lengths"),
            "returned alternate {} does not open the reference",
            alternate
        );
    }

    // Hand-checked: pins 0..=2 and 4 set fully inserted, pin 3 sets one
    // position withdrawn.
    assert!(
        alternates.contains(&Bitting::new(vec![1, 1, 1, 3, 3])),
        "known alternate 11133 missing"
    );
}

#[test]
fn test_schlage_alternates_in_increasing_order() {
    let keyspace = Keyspace::new(5, 9).expect("valid keyspace");
    let reference = Bitting::new(vec![1, 1, 1, 1, 3]);
    let indices: Vec<u128> = keyspace
        .find_alternates(&reference)
        .expect("valid reference")
        .map(|alternate| keyspace.index_of(&alternate))
        .collect();
    assert!(
        indices.windows(2).all(|pair| pair[0] < pair[1]),
        "alternates out of order"
    );
}

#[test]
fn test_count_unique_matches_pairwise_oracle() {
    let keyspace = Keyspace::new(3, 3).expect("valid keyspace");
    let expected = count_unique_oracle(&keyspace);
    assert_eq!(keyspace.count_unique().expect("within limits"), expected);

    // Deterministic and reproducible across runs.
    assert_eq!(keyspace.count_unique().expect("within limits"), expected);
}

#[test]
fn test_serial_and_parallel_uniqueness_agree() {
    for (pins, cuts) in [(2, 5), (3, 3), (4, 2)] {
        let keyspace = Keyspace::new(pins, cuts).expect("valid keyspace");
        let serial = keyspace.count_unique().expect("within limits");
        let parallel = keyspace
            .count_unique_with(&ScanOptions {
                parallel: true,
                ..ScanOptions::default()
            })
            .expect("within limits");
        assert_eq!(serial, parallel, "{} pins x {} cuts", pins, cuts);
        assert_eq!(serial, count_unique_oracle(&keyspace));
    }
}

#[test]
fn test_single_pin_keyspaces_are_fully_unique() {
    for cuts in 2u8..=9 {
        let keyspace = Keyspace::new(1, cuts).expect("valid keyspace");
        assert_eq!(
            keyspace.count_unique().expect("within limits"),
            u128::from(cuts),
            "single-pin lock with {} cuts",
            cuts
        );
    }
}

#[test]
fn test_binary_single_pin_boundary() {
    // Exactly [0] and [1], neither opened by the other.
    let keyspace = Keyspace::new(1, 2).expect("valid keyspace");
    assert_eq!(keyspace.size(), 2);
    assert_eq!(keyspace.count_unique().expect("within limits"), 2);

    let zero = keyspace.bitting_at(0);
    let one = keyspace.bitting_at(1);
    assert!(!can_open(&zero, &one).expect("equal lengths"));
    assert!(!can_open(&one, &zero).expect("equal lengths"));
}
