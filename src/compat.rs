//! The bitting compatibility check.
//!
//! Models a key inserted fully and then withdrawn one pin position at a
//! time while rotational force is applied. At withdrawal offset `shift`,
//! pin `p` of the reference lock rides on the candidate cut at `p - shift`.
//! A candidate cut below the reference depth binds under the shear line and
//! rules that offset out; an exact match pushes the pin flush and marks it
//! set. A pin once set stays set as the key withdraws further. The candidate
//! opens the lock when some offset completes its sweep with every pin set.

use crate::error::{AuditError, Result};
use crate::types::{Bitting, Keyspace};

/// Could `candidate` open a lock keyed to `reference`?
///
/// Fails if the two bittings have different pin counts. Cut depths are not
/// range-checked here; use [`Keyspace::can_open`] when the cut count is
/// known.
pub fn can_open(reference: &Bitting, candidate: &Bitting) -> Result<bool> {
    if reference.len() != candidate.len() {
        return Err(AuditError::LengthMismatch {
            expected: reference.len(),
            got: candidate.len(),
        });
    }
    Ok(opens(reference.cuts(), candidate.cuts()))
}

impl Keyspace {
    /// [`can_open`] with both bittings validated against this keyspace.
    pub fn can_open(&self, reference: &Bitting, candidate: &Bitting) -> Result<bool> {
        self.validate(reference)?;
        self.validate(candidate)?;
        Ok(opens(reference.cuts(), candidate.cuts()))
    }
}

/// Core predicate over raw cut slices. Lengths must already match.
#[inline]
pub(crate) fn opens(reference: &[u8], candidate: &[u8]) -> bool {
    let num_pins = reference.len();
    // A key that never reaches the deepest reference cut cannot set that
    // pin at any offset.
    if reference.iter().max() > candidate.iter().max() {
        return false;
    }
    let mut pin_set = vec![false; num_pins];
    for shift in 0..num_pins {
        let mut bound = false;
        for pin in shift..num_pins {
            let cut = candidate[pin - shift];
            if cut < reference[pin] {
                // Undercut: the pin binds below the shear line, so this
                // offset is dead. Pins already set stay set.
                bound = true;
                break;
            }
            if cut == reference[pin] {
                pin_set[pin] = true;
            }
        }
        if !bound && pin_set.iter().all(|&set| set) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitting(cuts: &[u8]) -> Bitting {
        Bitting::new(cuts.to_vec())
    }

    #[test]
    fn test_key_opens_its_own_lock() {
        for cuts in [&[0u8][..], &[3], &[1, 1, 1, 1, 3], &[0, 8, 2, 5], &[7; 6]] {
            let b = bitting(cuts);
            assert!(can_open(&b, &b).unwrap(), "bitting {} failed", b);
        }
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let result = can_open(&bitting(&[1, 2]), &bitting(&[1, 2, 3]));
        assert!(matches!(
            result,
            Err(AuditError::LengthMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_max_depth_fast_rejection() {
        // The candidate never reaches depth 3, so pin 1 can never set.
        assert!(!can_open(&bitting(&[0, 3, 0]), &bitting(&[2, 2, 2])).unwrap());
    }

    #[test]
    fn test_withdrawal_shift_opens() {
        // Pin 0 sets fully inserted; pins 1..4 set one position withdrawn.
        // Relies on pin 0 staying set across shift attempts.
        assert!(can_open(&bitting(&[1, 1, 1, 1, 3]), &bitting(&[1, 1, 1, 3, 3])).unwrap());
    }

    #[test]
    fn test_undercut_disqualifies_only_that_shift() {
        // Fully inserted, pin 2 binds (1 < 2) after pin 0 sets. One position
        // out, pins 1 and 2 set, and pin 0's earlier mark completes the set.
        assert!(can_open(&bitting(&[1, 1, 2]), &bitting(&[1, 2, 1])).unwrap());
    }

    #[test]
    fn test_deeper_everywhere_never_sets() {
        // Every candidate cut clears the shear line but none lands on it.
        assert!(!can_open(&bitting(&[1, 1]), &bitting(&[2, 2])).unwrap());
    }

    #[test]
    fn test_zero_bitting_opened_by_shifted_zero() {
        assert!(can_open(&bitting(&[0, 0]), &bitting(&[0, 1])).unwrap());
    }

    #[test]
    fn test_single_pin_has_no_alternates() {
        for depth in 0u8..4 {
            for other in 0u8..4 {
                let expected = depth == other;
                assert_eq!(
                    can_open(&bitting(&[depth]), &bitting(&[other])).unwrap(),
                    expected,
                    "reference [{}] vs candidate [{}]",
                    depth,
                    other
                );
            }
        }
    }

    #[test]
    fn test_keyspace_can_open_validates_depths() {
        let keyspace = Keyspace::new(2, 3).unwrap();
        let result = keyspace.can_open(&bitting(&[0, 1]), &bitting(&[0, 5]));
        assert!(matches!(result, Err(AuditError::DepthOutOfRange { .. })));
    }
}
