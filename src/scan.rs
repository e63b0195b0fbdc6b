//! Keyspace enumeration: every alternate for one bitting, and uniqueness
//! counts across an entire keyspace.
//!
//! Both operations brute-force `cut_count ^ num_pins` candidates, and the
//! uniqueness count is quadratic on top of that. The blow-up is inherent to
//! the pairwise design, so the entry points refuse keyspaces above
//! [`MAX_EXHAUSTIVE_COMBINATIONS`] unless told otherwise, and the long scan
//! can be cancelled and partitioned across threads.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::compat::opens;
use crate::error::{AuditError, Result};
use crate::types::{Bitting, Keyspace};

/// Largest keyspace the exhaustive scans accept by default.
///
/// 65 536 bittings keeps the quadratic uniqueness count in the seconds
/// range on a single core. A 5-pin, 9-cut cylinder (59 049 bittings) fits;
/// a 6-pin one does not and needs [`ScanOptions::ignore_limit`].
pub const MAX_EXHAUSTIVE_COMBINATIONS: u128 = 1 << 16;

/// How often the inner scan loop consults the cancel flag.
const CANCEL_CHECK_INTERVAL: u128 = 1024;

/// Tuning for the exhaustive scans.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'a> {
    /// Partition the outer uniqueness loop across the rayon pool.
    pub parallel: bool,
    /// Cooperative cancellation, checked inside both scan loops.
    pub cancel: Option<&'a AtomicBool>,
    /// Scan even when the keyspace exceeds [`MAX_EXHAUSTIVE_COMBINATIONS`].
    pub ignore_limit: bool,
}

/// Lazy stream of working alternates for one reference bitting.
///
/// Yields candidates in increasing index order, starting strictly above the
/// reference's own index, so the reference never reports itself. Candidates
/// below the reference are not visited; the uniqueness scan in
/// [`Keyspace::count_unique`] checks both directions instead.
#[derive(Debug, Clone)]
pub struct Alternates {
    keyspace: Keyspace,
    reference: Bitting,
    next: u128,
}

impl Iterator for Alternates {
    type Item = Bitting;

    fn next(&mut self) -> Option<Bitting> {
        while self.next < self.keyspace.size() {
            let candidate = self.keyspace.bitting_at(self.next);
            self.next += 1;
            if opens(self.reference.cuts(), candidate.cuts()) {
                return Some(candidate);
            }
        }
        None
    }
}

impl Keyspace {
    /// Every bitting strictly above `reference` (by index) that opens it.
    ///
    /// Each call builds a fresh iterator over the same ordered sequence;
    /// nothing is cached between calls.
    pub fn find_alternates(&self, reference: &Bitting) -> Result<Alternates> {
        self.validate(reference)?;
        Ok(Alternates {
            keyspace: *self,
            reference: reference.clone(),
            next: self.index_of(reference) + 1,
        })
    }

    /// Does any *other* bitting in the keyspace open `reference`?
    ///
    /// Unlike [`find_alternates`](Self::find_alternates) this scans the
    /// whole keyspace, both below and above the reference, stopping at the
    /// first match.
    pub fn has_alternate(&self, reference: &Bitting) -> Result<bool> {
        self.validate(reference)?;
        self.scan_for_alternate(reference, self.index_of(reference), None)
    }

    /// Number of bittings with no working alternate anywhere in the
    /// keyspace.
    ///
    /// Worst case `size^2` compatibility checks, tractable only for small
    /// pin and cut counts. Refuses keyspaces above
    /// [`MAX_EXHAUSTIVE_COMBINATIONS`]; use
    /// [`count_unique_with`](Self::count_unique_with) to override that,
    /// cancel mid-scan, or parallelize.
    pub fn count_unique(&self) -> Result<u128> {
        self.count_unique_with(&ScanOptions::default())
    }

    /// [`count_unique`](Self::count_unique) under explicit [`ScanOptions`].
    pub fn count_unique_with(&self, options: &ScanOptions<'_>) -> Result<u128> {
        let total = self.size();
        if !options.ignore_limit && total > MAX_EXHAUSTIVE_COMBINATIONS {
            return Err(AuditError::KeyspaceTooLarge {
                combinations: total,
                limit: MAX_EXHAUSTIVE_COMBINATIONS,
            });
        }
        let with_alternates = if options.parallel {
            self.count_with_alternates_parallel(options.cancel)?
        } else {
            self.count_with_alternates_serial(options.cancel)?
        };
        Ok(total - with_alternates)
    }

    /// Inner scan of the uniqueness count: first bitting other than the
    /// reference that opens it, short-circuiting on a match.
    fn scan_for_alternate(
        &self,
        reference: &Bitting,
        reference_index: u128,
        cancel: Option<&AtomicBool>,
    ) -> Result<bool> {
        for index in 0..self.size() {
            if index % CANCEL_CHECK_INTERVAL == 0 {
                check_cancel(cancel)?;
            }
            if index == reference_index {
                continue;
            }
            let candidate = self.bitting_at(index);
            if opens(reference.cuts(), candidate.cuts()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn count_with_alternates_serial(&self, cancel: Option<&AtomicBool>) -> Result<u128> {
        let mut with_alternates = 0u128;
        for index in 0..self.size() {
            check_cancel(cancel)?;
            let reference = self.bitting_at(index);
            if self.scan_for_alternate(&reference, index, cancel)? {
                with_alternates += 1;
            }
        }
        Ok(with_alternates)
    }

    fn count_with_alternates_parallel(&self, cancel: Option<&AtomicBool>) -> Result<u128> {
        // Outer iterations are independent pure computations; the final
        // count is an associative sum of per-partition counts.
        let total = u64::try_from(self.size()).map_err(|_| AuditError::KeyspaceTooLarge {
            combinations: self.size(),
            limit: u128::from(u64::MAX),
        })?;
        (0..total)
            .into_par_iter()
            .try_fold(
                || 0u128,
                |acc, index| {
                    check_cancel(cancel)?;
                    let index = u128::from(index);
                    let reference = self.bitting_at(index);
                    let found = self.scan_for_alternate(&reference, index, cancel)?;
                    Ok(acc + u128::from(found))
                },
            )
            .try_reduce(|| 0, |a, b| Ok(a + b))
    }
}

#[inline]
fn check_cancel(cancel: Option<&AtomicBool>) -> Result<()> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(AuditError::Cancelled),
        _ => Ok(()),
    }
}
