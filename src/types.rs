//! Core value types: a key bitting and the keyspace it lives in.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{AuditError, Result};
use crate::radix;

/// A key bitting: one cut depth per pin, key tip first, bow last.
///
/// Cut depths count from 0 (a Schlage key stamped 22224 is `[1,1,1,1,3]`).
/// Two bittings with equal cut sequences are the same bitting; there is no
/// identity beyond the value.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct Bitting(Vec<u8>);

impl Bitting {
    pub fn new(cuts: Vec<u8>) -> Self {
        Self(cuts)
    }

    #[inline]
    pub fn cuts(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deepest cut on the key, `None` for an empty bitting.
    pub fn max_cut(&self) -> Option<u8> {
        self.0.iter().copied().max()
    }
}

impl fmt::Display for Bitting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|&depth| depth < 10) {
            for depth in &self.0 {
                write!(f, "{}", depth)?;
            }
            Ok(())
        } else {
            // Depths of 10 or more need a separator to stay unambiguous.
            let joined = self
                .0
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join("-");
            write!(f, "{}", joined)
        }
    }
}

impl FromStr for Bitting {
    type Err = AuditError;

    /// Accepts bare digit strings ("11113") for depths below 10 and
    /// comma-separated depths ("10,2,11,0") for deeper systems.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AuditError::InvalidBitting("empty string".into()));
        }
        let cuts = if s.contains(',') {
            s.split(',')
                .map(|part| {
                    part.trim().parse::<u8>().map_err(|e| {
                        AuditError::InvalidBitting(format!("bad cut '{}': {}", part.trim(), e))
                    })
                })
                .collect::<Result<Vec<u8>>>()?
        } else {
            s.chars()
                .map(|c| {
                    c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                        AuditError::InvalidBitting(format!("bad cut digit '{}'", c))
                    })
                })
                .collect::<Result<Vec<u8>>>()?
        };
        Ok(Self(cuts))
    }
}

/// All bittings of a fixed pin count over a uniform per-pin cut range.
///
/// The set is never materialized. Members are addressed by index in
/// `0..size()`, where a bitting's index is its cut sequence read as a
/// base-`cut_count` integer, tip digit most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyspace {
    num_pins: usize,
    cut_count: u8,
    size: u128,
}

impl Keyspace {
    pub fn new(num_pins: usize, cut_count: u8) -> Result<Self> {
        if cut_count < 2 {
            return Err(AuditError::CutCountTooSmall { got: cut_count });
        }
        if num_pins < 1 {
            return Err(AuditError::NoPins);
        }
        let size = u32::try_from(num_pins)
            .ok()
            .and_then(|pins| u128::from(cut_count).checked_pow(pins))
            .ok_or(AuditError::KeyspaceOverflow {
                num_pins,
                cut_count,
            })?;
        Ok(Self {
            num_pins,
            cut_count,
            size,
        })
    }

    #[inline]
    pub fn num_pins(&self) -> usize {
        self.num_pins
    }

    #[inline]
    pub fn cut_count(&self) -> u8 {
        self.cut_count
    }

    /// Total number of bittings, `cut_count ^ num_pins`.
    #[inline]
    pub fn size(&self) -> u128 {
        self.size
    }

    /// Check that a bitting belongs to this keyspace.
    pub fn validate(&self, bitting: &Bitting) -> Result<()> {
        if bitting.len() != self.num_pins {
            return Err(AuditError::LengthMismatch {
                expected: self.num_pins,
                got: bitting.len(),
            });
        }
        for (pin, &depth) in bitting.cuts().iter().enumerate() {
            if depth >= self.cut_count {
                return Err(AuditError::DepthOutOfRange {
                    pin,
                    depth,
                    cut_count: self.cut_count,
                });
            }
        }
        Ok(())
    }

    /// Materialize the bitting at `index`. The index must be below `size()`.
    pub fn bitting_at(&self, index: u128) -> Bitting {
        debug_assert!(index < self.size, "index {} outside keyspace", index);
        Bitting::new(radix::to_digits_padded(index, self.cut_count, self.num_pins))
    }

    /// Index of a bitting already validated against this keyspace.
    pub fn index_of(&self, bitting: &Bitting) -> u128 {
        radix::from_digits(bitting.cuts(), self.cut_count)
    }
}
