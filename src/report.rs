//! Derived statistics for the two enumeration operations.
//!
//! These structs are the reporting surface of the driver binary: plain
//! data, serializable to JSON, printable as console text.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::scan::ScanOptions;
use crate::types::{Bitting, Keyspace};

/// Outcome of the alternate scan for one reference bitting.
#[derive(Debug, Clone, Serialize)]
pub struct AlternateReport {
    pub reference: Bitting,
    pub num_pins: usize,
    pub cut_count: u8,
    pub total_combinations: u128,
    pub alternate_count: usize,
    /// Share of the keyspace that opens this lock, in percent.
    pub duplicate_likelihood_pct: f64,
    pub alternates: Vec<Bitting>,
}

impl AlternateReport {
    /// Run the alternate scan for `reference` and collect the statistics.
    pub fn generate(keyspace: &Keyspace, reference: &Bitting) -> Result<Self> {
        let alternates: Vec<Bitting> = keyspace.find_alternates(reference)?.collect();
        let total = keyspace.size();
        let count = alternates.len();
        Ok(Self {
            reference: reference.clone(),
            num_pins: keyspace.num_pins(),
            cut_count: keyspace.cut_count(),
            total_combinations: total,
            alternate_count: count,
            duplicate_likelihood_pct: percentage(count as u128, total),
            alternates,
        })
    }
}

impl fmt::Display for AlternateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reference bitting:    {} ({} pins, {} cuts)",
            self.reference, self.num_pins, self.cut_count
        )?;
        writeln!(f, "Keyspace size:        {}", self.total_combinations)?;
        writeln!(f, "Working alternates:   {}", self.alternate_count)?;
        write!(
            f,
            "Duplicate likelihood: {:.4}%",
            self.duplicate_likelihood_pct
        )?;
        if !self.alternates.is_empty() {
            write!(f, "\nAlternates:")?;
            for (i, alternate) in self.alternates.iter().enumerate() {
                if i % 10 == 0 {
                    write!(f, "\n  ")?;
                } else {
                    write!(f, " ")?;
                }
                write!(f, "{}", alternate)?;
            }
        }
        Ok(())
    }
}

/// Uniqueness statistics across an entire keyspace.
#[derive(Debug, Clone, Serialize)]
pub struct UniquenessReport {
    pub num_pins: usize,
    pub cut_count: u8,
    pub total_combinations: u128,
    pub unique: u128,
    pub duplicates: u128,
    pub duplicate_pct: f64,
}

impl UniquenessReport {
    /// Run the full uniqueness scan and collect the statistics.
    pub fn generate(keyspace: &Keyspace, options: &ScanOptions<'_>) -> Result<Self> {
        let total = keyspace.size();
        let unique = keyspace.count_unique_with(options)?;
        let duplicates = total - unique;
        Ok(Self {
            num_pins: keyspace.num_pins(),
            cut_count: keyspace.cut_count(),
            total_combinations: total,
            unique,
            duplicates,
            duplicate_pct: percentage(duplicates, total),
        })
    }
}

impl fmt::Display for UniquenessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Keyspace:             {} pins x {} cuts",
            self.num_pins, self.cut_count
        )?;
        writeln!(f, "Total combinations:   {}", self.total_combinations)?;
        writeln!(f, "Unique bittings:      {}", self.unique)?;
        writeln!(f, "With duplicates:      {}", self.duplicates)?;
        write!(f, "Percent duplicated:   {:.4}%", self.duplicate_pct)
    }
}

fn percentage(part: u128, total: u128) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64) * 100.0
}
