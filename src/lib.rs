//! bitting-audit: Pin-Tumbler Key Bitting Security Analysis
//!
//! Architecture:
//! - `radix`: integer <-> fixed-radix digit sequences (keyspace indexing)
//! - `compat`: can one key's bitting open another bitting's lock
//! - `scan`: keyspace enumeration built on `radix` and `compat`
//! - `report`: derived statistics for both enumeration operations
//! - `cli`: argument parsing for the driver binary
//!
//! The core is pure computation over small integer vectors: given the
//! correct bitting for a lock, `scan` finds every alternate bitting that
//! still operates it under rotational force and key withdrawal, and counts
//! how much of a full keyspace is unique versus duplicated.

pub mod cli;
pub mod compat;
pub mod error;
pub mod radix;
pub mod report;
pub mod scan;
pub mod types;
