//! Whole-run orchestration used by the binary.
//!
//! Each entry point wires the engines to their production dependencies, reads
//! and writes the files involved and returns a report. Unlike the engines,
//! these functions do fail: on unreadable inputs and unwritable outputs.

mod lookup;
mod resolve;
mod validate;

use std::path::PathBuf;

use crate::models::DnsRecord;

pub use lookup::lookup_names;
pub use resolve::{resolve_names, resolve_names_with};
pub use validate::{validate_resolvers, validate_resolvers_with};

/// Outcome of a resolver validation run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Distinct candidates checked
    pub candidates: usize,
    /// Candidates that passed both checks
    pub accepted: usize,
    /// File the accepted resolvers were written to
    pub output: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Outcome of a mass resolution run.
#[derive(Debug, Clone)]
pub struct ResolutionReport {
    /// Distinct names read from the input
    pub names: usize,
    /// Resolved records, sorted
    pub records: Vec<DnsRecord>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}
