//! DNS record querying through trust-dns.
//!
//! This module provides:
//! - Conversion of trust-dns answers into [`DnsRecord`](crate::models::DnsRecord)s
//! - Direct A/AAAA lookups backed by a caller-owned cache
//!
//! All queries are fail-open: a fault yields no records, never an error.

mod records;
mod resolution;

// Re-export public API
pub use records::{is_no_records, records_from_lookup};
pub use resolution::{LookupCache, RecordResolver};
