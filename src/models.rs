//! Core data types shared by the validator and the mass resolver.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Textual address of a nameserver (`ip`, `ip:port` or `[ipv6]:port`).
pub type ResolverAddress = String;

/// DNS record types the engines can request from resolvers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    TXT,
    PTR,
    SOA,
    SRV,
    CAA,
}

/// Record types resolved when the caller does not ask for anything else.
pub const DEFAULT_RECORD_TYPES: &[RecordType] = &[RecordType::A, RecordType::CNAME];

/// A single resolved record.
///
/// Identity is the full `(name, type, data)` triple, so a `HashSet<DnsRecord>`
/// collapses the same answer returned by different resolvers. Neither `name`
/// nor `data` carries a trailing root dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub data: String,
}

impl DnsRecord {
    /// Builds a record, stripping trailing root-zone dots from name and data.
    pub fn new(name: &str, record_type: RecordType, data: &str) -> Self {
        Self {
            name: strip_root_dot(name).to_string(),
            record_type,
            data: strip_root_dot(data).to_string(),
        }
    }
}

/// Removes a single trailing `.` (the root label) from a DNS name.
pub fn strip_root_dot(value: &str) -> &str {
    value.strip_suffix('.').unwrap_or(value)
}
