//! Conversion of trust-dns answers into [`DnsRecord`]s.

use std::str::FromStr;

use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::lookup::Lookup;
use trust_dns_resolver::proto::rr::RecordType as WireRecordType;

use crate::models::{DnsRecord, RecordType};

/// Converts every answer record of a lookup, CNAME links included.
///
/// Records of a type this crate does not model are skipped.
pub fn records_from_lookup(lookup: &Lookup) -> Vec<DnsRecord> {
    lookup
        .record_iter()
        .filter_map(|record| {
            let data = record.data()?;
            let record_type = RecordType::from_str(&record.record_type().to_string()).ok()?;
            Some(DnsRecord::new(
                &record.name().to_utf8(),
                record_type,
                &data.to_string(),
            ))
        })
        .collect()
}

/// True when the error is a definitive "name has no such records" answer
/// (NXDOMAIN or NODATA) rather than a transport fault.
pub fn is_no_records(error: &ResolveError) -> bool {
    matches!(error.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

/// Maps a record type onto the wire type used by trust-dns.
pub fn wire_record_type(record_type: RecordType) -> WireRecordType {
    match record_type {
        RecordType::A => WireRecordType::A,
        RecordType::AAAA => WireRecordType::AAAA,
        RecordType::CNAME => WireRecordType::CNAME,
        RecordType::MX => WireRecordType::MX,
        RecordType::NS => WireRecordType::NS,
        RecordType::TXT => WireRecordType::TXT,
        RecordType::PTR => WireRecordType::PTR,
        RecordType::SOA => WireRecordType::SOA,
        RecordType::SRV => WireRecordType::SRV,
        RecordType::CAA => WireRecordType::CAA,
    }
}
