//! Direct lookups for a handful of names.

use std::sync::Arc;

use log::info;

use crate::dns::{LookupCache, RecordResolver};
use crate::error_handling::{log_statistics, ProcessingStats};
use crate::initialization::init_resolver;
use crate::models::DnsRecord;

/// Resolves A and AAAA records for each name through the system resolver.
///
/// Names that do not resolve simply contribute nothing. Output is sorted and
/// deduplicated.
pub async fn lookup_names(names: &[String]) -> Vec<DnsRecord> {
    let stats = Arc::new(ProcessingStats::new());
    let resolver = RecordResolver::new(
        init_resolver(),
        Arc::new(LookupCache::new()),
        Arc::clone(&stats),
    );

    let mut records = Vec::new();
    for name in names {
        records.extend(resolver.resolve(name).await);
    }
    records.sort();
    records.dedup();
    info!("{} records for {} names", records.len(), names.len());
    log_statistics(&stats);
    records
}
