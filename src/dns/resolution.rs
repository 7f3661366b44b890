//! Direct record lookups with an instance-owned cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use trust_dns_resolver::TokioAsyncResolver;

use super::records::{is_no_records, records_from_lookup, wire_record_type};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::models::{strip_root_dot, DnsRecord, RecordType};

/// Memoised lookup results keyed by `(name, type)`.
///
/// Owned by whoever builds the [`RecordResolver`]; two resolvers only share
/// answers when the caller hands them the same `Arc<LookupCache>`.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: Mutex<HashMap<(String, RecordType), Vec<DnsRecord>>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str, record_type: RecordType) -> Option<Vec<DnsRecord>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&(name.to_string(), record_type))
            .cloned()
    }

    pub fn insert(&self, name: &str, record_type: RecordType, records: Vec<DnsRecord>) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert((name.to_string(), record_type), records);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves individual names to their A and AAAA records.
pub struct RecordResolver {
    resolver: Arc<TokioAsyncResolver>,
    cache: Arc<LookupCache>,
    stats: Arc<ProcessingStats>,
}

impl RecordResolver {
    pub fn new(
        resolver: Arc<TokioAsyncResolver>,
        cache: Arc<LookupCache>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            resolver,
            cache,
            stats,
        }
    }

    /// Resolves the A and AAAA records of `name`.
    ///
    /// CNAME links returned along the way are included. Transport faults yield
    /// no records for that type and are not cached; definitive answers
    /// (including "no records") are.
    pub async fn resolve(&self, name: &str) -> Vec<DnsRecord> {
        let mut records = self.lookup(name, RecordType::A).await;
        records.extend(self.lookup(name, RecordType::AAAA).await);
        records
    }

    /// Resolves one record type for `name`, consulting the cache first.
    pub async fn lookup(&self, name: &str, record_type: RecordType) -> Vec<DnsRecord> {
        let name = strip_root_dot(name.trim()).to_ascii_lowercase();
        if let Some(cached) = self.cache.get(&name, record_type) {
            return cached;
        }

        match self
            .resolver
            .lookup(name.as_str(), wire_record_type(record_type))
            .await
        {
            Ok(lookup) => {
                let records = records_from_lookup(&lookup);
                self.cache.insert(&name, record_type, records.clone());
                records
            }
            Err(e) if is_no_records(&e) => {
                self.cache.insert(&name, record_type, Vec::new());
                Vec::new()
            }
            Err(e) => {
                log::debug!("{record_type} lookup failed for {name}: {e}");
                self.stats.increment_error(ErrorType::QueryFault);
                Vec::new()
            }
        }
    }
}
