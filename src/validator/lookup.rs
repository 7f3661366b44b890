//! Production [`NameserverLookup`] backed by trust-dns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use trust_dns_resolver::proto::rr::RecordType as WireRecordType;
use trust_dns_resolver::TokioAsyncResolver;

use super::NameserverLookup;
use crate::config::VALIDATION_QUERY_TIMEOUT_SECS;
use crate::dns::{is_no_records, records_from_lookup};
use crate::error_handling::{ErrorType, ProcessingStats, WarningType};
use crate::initialization::{init_single_nameserver_resolver, parse_nameserver};
use crate::models::DnsRecord;

/// Sends each query straight to the nameserver under test.
///
/// Each candidate gets its own single-server resolver with caching
/// disabled, so no answer is ever served from a cache or from a different
/// server.
pub struct TrustDnsLookup {
    stats: Arc<ProcessingStats>,
}

/// Resolver pinned to one candidate nameserver.
pub struct PinnedResolver {
    address: SocketAddr,
    resolver: TokioAsyncResolver,
}

impl PinnedResolver {
    pub fn address(&self) -> SocketAddr {
        self.address
    }
}

impl TrustDnsLookup {
    pub fn new(stats: Arc<ProcessingStats>) -> Self {
        Self { stats }
    }

    fn pin(&self, nameserver: &str) -> Option<PinnedResolver> {
        let Some(address) = parse_nameserver(nameserver) else {
            log::debug!("Skipping unparsable nameserver address {nameserver:?}");
            self.stats
                .increment_warning(WarningType::UnparsableNameserver);
            return None;
        };
        Some(PinnedResolver {
            address,
            resolver: init_single_nameserver_resolver(address),
        })
    }

    async fn query(&self, server: &PinnedResolver, name: &str) -> Vec<DnsRecord> {
        // Outer guard in case the resolver's own timeout is not honoured
        let deadline = Duration::from_secs(VALIDATION_QUERY_TIMEOUT_SECS + 1);
        let nameserver = server.address;

        match tokio::time::timeout(deadline, server.resolver.lookup(name, WireRecordType::A)).await
        {
            Ok(Ok(lookup)) => records_from_lookup(&lookup),
            Ok(Err(e)) if is_no_records(&e) => Vec::new(),
            Ok(Err(e)) => {
                log::debug!("Query for {name} via {nameserver} failed: {e}");
                self.stats.increment_error(ErrorType::QueryFault);
                Vec::new()
            }
            Err(_) => {
                log::debug!("Query for {name} via {nameserver} timed out");
                self.stats.increment_error(ErrorType::QueryFault);
                Vec::new()
            }
        }
    }
}

impl NameserverLookup for TrustDnsLookup {
    type Server = PinnedResolver;

    fn connect(&self, nameserver: &str) -> Option<PinnedResolver> {
        self.pin(nameserver)
    }

    fn lookup_a<'a>(
        &'a self,
        server: &'a PinnedResolver,
        name: &'a str,
    ) -> BoxFuture<'a, Vec<DnsRecord>> {
        self.query(server, name).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_pins_parsed_address() {
        let stats = Arc::new(ProcessingStats::new());
        let lookup = TrustDnsLookup::new(Arc::clone(&stats));

        let server = lookup.connect("192.0.2.10").expect("address should parse");
        assert_eq!(server.address(), "192.0.2.10:53".parse().unwrap());

        let server = lookup.connect("192.0.2.11:5353").expect("address should parse");
        assert_eq!(server.address(), "192.0.2.11:5353".parse().unwrap());
        assert_eq!(stats.get_warning_count(WarningType::UnparsableNameserver), 0);
    }

    #[tokio::test]
    async fn test_connect_rejects_unparsable_address() {
        let stats = Arc::new(ProcessingStats::new());
        let lookup = TrustDnsLookup::new(Arc::clone(&stats));

        assert!(lookup.connect("not-an-address").is_none());
        assert_eq!(stats.get_warning_count(WarningType::UnparsableNameserver), 1);
    }
}
