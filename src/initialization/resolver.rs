//! DNS resolver initialization.
//!
//! This module builds trust-dns resolvers: one pinned to a single nameserver
//! for resolver vetting, and a general-purpose one for direct lookups.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::config::{DNS_TIMEOUT_SECS, VALIDATION_QUERY_TIMEOUT_SECS};

/// Parses a resolver address into a socket address.
///
/// Accepts `ip`, `ip:port` and `[ipv6]:port`; a bare IP gets port 53.
/// Returns `None` for anything else (hostnames are not accepted).
pub fn parse_nameserver(address: &str) -> Option<SocketAddr> {
    let trimmed = address.trim();
    if let Ok(socket) = trimmed.parse::<SocketAddr>() {
        return Some(socket);
    }
    trimmed
        .parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, 53))
}

/// Builds a resolver that talks to exactly one nameserver.
///
/// Used to vet that nameserver: one attempt, a short timeout, no cache (a
/// cached answer would hide what the nameserver itself returns), no hosts file
/// and no search-domain expansion.
pub fn init_single_nameserver_resolver(nameserver: SocketAddr) -> TokioAsyncResolver {
    let group = NameServerConfigGroup::from_ips_clear(&[nameserver.ip()], nameserver.port(), true);
    let config = ResolverConfig::from_parts(None, vec![], group);

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(VALIDATION_QUERY_TIMEOUT_SECS);
    opts.attempts = 1;
    opts.ndots = 0;
    opts.cache_size = 0;
    opts.use_hosts_file = false;

    TokioAsyncResolver::tokio(config, opts)
}

/// Initializes the DNS resolver for direct record lookups.
///
/// Uses the default upstream configuration (Google public DNS) with
/// aggressive timeouts to prevent hanging on slow or unresponsive servers.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    // Candidate names are absolute; never append search domains
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
