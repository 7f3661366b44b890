//! Resolver trust validation.
//!
//! Vets candidate nameservers before they are used for bulk resolution. A
//! candidate is trusted only if it
//! 1. answers the canary name (`dns.google`) with its known address, and
//! 2. returns nothing for a random name that cannot exist.
//!
//! The second check catches resolvers that fabricate answers for NXDOMAIN
//! (ad-injecting ISPs, captive portals, hijacking middleboxes). The random name
//! is generated once per [`ResolverValidator::validate`] call so no resolver
//! can have it cached from an earlier run.
//!
//! Every query fault degrades to "no records" for that query. A broken
//! candidate is rejected; the batch is never aborted.

mod lookup;
mod worker;

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::config::{CANARY_ADDRESS, CANARY_NAME, NONEXISTENT_SUFFIX};
use crate::error_handling::ProcessingStats;
use crate::models::{DnsRecord, RecordType, ResolverAddress};
use crate::utils::random_label;

pub use lookup::{PinnedResolver, TrustDnsLookup};

/// Queries one specific nameserver for the A records of a name.
///
/// `connect` pins a handle to a single nameserver; every query for that
/// candidate goes through the same handle. Lookups must be fail-open:
/// timeouts, malformed responses and transport errors all yield an empty
/// vector.
pub trait NameserverLookup: Send + Sync + 'static {
    type Server: Send + Sync;

    /// `None` when the address cannot be used at all.
    fn connect(&self, nameserver: &str) -> Option<Self::Server>;

    fn lookup_a<'a>(&'a self, server: &'a Self::Server, name: &'a str)
        -> BoxFuture<'a, Vec<DnsRecord>>;
}

/// Outcome of vetting one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Passed both checks
    Trusted,
    /// Canary missing, wrong or timed out
    CanaryFailed,
    /// Answered a name that does not exist
    Hijacked,
}

/// The two probe names of one validation run.
#[derive(Debug, Clone)]
pub struct ProbeNames {
    pub canary_name: String,
    pub canary_address: String,
    pub nonexistent_name: String,
}

impl ProbeNames {
    /// Builds probes for a new run with a freshly generated nonexistent name.
    pub fn fresh(canary_name: &str, canary_address: &str) -> Self {
        Self {
            canary_name: canary_name.to_string(),
            canary_address: canary_address.to_string(),
            nonexistent_name: format!("{}.{}", random_label(), NONEXISTENT_SUFFIX),
        }
    }

    fn canary_matches(&self, records: &[DnsRecord]) -> bool {
        records.iter().any(|record| {
            record.record_type == RecordType::A
                && record.name.eq_ignore_ascii_case(&self.canary_name)
                && record.data == self.canary_address
        })
    }
}

/// Runs both checks against one nameserver.
///
/// Both queries share one connection. The nonexistent-name query is skipped
/// when the canary already failed.
pub async fn check_resolver<L: NameserverLookup + ?Sized>(
    lookup: &L,
    nameserver: &str,
    probes: &ProbeNames,
) -> Verdict {
    let Some(server) = lookup.connect(nameserver) else {
        return Verdict::CanaryFailed;
    };

    let canary = lookup.lookup_a(&server, &probes.canary_name).await;
    if !probes.canary_matches(&canary) {
        return Verdict::CanaryFailed;
    }

    let hijack = lookup.lookup_a(&server, &probes.nonexistent_name).await;
    if !hijack.is_empty() {
        return Verdict::Hijacked;
    }

    Verdict::Trusted
}

/// Filters candidate resolvers down to the trustworthy ones.
pub struct ResolverValidator<L> {
    lookup: Arc<L>,
    stats: Arc<ProcessingStats>,
    canary_name: String,
    canary_address: String,
}

impl<L: NameserverLookup> ResolverValidator<L> {
    pub fn new(lookup: L, stats: Arc<ProcessingStats>) -> Self {
        Self {
            lookup: Arc::new(lookup),
            stats,
            canary_name: CANARY_NAME.to_string(),
            canary_address: CANARY_ADDRESS.to_string(),
        }
    }

    /// Replaces the canary name and its expected A record.
    pub fn with_canary(mut self, name: &str, address: &str) -> Self {
        self.canary_name = name.to_string();
        self.canary_address = address.to_string();
        self
    }

    /// Returns the candidates that pass both checks.
    ///
    /// At most `concurrency` candidates are checked at once (at least one).
    /// Blocks until every candidate has been checked; output order is not
    /// meaningful.
    pub async fn validate(
        &self,
        candidates: HashSet<ResolverAddress>,
        concurrency: usize,
    ) -> HashSet<ResolverAddress> {
        let probes = ProbeNames::fresh(&self.canary_name, &self.canary_address);
        log::info!(
            "Validating {} resolvers with {} workers (hijack probe: {})",
            candidates.len(),
            concurrency.max(1).min(candidates.len().max(1)),
            probes.nonexistent_name
        );

        let accepted = worker::run_worker_pool(
            Arc::clone(&self.lookup),
            Arc::new(probes),
            Arc::clone(&self.stats),
            candidates.into_iter().collect(),
            concurrency,
        )
        .await;

        log::info!("{} resolvers passed validation", accepted.len());
        accepted
    }
}
