//! Wildcard-aware mass resolution.
//!
//! Names are resolved in sequential chunks through a [`BatchResolver`]. Before
//! the real names go out, random-label probes are sent to every apex (and
//! sub-apex) they belong to; whatever those probes resolve to is wildcard
//! noise and is blacklisted from the real results. An optional recheck
//! re-resolves the survivors through the small trusted pool.

mod chunk;
mod probes;

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::config::MassResolverConfig;
use crate::domain::NameClassifier;
use crate::error_handling::{InfoType, ProcessingStats};
use crate::massdns::BatchResolver;
use crate::models::{DnsRecord, RecordType};
use crate::utils::random_label;

use chunk::{resolve_chunked, ChunkLimits};
pub use probes::generate_probes;

/// Resolves large name lists while filtering wildcard answers.
pub struct MassResolver<B, C> {
    batch: B,
    classifier: C,
    config: MassResolverConfig,
    stats: Arc<ProcessingStats>,
}

impl<B: BatchResolver, C: NameClassifier> MassResolver<B, C> {
    pub fn new(
        batch: B,
        classifier: C,
        config: MassResolverConfig,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            batch,
            classifier,
            config,
            stats,
        }
    }

    pub fn config(&self) -> &MassResolverConfig {
        &self.config
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Resolves `names` through the resolvers listed in `pool`.
    ///
    /// With `recheck`, the names that produced records are resolved again
    /// through the trusted pool and that output is returned instead.
    pub async fn resolve(
        &self,
        names: &[String],
        types: &[RecordType],
        pool: &Path,
        detect_wildcards: bool,
        recheck: bool,
    ) -> HashSet<DnsRecord> {
        let results = self.resolve_once(names, types, pool, detect_wildcards).await;
        if !recheck {
            return results;
        }

        let survivors: Vec<String> = results
            .into_iter()
            .map(|record| record.name)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        info!(
            "Rechecking {} names through {}",
            survivors.len(),
            self.config.trusted_resolvers.display()
        );
        self.resolve_once(
            &survivors,
            types,
            &self.config.trusted_resolvers,
            detect_wildcards,
        )
        .await
    }

    /// Resolves through the trusted pool, without recheck.
    pub async fn trusted_resolve(
        &self,
        names: &[String],
        types: &[RecordType],
        detect_wildcards: bool,
    ) -> HashSet<DnsRecord> {
        self.resolve(
            names,
            types,
            &self.config.trusted_resolvers,
            detect_wildcards,
            false,
        )
        .await
    }

    /// Resolves through the mass pool.
    pub async fn mass_resolve(
        &self,
        names: &[String],
        types: &[RecordType],
        detect_wildcards: bool,
        recheck: bool,
    ) -> HashSet<DnsRecord> {
        self.resolve(
            names,
            types,
            &self.config.mass_resolvers,
            detect_wildcards,
            recheck,
        )
        .await
    }

    async fn resolve_once(
        &self,
        names: &[String],
        types: &[RecordType],
        pool: &Path,
        detect_wildcards: bool,
    ) -> HashSet<DnsRecord> {
        let no_blacklist = HashSet::new();
        let mut probe_results = HashSet::new();
        let mut blacklist = HashSet::new();

        if detect_wildcards {
            let probes = generate_probes(names, &self.classifier, &random_label(), &self.stats);
            info!("Sending {} wildcard probes for {} names", probes.len(), names.len());
            // Always through the mass pool. Every answer here is a wildcard
            // value, so the overload guard does not apply.
            probe_results = self
                .chunked(&probes, types, &self.config.mass_resolvers, &no_blacklist, false)
                .await;
            blacklist = probe_results
                .iter()
                .map(|record| record.data.clone())
                .collect();
            self.stats.add_info(InfoType::WildcardValue, blacklist.len());
            if !blacklist.is_empty() {
                log::debug!("Wildcard values: {:?}", blacklist);
            }
        }

        let mut results = self.chunked(names, types, pool, &blacklist, true).await;

        if !blacklist.is_empty() {
            // Wildcards that CNAME elsewhere: resolve the targets themselves
            let targets: Vec<String> = probe_results
                .iter()
                .filter(|record| record.record_type == RecordType::CNAME)
                .map(|record| record.data.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            if !targets.is_empty() {
                info!("Resolving {} wildcard CNAME targets", targets.len());
                let chained = self
                    .chunked(&targets, types, pool, &no_blacklist, false)
                    .await;
                results.extend(chained);
            }
        }

        results
    }

    async fn chunked(
        &self,
        names: &[String],
        types: &[RecordType],
        pool: &Path,
        blacklist: &HashSet<String>,
        guarded: bool,
    ) -> HashSet<DnsRecord> {
        let limits = ChunkLimits {
            chunk_size: self.config.chunk_size,
            overload_threshold: guarded.then_some(self.config.overload_threshold),
        };
        resolve_chunked(&self.batch, names, types, pool, blacklist, limits, &self.stats).await
    }
}
