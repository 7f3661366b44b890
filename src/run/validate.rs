//! Resolver validation run.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use log::{info, warn};

use crate::config::Config;
use crate::error_handling::{log_statistics, ProcessingStats};
use crate::resolver_list::{fetch_resolver_sources, load_resolver_list, write_resolver_list};
use crate::validator::{NameserverLookup, ResolverValidator, TrustDnsLookup};

use super::ValidationReport;

/// Validates the unchecked resolver list and writes the mass pool.
///
/// Candidates come from `config.mass_resolvers_unchecked` plus any HTTP
/// `sources`; the unchecked file itself is only read. Accepted resolvers are
/// written, sorted, to `config.mass_resolvers`.
///
/// # Errors
///
/// Returns an error if there are no candidates at all, or if a list file
/// cannot be read or written.
pub async fn validate_resolvers(config: &Config, sources: &[String]) -> Result<ValidationReport> {
    let stats = Arc::new(ProcessingStats::new());
    validate_resolvers_with(config, sources, TrustDnsLookup::new(Arc::clone(&stats)), stats).await
}

/// [`validate_resolvers`] with a caller-supplied lookup.
pub async fn validate_resolvers_with<L: NameserverLookup>(
    config: &Config,
    sources: &[String],
    lookup: L,
    stats: Arc<ProcessingStats>,
) -> Result<ValidationReport> {
    let start_time = Instant::now();
    let unchecked = &config.mass_resolvers_unchecked;

    let mut candidates = if unchecked.exists() {
        load_resolver_list(unchecked).await?
    } else if sources.is_empty() {
        bail!(
            "No resolver candidates: {} does not exist and no sources were given",
            unchecked.display()
        );
    } else {
        warn!("{} does not exist, using sources only", unchecked.display());
        Vec::new()
    };

    if !sources.is_empty() {
        candidates.extend(fetch_resolver_sources(sources).await?);
    }

    let candidates: HashSet<String> = candidates.into_iter().collect();
    let total = candidates.len();
    info!("Validating {} candidate resolvers", total);

    let validator = ResolverValidator::new(lookup, Arc::clone(&stats));
    let accepted = validator
        .validate(candidates, config.validator_concurrency)
        .await;

    write_resolver_list(&config.mass_resolvers, &accepted)
        .await
        .context("Failed to save validated resolvers")?;
    log_statistics(&stats);

    Ok(ValidationReport {
        candidates: total,
        accepted: accepted.len(),
        output: config.mass_resolvers.clone(),
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
