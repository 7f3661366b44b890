//! Mass resolution run.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::config::{Config, MassResolverConfig};
use crate::domain::{NameClassifier, PublicSuffixClassifier};
use crate::error_handling::{log_statistics, ProcessingStats};
use crate::initialization::{init_extractor, init_temp_directory};
use crate::mass_resolver::MassResolver;
use crate::massdns::{BatchResolver, MassDnsProcess};
use crate::models::RecordType;
use crate::utils::parse_line_list;

use super::{validate_resolvers, ResolutionReport};

/// Resolves every name in `names_file` through the mass pool with `massdns`.
///
/// The temp directory is created if needed. When the mass pool file is
/// missing it is rebuilt from the unchecked list first.
///
/// # Errors
///
/// Returns an error if the names file cannot be read, the temp directory
/// cannot be created, or the mass pool cannot be rebuilt.
pub async fn resolve_names(
    config: &Config,
    names_file: &Path,
    types: &[RecordType],
    detect_wildcards: bool,
    recheck: bool,
) -> Result<ResolutionReport> {
    init_temp_directory(&config.temp_directory).context("Failed to prepare temp directory")?;

    if !config.mass_resolvers.exists() {
        info!(
            "{} is missing, rebuilding it from {}",
            config.mass_resolvers.display(),
            config.mass_resolvers_unchecked.display()
        );
        validate_resolvers(config, &[])
            .await
            .context("Failed to rebuild the mass resolver pool")?;
    }

    let engine = MassResolver::new(
        MassDnsProcess::from_config(config),
        PublicSuffixClassifier::new(init_extractor()),
        MassResolverConfig::from(config),
        Arc::new(ProcessingStats::new()),
    );
    resolve_names_with(&engine, names_file, types, detect_wildcards, recheck).await
}

/// Runs an already built engine over the names in `names_file`.
pub async fn resolve_names_with<B: BatchResolver, C: NameClassifier>(
    engine: &MassResolver<B, C>,
    names_file: &Path,
    types: &[RecordType],
    detect_wildcards: bool,
    recheck: bool,
) -> Result<ResolutionReport> {
    let start_time = Instant::now();
    let content = tokio::fs::read_to_string(names_file)
        .await
        .with_context(|| format!("Failed to read names from {}", names_file.display()))?;
    let names = parse_line_list(&content.to_ascii_lowercase());
    info!("Resolving {} names from {}", names.len(), names_file.display());

    let mut records: Vec<_> = engine
        .mass_resolve(&names, types, detect_wildcards, recheck)
        .await
        .into_iter()
        .collect();
    records.sort();
    log_statistics(engine.stats());

    Ok(ResolutionReport {
        names: names.len(),
        records,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
