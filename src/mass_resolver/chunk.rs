//! Sequential chunked batch resolution.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};
use crate::massdns::BatchResolver;
use crate::models::{DnsRecord, RecordType};

/// Limits applied to every chunk.
#[derive(Debug, Clone, Copy)]
pub(super) struct ChunkLimits {
    pub chunk_size: usize,
    /// `None` keeps every chunk, however large
    pub overload_threshold: Option<usize>,
}

/// Resolves `names` in chunks through `batch`, one chunk at a time.
///
/// Answers of a type outside `types` or with data in `blacklist` are dropped.
/// A chunk that fails, or whose distinct results exceed the overload
/// threshold when one is set, contributes nothing.
pub(super) async fn resolve_chunked<B: BatchResolver + ?Sized>(
    batch: &B,
    names: &[String],
    types: &[RecordType],
    pool: &Path,
    blacklist: &HashSet<String>,
    limits: ChunkLimits,
    stats: &ProcessingStats,
) -> HashSet<DnsRecord> {
    let mut results = HashSet::new();
    let chunk_size = limits.chunk_size.max(1);
    let total_chunks = names.len().div_ceil(chunk_size);

    for (index, chunk) in names.chunks(chunk_size).enumerate() {
        let position = index + 1;
        info!(
            "Resolving chunk {}/{} ({} names) via {}",
            position,
            total_chunks,
            chunk.len(),
            pool.display()
        );

        let output = match batch.resolve_batch(chunk, types, pool).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Chunk {position}/{total_chunks} produced no results: {e}");
                stats.increment_error(ErrorType::BatchProcessFailed);
                continue;
            }
        };
        stats.add_warning(WarningType::MalformedOutputLine, output.malformed_lines);

        let mut chunk_results = HashSet::new();
        let mut blacklisted = 0;
        for record in output.answers {
            if !types.contains(&record.record_type) {
                continue;
            }
            if blacklist.contains(&record.data) {
                blacklisted += 1;
                continue;
            }
            chunk_results.insert(record);
        }
        stats.add_info(InfoType::BlacklistedAnswer, blacklisted);

        if let Some(threshold) = limits.overload_threshold {
            if chunk_results.len() > threshold {
                warn!(
                    "Chunk {}/{} returned {} distinct records (threshold {}), discarding it as unfiltered wildcard noise",
                    position,
                    total_chunks,
                    chunk_results.len(),
                    threshold
                );
                stats.increment_warning(WarningType::ChunkOverloaded);
                continue;
            }
        }
        results.extend(chunk_results);
    }

    results
}
