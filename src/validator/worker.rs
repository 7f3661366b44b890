//! Fixed-size worker pool for resolver validation.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::mpsc;

use super::{check_resolver, NameserverLookup, ProbeNames, Verdict};
use crate::config::VALIDATION_PROGRESS_INTERVAL;
use crate::error_handling::{InfoType, ProcessingStats};
use crate::models::ResolverAddress;

/// Drains `candidates` with `min(concurrency, candidates)` workers.
///
/// Workers pop from a shared queue until it is empty, so the number of tasks
/// never depends on the candidate count. Accepted candidates are sent over a
/// channel and collected once every worker has exited.
pub(super) async fn run_worker_pool<L: NameserverLookup>(
    lookup: Arc<L>,
    probes: Arc<ProbeNames>,
    stats: Arc<ProcessingStats>,
    candidates: Vec<ResolverAddress>,
    concurrency: usize,
) -> HashSet<ResolverAddress> {
    let total = candidates.len();
    if total == 0 {
        return HashSet::new();
    }

    let queue = Arc::new(Mutex::new(VecDeque::from(candidates)));
    let checked = Arc::new(AtomicUsize::new(0));
    let (accepted_tx, mut accepted_rx) = mpsc::unbounded_channel::<ResolverAddress>();

    let worker_count = concurrency.clamp(1, total);
    let mut workers = FuturesUnordered::new();
    for _ in 0..worker_count {
        let lookup = Arc::clone(&lookup);
        let probes = Arc::clone(&probes);
        let stats = Arc::clone(&stats);
        let queue = Arc::clone(&queue);
        let checked = Arc::clone(&checked);
        let accepted_tx = accepted_tx.clone();

        workers.push(tokio::spawn(async move {
            loop {
                let next = queue
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();
                let Some(candidate) = next else {
                    break;
                };

                match check_resolver(lookup.as_ref(), &candidate, &probes).await {
                    Verdict::Trusted => {
                        stats.increment_info(InfoType::ResolverAccepted);
                        // Receiver outlives every worker
                        let _ = accepted_tx.send(candidate);
                    }
                    Verdict::CanaryFailed => {
                        log::debug!("Rejected {candidate}: canary check failed");
                        stats.increment_info(InfoType::CanaryRejected);
                    }
                    Verdict::Hijacked => {
                        log::debug!("Rejected {candidate}: answered a nonexistent name");
                        stats.increment_info(InfoType::HijackRejected);
                    }
                }

                let done = checked.fetch_add(1, Ordering::SeqCst) + 1;
                if done % VALIDATION_PROGRESS_INTERVAL == 0 {
                    log::info!("Checked {done}/{total} resolver candidates");
                }
            }
        }));
    }
    drop(accepted_tx);

    while let Some(result) = workers.next().await {
        if let Err(join_error) = result {
            log::warn!("Validator worker panicked: {:?}", join_error);
        }
    }

    let mut accepted = HashSet::new();
    while let Some(candidate) = accepted_rx.recv().await {
        accepted.insert(candidate);
    }
    accepted
}
