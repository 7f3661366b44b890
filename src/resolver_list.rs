//! Resolver list files and public resolver sources.
//!
//! A resolver list is a plain text file with one nameserver address per line.
//! Blank lines and `#` comments are ignored when reading.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;

use crate::config::{
    RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_SECS,
    SOURCE_FETCH_TIMEOUT,
};
use crate::models::ResolverAddress;
use crate::utils::parse_line_list;

/// Reads a resolver list, in file order with duplicates removed.
pub async fn load_resolver_list(path: &Path) -> Result<Vec<ResolverAddress>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read resolver list {}", path.display()))?;
    let resolvers = parse_line_list(&content);
    debug!("Loaded {} resolvers from {}", resolvers.len(), path.display());
    Ok(resolvers)
}

/// Writes resolvers one per line, sorted, creating parent directories.
pub async fn write_resolver_list<'a, I>(path: &Path, resolvers: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a ResolverAddress>,
{
    let sorted: BTreeSet<&str> = resolvers.into_iter().map(String::as_str).collect();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut content = sorted.iter().copied().collect::<Vec<_>>().join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write resolver list {}", path.display()))?;

    info!("Wrote {} resolvers to {}", sorted.len(), path.display());
    Ok(sorted.len())
}

fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_INITIAL_DELAY_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(RETRY_MAX_ATTEMPTS)
}

async fn fetch_source(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?;
    let response = response
        .error_for_status()
        .with_context(|| format!("Bad status from {url}"))?;
    response
        .text()
        .await
        .with_context(|| format!("Failed to read body from {url}"))
}

/// Downloads candidate resolver lists over HTTP.
///
/// Each source is retried with exponential backoff. A source that still fails
/// is logged and skipped; the call only errors if the HTTP client cannot be
/// built.
pub async fn fetch_resolver_sources(urls: &[String]) -> Result<Vec<ResolverAddress>> {
    fetch_with_strategy(urls, retry_strategy).await
}

async fn fetch_with_strategy<S, F>(urls: &[String], strategy: F) -> Result<Vec<ResolverAddress>>
where
    F: Fn() -> S,
    S: Iterator<Item = Duration>,
{
    let client = reqwest::Client::builder()
        .timeout(SOURCE_FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let client = &client;

    let mut seen = BTreeSet::new();
    let mut resolvers = Vec::new();
    for url in urls {
        match Retry::spawn(strategy(), || fetch_source(client, url)).await {
            Ok(body) => {
                let before = resolvers.len();
                for resolver in parse_line_list(&body) {
                    if seen.insert(resolver.clone()) {
                        resolvers.push(resolver);
                    }
                }
                info!("Fetched {} new resolvers from {}", resolvers.len() - before, url);
            }
            Err(e) => warn!("Skipping resolver source {url}: {e:#}"),
        }
    }
    Ok(resolvers)
}
