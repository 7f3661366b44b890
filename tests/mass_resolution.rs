//! Integration tests for mass resolution through the public API.
//!
//! These tests verify:
//! - Wildcard probes remove wildcard noise end to end
//! - Recheck narrows results to what the trusted pool reproduces
//! - Names files are read, deduplicated and reported on

mod helpers;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use mass_dns::{
    resolve_names, resolve_names_with, Config, DnsRecord, MassResolver, MassResolverConfig,
    ProcessingStats, RecordType, WarningType, DEFAULT_RECORD_TYPES,
};
use tempfile::TempDir;

use helpers::{write_lines, LastTwoLabels, PoolAnswers, StaticPools};

fn pools(temp: &TempDir) -> MassResolverConfig {
    MassResolverConfig {
        trusted_resolvers: temp.path().join("trusted.txt"),
        mass_resolvers: temp.path().join("mass.txt"),
        chunk_size: 2,
        overload_threshold: 10_000,
    }
}

fn engine(batch: StaticPools, config: MassResolverConfig) -> MassResolver<StaticPools, LastTwoLabels> {
    MassResolver::new(batch, LastTwoLabels, config, Arc::new(ProcessingStats::new()))
}

#[tokio::test]
async fn test_end_to_end_wildcard_probes_answer_9_9_9_9() {
    let temp = TempDir::new().unwrap();
    let config = pools(&temp);
    let batch = StaticPools::default().with_pool(
        &config.mass_resolvers,
        PoolAnswers::default()
            .wildcard("example.com", RecordType::A, "9.9.9.9")
            .record("a.example.com", RecordType::A, "192.0.2.10")
            .record("b.example.com", RecordType::A, "192.0.2.20"),
    );
    let resolver = engine(batch, config);

    let names = vec!["a.example.com".to_string(), "b.example.com".to_string()];
    let records = resolver
        .mass_resolve(&names, DEFAULT_RECORD_TYPES, true, false)
        .await;

    assert_eq!(
        records,
        HashSet::from([
            DnsRecord::new("a.example.com", RecordType::A, "192.0.2.10"),
            DnsRecord::new("b.example.com", RecordType::A, "192.0.2.20"),
        ])
    );
    assert!(records.iter().all(|r| r.data != "9.9.9.9"));
}

#[tokio::test]
async fn test_recheck_output_is_subset() {
    let temp = TempDir::new().unwrap();
    let config = pools(&temp);
    let batch = StaticPools::default()
        .with_pool(
            &config.mass_resolvers,
            PoolAnswers::default()
                .record("www.example.com", RecordType::A, "192.0.2.1")
                .record("spoofed.example.com", RecordType::A, "203.0.113.99"),
        )
        .with_pool(
            &config.trusted_resolvers,
            PoolAnswers::default().record("www.example.com", RecordType::A, "192.0.2.1"),
        );
    let resolver = engine(batch, config);
    let names = vec!["www.example.com".to_string(), "spoofed.example.com".to_string()];

    let plain = resolver.mass_resolve(&names, DEFAULT_RECORD_TYPES, true, false).await;
    let rechecked = resolver.mass_resolve(&names, DEFAULT_RECORD_TYPES, true, true).await;

    assert_eq!(plain.len(), 2);
    assert!(rechecked.is_subset(&plain));
    assert_eq!(
        rechecked,
        HashSet::from([DnsRecord::new("www.example.com", RecordType::A, "192.0.2.1")])
    );
}

#[tokio::test]
async fn test_trusted_resolve_uses_trusted_pool() {
    let temp = TempDir::new().unwrap();
    let config = pools(&temp);
    let batch = StaticPools::default().with_pool(
        &config.trusted_resolvers,
        PoolAnswers::default().record("ns.example.org", RecordType::A, "192.0.2.53"),
    );
    let resolver = engine(batch, config);

    let records = resolver
        .trusted_resolve(&["ns.example.org".to_string()], &[RecordType::A], false)
        .await;
    assert_eq!(
        records,
        HashSet::from([DnsRecord::new("ns.example.org", RecordType::A, "192.0.2.53")])
    );
}

#[tokio::test]
async fn test_resolve_names_with_reads_and_sorts() {
    let temp = TempDir::new().unwrap();
    let config = pools(&temp);
    let batch = StaticPools::default().with_pool(
        &config.mass_resolvers,
        PoolAnswers::default()
            .record("b.example.com", RecordType::A, "192.0.2.2")
            .record("a.example.com", RecordType::CNAME, "edge.example.net"),
    );
    let resolver = engine(batch, config);

    let names_file = temp.path().join("names.txt");
    write_lines(
        &names_file,
        &["# targets", "B.example.com", "a.example.com", "", "b.example.com", "localhost"],
    );

    let report = resolve_names_with(&resolver, &names_file, DEFAULT_RECORD_TYPES, true, false)
        .await
        .unwrap();

    // Case-folded duplicates are counted once
    assert_eq!(report.names, 3);
    assert_eq!(
        report.records,
        vec![
            DnsRecord::new("a.example.com", RecordType::CNAME, "edge.example.net"),
            DnsRecord::new("b.example.com", RecordType::A, "192.0.2.2"),
        ]
    );
    // "localhost" cannot be probed but is still resolved directly
    assert_eq!(
        resolver.stats().get_warning_count(WarningType::ClassificationFailed),
        1
    );
}

#[tokio::test]
async fn test_resolve_names_missing_file_errors() {
    let temp = TempDir::new().unwrap();
    // A mass pool file exists so no rebuild is attempted
    let mass = temp.path().join("mass.txt");
    write_lines(&mass, &["192.0.2.53"]);
    let config = Config {
        mass_resolvers: mass,
        temp_directory: temp.path().join("work"),
        ..Default::default()
    };

    let err = resolve_names(
        &config,
        &PathBuf::from("/nonexistent/names.txt"),
        DEFAULT_RECORD_TYPES,
        false,
        false,
    )
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("names.txt"));
    assert!(temp.path().join("work").is_dir());
}
