//! Integration tests for the resolver validation run.

mod helpers;

use std::sync::Arc;

use mass_dns::resolver_list::load_resolver_list;
use mass_dns::{validate_resolvers_with, Config, InfoType, ProcessingStats};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use helpers::{write_lines, Nameserver, ScriptedNameservers};

fn config_in(temp: &TempDir) -> Config {
    Config {
        mass_resolvers: temp.path().join("out").join("resolvers.txt"),
        mass_resolvers_unchecked: temp.path().join("unchecked.txt"),
        temp_directory: temp.path().join("work"),
        validator_concurrency: 4,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_validation_writes_only_trusted_resolvers() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);
    write_lines(
        &config.mass_resolvers_unchecked,
        &[
            "# scraped",
            "9.9.9.9",
            "1.1.1.1",
            "203.0.113.1",
            "203.0.113.2",
            "1.1.1.1",
        ],
    );
    let lookup = ScriptedNameservers::new(&[
        ("1.1.1.1", Nameserver::Honest),
        ("9.9.9.9", Nameserver::Honest),
        ("203.0.113.1", Nameserver::Hijacking),
        ("203.0.113.2", Nameserver::Silent),
    ]);
    let stats = Arc::new(ProcessingStats::new());

    let report = validate_resolvers_with(&config, &[], lookup, Arc::clone(&stats))
        .await
        .unwrap();

    assert_eq!(report.candidates, 4);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.output, config.mass_resolvers);
    assert_eq!(
        load_resolver_list(&config.mass_resolvers).await.unwrap(),
        vec!["1.1.1.1", "9.9.9.9"]
    );
    assert_eq!(stats.get_info_count(InfoType::HijackRejected), 1);
    assert_eq!(stats.get_info_count(InfoType::CanaryRejected), 1);
}

/// Serves `body` as a plain-text resolver list until the test ends.
async fn serve_list(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{address}/resolvers.txt")
}

#[tokio::test]
async fn test_sources_do_not_rewrite_unchecked_list() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);
    write_lines(&config.mass_resolvers_unchecked, &["# hand curated", "9.9.9.9"]);
    let before = std::fs::read_to_string(&config.mass_resolvers_unchecked).unwrap();
    let source = serve_list("1.1.1.1\n203.0.113.1\n").await;
    let lookup = ScriptedNameservers::new(&[
        ("1.1.1.1", Nameserver::Honest),
        ("9.9.9.9", Nameserver::Honest),
        ("203.0.113.1", Nameserver::Hijacking),
    ]);

    let report = validate_resolvers_with(&config, &[source], lookup, Arc::new(ProcessingStats::new()))
        .await
        .unwrap();

    assert_eq!(report.candidates, 3);
    assert_eq!(
        load_resolver_list(&config.mass_resolvers).await.unwrap(),
        vec!["1.1.1.1", "9.9.9.9"]
    );
    assert_eq!(
        std::fs::read_to_string(&config.mass_resolvers_unchecked).unwrap(),
        before
    );
}

#[tokio::test]
async fn test_validation_without_candidates_fails() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);
    let lookup = ScriptedNameservers::new(&[]);

    let err = validate_resolvers_with(&config, &[], lookup, Arc::new(ProcessingStats::new()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unchecked.txt"));
    assert!(!config.mass_resolvers.exists());
}

#[tokio::test]
async fn test_validation_of_empty_list_writes_empty_pool() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp);
    write_lines(&config.mass_resolvers_unchecked, &["# nothing yet"]);

    let report = validate_resolvers_with(
        &config,
        &[],
        ScriptedNameservers::new(&[]),
        Arc::new(ProcessingStats::new()),
    )
    .await
    .unwrap();
    assert_eq!(report.candidates, 0);
    assert_eq!(report.accepted, 0);
    assert!(load_resolver_list(&config.mass_resolvers)
        .await
        .unwrap()
        .is_empty());
}
