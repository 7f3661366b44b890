// Shared test doubles for the integration tests.
//
// Deterministic stand-ins for massdns, the public suffix classifier and
// per-nameserver lookups, so the public API can be driven without a network.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use futures::future::BoxFuture;
use futures::FutureExt;

use mass_dns::{
    BatchError, BatchOutput, BatchResolver, ClassificationError, DnsRecord, NameClassifier,
    NameParts, NameserverLookup, RecordType,
};

/// A batch resolver answering from fixed tables, one per resolver list path.
#[derive(Default)]
#[allow(dead_code)] // Used by some test files
pub struct StaticPools {
    pools: HashMap<PathBuf, PoolAnswers>,
    pub chunks: Mutex<Vec<usize>>,
}

#[derive(Default)]
#[allow(dead_code)] // Used by some test files
pub struct PoolAnswers {
    exact: HashMap<String, (RecordType, String)>,
    wildcards: HashMap<String, (RecordType, String)>,
}

impl PoolAnswers {
    #[allow(dead_code)] // Used by some test files
    pub fn record(mut self, name: &str, record_type: RecordType, data: &str) -> Self {
        self.exact
            .insert(name.to_string(), (record_type, data.to_string()));
        self
    }

    #[allow(dead_code)] // Used by some test files
    pub fn wildcard(mut self, apex: &str, record_type: RecordType, data: &str) -> Self {
        self.wildcards
            .insert(apex.to_string(), (record_type, data.to_string()));
        self
    }

    fn answer(&self, name: &str) -> Option<DnsRecord> {
        if let Some((t, data)) = self.exact.get(name) {
            return Some(DnsRecord::new(name, *t, data));
        }
        self.wildcards
            .iter()
            .find(|(apex, _)| name.ends_with(&format!(".{apex}")))
            .map(|(_, (t, data))| DnsRecord::new(name, *t, data))
    }
}

impl StaticPools {
    #[allow(dead_code)] // Used by some test files
    pub fn with_pool(mut self, path: &Path, answers: PoolAnswers) -> Self {
        self.pools.insert(path.to_path_buf(), answers);
        self
    }
}

impl BatchResolver for StaticPools {
    fn resolve_batch<'a>(
        &'a self,
        names: &'a [String],
        _types: &'a [RecordType],
        resolvers: &'a Path,
    ) -> BoxFuture<'a, Result<BatchOutput, BatchError>> {
        async move {
            self.chunks.lock().unwrap().push(names.len());
            let answers = self
                .pools
                .get(resolvers)
                .map(|pool| names.iter().filter_map(|n| pool.answer(n)).collect())
                .unwrap_or_default();
            Ok(BatchOutput {
                answers,
                malformed_lines: 0,
            })
        }
        .boxed()
    }
}

/// Treats the last two labels of a name as its apex.
#[allow(dead_code)] // Used by some test files
pub struct LastTwoLabels;

impl NameClassifier for LastTwoLabels {
    fn classify(&self, name: &str) -> Result<NameParts, ClassificationError> {
        let labels: Vec<&str> = name.split('.').collect();
        if labels.len() < 2 {
            return Err(ClassificationError::NoRegistrableDomain(name.to_string()));
        }
        let split = labels.len() - 2;
        Ok(NameParts {
            apex: labels[split..].join("."),
            subdomain: (split > 0).then(|| labels[..split].join(".")),
        })
    }
}

/// How a scripted nameserver behaves.
#[derive(Clone, Copy)]
#[allow(dead_code)] // Not every test file uses every variant
pub enum Nameserver {
    Honest,
    Hijacking,
    Silent,
}

/// A nameserver lookup driven by a fixed table.
#[allow(dead_code)] // Used by some test files
pub struct ScriptedNameservers {
    pub servers: HashMap<String, Nameserver>,
    pub canary_name: String,
    pub canary_address: String,
}

impl ScriptedNameservers {
    #[allow(dead_code)] // Used by some test files
    pub fn new(servers: &[(&str, Nameserver)]) -> Self {
        Self {
            servers: servers
                .iter()
                .map(|(address, behaviour)| (address.to_string(), *behaviour))
                .collect(),
            canary_name: "dns.google".to_string(),
            canary_address: "8.8.8.8".to_string(),
        }
    }
}

impl NameserverLookup for ScriptedNameservers {
    type Server = String;

    fn connect(&self, nameserver: &str) -> Option<String> {
        Some(nameserver.to_string())
    }

    fn lookup_a<'a>(&'a self, nameserver: &'a String, name: &'a str) -> BoxFuture<'a, Vec<DnsRecord>> {
        async move {
            let canary = name == self.canary_name;
            match self.servers.get(nameserver) {
                Some(Nameserver::Honest) | Some(Nameserver::Hijacking) if canary => {
                    vec![DnsRecord::new(name, RecordType::A, &self.canary_address)]
                }
                Some(Nameserver::Hijacking) => vec![DnsRecord::new(name, RecordType::A, "198.51.100.9")],
                _ => Vec::new(),
            }
        }
        .boxed()
    }
}

/// Writes `lines` to `path`, one per line.
#[allow(dead_code)] // Used by some test files
pub fn write_lines(path: &Path, lines: &[&str]) {
    std::fs::write(path, lines.join("\n") + "\n").expect("Failed to write test file");
}
