//! mass_dns library: resolver vetting and wildcard-aware mass DNS resolution
//!
//! Two engines make up the library:
//! - [`ResolverValidator`] filters public resolvers down to the ones that
//!   answer a known canary correctly and do not fabricate NXDOMAIN answers.
//! - [`MassResolver`] resolves large name lists through `massdns`, strips
//!   wildcard noise with random-label probes and can recheck the survivors
//!   through a trusted pool.
//!
//! # Example
//!
//! ```no_run
//! use mass_dns::{resolve_names, Config, DEFAULT_RECORD_TYPES};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let report = resolve_names(&config, Path::new("names.txt"), DEFAULT_RECORD_TYPES, true, false).await?;
//! for record in &report.records {
//!     println!("{} {} {}", record.name, record.record_type, record.data);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! A Tokio runtime, and the `massdns` binary for mass resolution.

pub mod config;
mod dns;
mod domain;
mod error_handling;
pub mod initialization;
mod mass_resolver;
mod massdns;
mod models;
pub mod resolver_list;
mod run;
mod utils;
mod validator;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, MassResolverConfig};
pub use dns::{LookupCache, RecordResolver};
pub use domain::{NameClassifier, NameParts, PublicSuffixClassifier};
pub use error_handling::{
    log_statistics, BatchError, ClassificationError, ErrorType, InfoType, InitializationError,
    ProcessingStats, WarningType,
};
pub use mass_resolver::{generate_probes, MassResolver};
pub use massdns::{parse_line, parse_output, BatchOutput, BatchResolver, MassDnsProcess};
pub use models::{DnsRecord, RecordType, ResolverAddress, DEFAULT_RECORD_TYPES};
pub use run::{
    lookup_names, resolve_names, resolve_names_with, validate_resolvers,
    validate_resolvers_with, ResolutionReport, ValidationReport,
};
pub use validator::{
    check_resolver, NameserverLookup, PinnedResolver, ProbeNames, ResolverValidator, TrustDnsLookup,
    Verdict,
};
