//! Configuration constants.
//!
//! This module defines the defaults used throughout the crate: canary values,
//! query timeouts, batch sizing and the external process parameters.

use std::time::Duration;

// Resolver validation
/// Reference name every trustworthy resolver must answer correctly.
pub const CANARY_NAME: &str = "dns.google";
/// Known-correct A record for [`CANARY_NAME`].
pub const CANARY_ADDRESS: &str = "8.8.8.8";
/// Suffix appended to the random label of the NXDOMAIN hijack probe.
pub const NONEXISTENT_SUFFIX: &str = "com";
/// Per-query timeout in seconds when vetting a resolver.
/// Kept short: an honest resolver answers the canary well under a second,
/// and a slow one only costs its own worker slot.
pub const VALIDATION_QUERY_TIMEOUT_SECS: u64 = 3;
/// Default number of concurrent validator workers
pub const DEFAULT_VALIDATOR_CONCURRENCY: usize = 100;
/// Log validator progress after this many candidates have been checked
pub const VALIDATION_PROGRESS_INTERVAL: usize = 500;

// Mass resolution
/// Default number of names handed to one `massdns` invocation
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
/// Distinct results per chunk above which the chunk is discarded as wildcard noise
pub const DEFAULT_OVERLOAD_THRESHOLD: usize = 10_000;
/// Default `massdns -s` value (concurrent lookups inside the external process)
pub const DEFAULT_MASSDNS_THREADS: usize = 10_000;
/// Name of the external batch resolver binary
pub const MASSDNS_BINARY: &str = "massdns";

// Direct lookups
/// DNS query timeout in seconds for direct record lookups
pub const DNS_TIMEOUT_SECS: u64 = 3;

// Resolver source downloads
/// Timeout for downloading one public resolver list
pub const SOURCE_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;
/// Maximum number of retries for a resolver source download
pub const RETRY_MAX_ATTEMPTS: usize = 3;

// Default file locations
pub const TRUSTED_RESOLVERS_PATH: &str = "./dicts/trusted_resolvers.txt";
pub const MASS_RESOLVERS_PATH: &str = "./dicts/mass_resolvers.txt";
pub const MASS_RESOLVERS_UNCHECKED_PATH: &str = "./dicts/mass_resolvers_unchecked.txt";
pub const TEMP_DIRECTORY: &str = "./temp";
