//! Configuration types.
//!
//! This module defines the enums and structs used to configure the engines.
//! The CLI layer in `main.rs` maps its arguments onto [`Config`].

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MASSDNS_THREADS, DEFAULT_OVERLOAD_THRESHOLD,
    DEFAULT_VALIDATOR_CONCURRENCY, MASSDNS_BINARY, MASS_RESOLVERS_PATH,
    MASS_RESOLVERS_UNCHECKED_PATH, TEMP_DIRECTORY, TRUSTED_RESOLVERS_PATH,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use mass_dns::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     mass_resolvers: PathBuf::from("resolvers.txt"),
///     massdns_threads: 2_000,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Small, pre-validated resolver list used for rechecks
    pub trusted_resolvers: PathBuf,

    /// Large resolver list used for high-volume resolution
    pub mass_resolvers: PathBuf,

    /// Raw candidate list the mass pool is refreshed from
    pub mass_resolvers_unchecked: PathBuf,

    /// Directory for per-chunk working files
    pub temp_directory: PathBuf,

    /// Path or name of the `massdns` executable
    pub massdns_binary: PathBuf,

    /// Concurrent lookups inside one `massdns` process
    pub massdns_threads: usize,

    /// Names per `massdns` invocation
    pub chunk_size: usize,

    /// Distinct results per chunk above which the chunk is discarded
    pub overload_threshold: usize,

    /// Concurrent validator workers
    pub validator_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            trusted_resolvers: PathBuf::from(TRUSTED_RESOLVERS_PATH),
            mass_resolvers: PathBuf::from(MASS_RESOLVERS_PATH),
            mass_resolvers_unchecked: PathBuf::from(MASS_RESOLVERS_UNCHECKED_PATH),
            temp_directory: PathBuf::from(TEMP_DIRECTORY),
            massdns_binary: PathBuf::from(MASSDNS_BINARY),
            massdns_threads: DEFAULT_MASSDNS_THREADS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            overload_threshold: DEFAULT_OVERLOAD_THRESHOLD,
            validator_concurrency: DEFAULT_VALIDATOR_CONCURRENCY,
        }
    }
}

/// Tuning knobs for one [`MassResolver`](crate::MassResolver) instance.
#[derive(Debug, Clone)]
pub struct MassResolverConfig {
    /// Resolver list used for rechecks and `trusted_resolve`
    pub trusted_resolvers: PathBuf,
    /// Resolver list used for bulk resolution and wildcard probes
    pub mass_resolvers: PathBuf,
    /// Names per batch
    pub chunk_size: usize,
    /// Distinct results per chunk above which the chunk is discarded
    pub overload_threshold: usize,
}

impl From<&Config> for MassResolverConfig {
    fn from(config: &Config) -> Self {
        Self {
            trusted_resolvers: config.trusted_resolvers.clone(),
            mass_resolvers: config.mass_resolvers.clone(),
            chunk_size: config.chunk_size,
            overload_threshold: config.overload_threshold,
        }
    }
}

impl Default for MassResolverConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Plain".parse::<LogFormat>().unwrap(), LogFormat::Plain);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.chunk_size, 100_000);
        assert_eq!(config.overload_threshold, 10_000);
        assert_eq!(config.massdns_threads, 10_000);
        assert_eq!(config.massdns_binary, PathBuf::from("massdns"));
        assert_eq!(
            config.trusted_resolvers,
            PathBuf::from("./dicts/trusted_resolvers.txt")
        );
    }

    #[test]
    fn test_mass_resolver_config_from_config() {
        let config = Config {
            chunk_size: 10,
            overload_threshold: 5,
            mass_resolvers: PathBuf::from("mass.txt"),
            ..Default::default()
        };
        let mass = MassResolverConfig::from(&config);
        assert_eq!(mass.chunk_size, 10);
        assert_eq!(mass.overload_threshold, 5);
        assert_eq!(mass.mass_resolvers, PathBuf::from("mass.txt"));
        assert_eq!(mass.trusted_resolvers, config.trusted_resolvers);
    }
}
