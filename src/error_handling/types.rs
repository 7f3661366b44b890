//! Error type definitions.
//!
//! This module defines the typed failures plus the error, warning, and info
//! categories tallied while validating resolvers and resolving names.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error creating a working directory.
    #[error("Working directory error: {0}")]
    DirectoryError(String),
}

/// Failures of one external batch-resolution invocation.
///
/// These never escape the mass resolver: a failed chunk contributes no records.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The chunk's temp output file could not be created.
    #[error("Failed to create temp file: {0}")]
    TempFile(#[source] std::io::Error),

    /// The external process could not be started.
    #[error("Failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing candidate names to the process stdin failed.
    #[error("Failed to write names to batch process: {0}")]
    Stdin(#[source] std::io::Error),

    /// Waiting for the process to exit failed.
    #[error("Failed to wait for batch process: {0}")]
    Wait(#[source] std::io::Error),

    /// The process output file could not be read.
    #[error("Failed to read batch output: {0}")]
    Output(#[source] std::io::Error),
}

/// A name that cannot be split into apex and subdomain labels.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassificationError {
    /// The name is empty or not a hostname.
    #[error("Malformed name: {0:?}")]
    Malformed(String),

    /// The name is an IP literal, which has no registrable domain.
    #[error("IP addresses do not have registrable domains: {0}")]
    IpAddress(String),

    /// No registrable domain could be derived from the public suffix list.
    #[error("No registrable domain found for {0}")]
    NoRegistrableDomain(String),
}

/// Failures that prevented part of the work from producing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// The batch process could not be run for a chunk
    BatchProcessFailed,
    /// A single resolver query timed out or errored
    QueryFault,
}

/// Degradations that dropped data but are expected under adversarial input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// Batch output line that is not valid JSON
    MalformedOutputLine,
    /// Name excluded from wildcard probe generation
    ClassificationFailed,
    /// Chunk discarded by the overload guard
    ChunkOverloaded,
    /// Resolver address that is not an IP or socket address
    UnparsableNameserver,
}

/// Informational counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// Resolver rejected for failing the canary query
    CanaryRejected,
    /// Resolver rejected for answering a nonexistent name
    HijackRejected,
    /// Resolver accepted into the trusted set
    ResolverAccepted,
    /// Answer dropped because its data was blacklisted
    BlacklistedAnswer,
    /// Distinct value learned from a wildcard probe
    WildcardValue,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::BatchProcessFailed => "Batch process failed",
            ErrorType::QueryFault => "Resolver query fault",
        }
    }
}

impl std::fmt::Display for WarningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MalformedOutputLine => "Malformed batch output line",
            WarningType::ClassificationFailed => "Name classification failed",
            WarningType::ChunkOverloaded => "Chunk discarded by overload guard",
            WarningType::UnparsableNameserver => "Unparsable nameserver address",
        }
    }
}

impl std::fmt::Display for InfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::CanaryRejected => "Resolver failed canary",
            InfoType::HijackRejected => "Resolver hijacked nonexistent name",
            InfoType::ResolverAccepted => "Resolver accepted",
            InfoType::BlacklistedAnswer => "Answer matched wildcard blacklist",
            InfoType::WildcardValue => "Wildcard value learned",
        }
    }
}
