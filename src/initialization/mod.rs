//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - DNS resolvers (per-nameserver and general purpose)
//! - Public suffix extractor
//! - Working directories

mod logger;
mod resolver;

use std::path::Path;
use std::sync::Arc;

use tldextract::{TldExtractor, TldOption};

use crate::error_handling::InitializationError;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{init_resolver, init_single_nameserver_resolver, parse_nameserver};

/// Initializes the Public Suffix List extractor.
///
/// Returns an `Arc<TldExtractor>` that can be shared across tasks for
/// splitting names into registrable domain and subdomain labels.
pub fn init_extractor() -> Arc<TldExtractor> {
    Arc::new(TldExtractor::new(TldOption::default()))
}

/// Creates the directory that holds per-chunk working files.
///
/// # Errors
///
/// Returns `InitializationError::DirectoryError` if the directory cannot be created.
pub fn init_temp_directory(path: &Path) -> Result<(), InitializationError> {
    std::fs::create_dir_all(path).map_err(|e| {
        InitializationError::DirectoryError(format!("{}: {}", path.display(), e))
    })
}
