//! External batch resolution.
//!
//! High-volume resolution is delegated to `massdns`: names go in on stdin one
//! per line, answers come back as JSON lines in an output file. This module
//! wraps one such invocation behind [`BatchResolver`] so the mass resolver can
//! be driven by a deterministic implementation in tests.

mod command;
mod parse;

use std::path::Path;

use futures::future::BoxFuture;

use crate::error_handling::BatchError;
use crate::models::RecordType;

pub use command::MassDnsProcess;
pub use parse::{parse_line, parse_output, BatchOutput};

/// Resolves one batch of names against the resolvers listed in a file.
///
/// An `Err` means the batch produced nothing usable; the caller treats it as
/// an empty batch and moves on.
pub trait BatchResolver: Send + Sync {
    fn resolve_batch<'a>(
        &'a self,
        names: &'a [String],
        types: &'a [RecordType],
        resolvers: &'a Path,
    ) -> BoxFuture<'a, Result<BatchOutput, BatchError>>;
}
