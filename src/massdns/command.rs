//! Runs the external `massdns` binary for one batch of names.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::parse::{parse_output, BatchOutput};
use super::BatchResolver;
use crate::config::Config;
use crate::error_handling::BatchError;
use crate::models::RecordType;

/// Keep at most this many bytes of stderr in a failure log line
const STDERR_LOG_LIMIT: usize = 2048;

/// `massdns` invocation settings.
#[derive(Debug, Clone)]
pub struct MassDnsProcess {
    binary: PathBuf,
    threads: usize,
    temp_directory: PathBuf,
}

impl MassDnsProcess {
    pub fn new(binary: impl Into<PathBuf>, threads: usize, temp_directory: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            threads: threads.max(1),
            temp_directory: temp_directory.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.massdns_binary.clone(),
            config.massdns_threads,
            config.temp_directory.clone(),
        )
    }

    /// Builds the command line; the output path is the chunk's temp file.
    pub fn command(&self, resolvers: &Path, output: &Path, types: &[RecordType]) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-s")
            .arg(self.threads.to_string())
            .args(["-o", "J"])
            .arg("-r")
            .arg(resolvers)
            .arg("-w")
            .arg(output)
            .arg("--flush");
        for record_type in types {
            command.arg("-t").arg(record_type.to_string());
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    async fn run(
        &self,
        names: &[String],
        types: &[RecordType],
        resolvers: &Path,
    ) -> Result<BatchOutput, BatchError> {
        // Removed when dropped, whichever way this function returns
        let output_file = tempfile::Builder::new()
            .prefix("massdns-")
            .suffix(".jsonl")
            .tempfile_in(&self.temp_directory)
            .map_err(BatchError::TempFile)?;

        let mut command = self.command(resolvers, output_file.path(), types);
        log::debug!("Running {:?} for {} names", command, names.len());

        let mut child = command.spawn().map_err(|source| BatchError::Spawn {
            binary: self.binary.display().to_string(),
            source,
        })?;

        let mut input = names.join("\n");
        input.push('\n');
        let stdin = child.stdin.take();
        // Feed stdin while draining stderr so neither pipe can stall the other
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (fed, finished) = tokio::join!(feed, child.wait_with_output());

        if let Err(e) = fed {
            log::warn!("{}", BatchError::Stdin(e));
        }
        let finished = finished.map_err(BatchError::Wait)?;
        if !finished.status.success() {
            let tail = &finished.stderr[finished.stderr.len().saturating_sub(STDERR_LOG_LIMIT)..];
            log::warn!(
                "{} exited with {}: {}",
                self.binary.display(),
                finished.status,
                String::from_utf8_lossy(tail).trim()
            );
        }

        let content = tokio::fs::read_to_string(output_file.path())
            .await
            .map_err(BatchError::Output)?;
        Ok(parse_output(&content))
    }
}

impl BatchResolver for MassDnsProcess {
    fn resolve_batch<'a>(
        &'a self,
        names: &'a [String],
        types: &'a [RecordType],
        resolvers: &'a Path,
    ) -> BoxFuture<'a, Result<BatchOutput, BatchError>> {
        self.run(names, types, resolvers).boxed()
    }
}
