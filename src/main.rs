//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mass_dns` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Writing records as JSON lines
//!
//! All core functionality is implemented in the library crate.

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use structopt::StructOpt;

use mass_dns::initialization::init_logger_with;
use mass_dns::{
    lookup_names, resolve_names, validate_resolvers, Config, DnsRecord, LogFormat, LogLevel,
    RecordType,
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mass_dns",
    about = "Vets public DNS resolvers and mass-resolves names with wildcard filtering."
)]
struct Opt {
    /// Log level: error, warn, info, debug or trace
    #[structopt(long, default_value = "info")]
    log_level: LogLevel,

    /// Log format: plain or json
    #[structopt(long, default_value = "plain")]
    log_format: LogFormat,

    /// Trusted resolver list used for rechecks
    #[structopt(long, parse(from_os_str))]
    trusted_resolvers: Option<PathBuf>,

    /// Validated resolver list used for bulk resolution
    #[structopt(long, parse(from_os_str))]
    mass_resolvers: Option<PathBuf>,

    /// Raw resolver candidates the mass list is built from
    #[structopt(long, parse(from_os_str))]
    mass_resolvers_unchecked: Option<PathBuf>,

    /// Directory for massdns working files
    #[structopt(long, parse(from_os_str))]
    temp_directory: Option<PathBuf>,

    /// massdns executable
    #[structopt(long, parse(from_os_str))]
    massdns: Option<PathBuf>,

    /// Concurrent lookups per massdns process
    #[structopt(long)]
    massdns_threads: Option<usize>,

    /// Names per massdns invocation
    #[structopt(long)]
    chunk_size: Option<usize>,

    /// Distinct results per chunk above which the chunk is dropped
    #[structopt(long)]
    overload_threshold: Option<usize>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Validate the unchecked resolver list and write the mass list
    Validate {
        /// Extra candidate list to download (repeatable)
        #[structopt(long = "source")]
        sources: Vec<String>,

        /// Concurrent validation workers
        #[structopt(long)]
        concurrency: Option<usize>,

        /// Write accepted resolvers here instead of the mass list
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
    /// Resolve a file of names through the mass resolver list
    Resolve {
        /// Newline-delimited names
        #[structopt(parse(from_os_str))]
        names: PathBuf,

        /// Record types to request
        #[structopt(short = "t", long = "type", use_delimiter = true, default_value = "A,CNAME")]
        types: Vec<RecordType>,

        /// Keep wildcard answers
        #[structopt(long)]
        no_wildcard_detection: bool,

        /// Re-resolve results through the trusted resolvers
        #[structopt(long)]
        recheck: bool,

        /// Output file (stdout if omitted)
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
    /// Look up A and AAAA records of a few names directly
    Lookup {
        names: Vec<String>,

        /// Output file (stdout if omitted)
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
}

impl Opt {
    fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            trusted_resolvers: self
                .trusted_resolvers
                .clone()
                .unwrap_or(defaults.trusted_resolvers),
            mass_resolvers: self.mass_resolvers.clone().unwrap_or(defaults.mass_resolvers),
            mass_resolvers_unchecked: self
                .mass_resolvers_unchecked
                .clone()
                .unwrap_or(defaults.mass_resolvers_unchecked),
            temp_directory: self.temp_directory.clone().unwrap_or(defaults.temp_directory),
            massdns_binary: self.massdns.clone().unwrap_or(defaults.massdns_binary),
            massdns_threads: self.massdns_threads.unwrap_or(defaults.massdns_threads),
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            overload_threshold: self.overload_threshold.unwrap_or(defaults.overload_threshold),
            validator_concurrency: defaults.validator_concurrency,
        }
    }
}

fn write_records(records: &[DnsRecord], output: Option<&PathBuf>) -> Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = BufWriter::new(sink);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush().context("Failed to flush records")
}

async fn run(opt: Opt) -> Result<()> {
    let mut config = opt.config();

    match opt.command {
        Command::Validate {
            sources,
            concurrency,
            output,
        } => {
            if let Some(concurrency) = concurrency {
                config.validator_concurrency = concurrency;
            }
            if let Some(output) = output {
                config.mass_resolvers = output;
            }
            let report = validate_resolvers(&config, &sources).await?;
            println!(
                "✅ {} of {} resolvers passed validation in {:.1}s",
                report.accepted, report.candidates, report.elapsed_seconds
            );
            println!("Resolvers saved in {}", report.output.display());
        }
        Command::Resolve {
            names,
            types,
            no_wildcard_detection,
            recheck,
            output,
        } => {
            let report =
                resolve_names(&config, &names, &types, !no_wildcard_detection, recheck).await?;
            write_records(&report.records, output.as_ref())?;
            eprintln!(
                "✅ {} records for {} names in {:.1}s",
                report.records.len(),
                report.names,
                report.elapsed_seconds
            );
        }
        Command::Lookup { names, output } => {
            let records = lookup_names(&names).await;
            write_records(&records, output.as_ref())?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::from_args();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(opt).await {
        eprintln!("mass_dns error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
