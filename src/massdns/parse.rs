//! Parser for massdns `-o J` (one JSON object per line) output.

use std::str::FromStr;

use serde::Deserialize;

use crate::models::{DnsRecord, RecordType};

#[derive(Debug, Deserialize)]
struct OutputLine {
    data: Option<OutputData>,
}

#[derive(Debug, Deserialize)]
struct OutputData {
    answers: Option<Vec<OutputAnswer>>,
}

#[derive(Debug, Deserialize)]
struct OutputAnswer {
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    data: String,
}

/// Records parsed from one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    /// Every answer, in output order, duplicates included
    pub answers: Vec<DnsRecord>,
    /// Lines that were not valid JSON of the expected shape
    pub malformed_lines: usize,
}

/// Parses one output line into its answer records.
///
/// A line without `data.answers` is a query that did not resolve and yields
/// no records. Answers of a type this crate does not model are skipped.
pub fn parse_line(line: &str) -> Result<Vec<DnsRecord>, serde_json::Error> {
    let parsed: OutputLine = serde_json::from_str(line)?;
    let answers = parsed
        .data
        .and_then(|data| data.answers)
        .unwrap_or_default();

    Ok(answers
        .into_iter()
        .filter_map(|answer| {
            let record_type = RecordType::from_str(&answer.record_type).ok()?;
            Some(DnsRecord::new(&answer.name, record_type, &answer.data))
        })
        .collect())
}

/// Parses a whole output file, skipping blank and malformed lines.
pub fn parse_output(content: &str) -> BatchOutput {
    let mut output = BatchOutput::default();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_line(line) {
            Ok(records) => output.answers.extend(records),
            Err(e) => {
                log::debug!("Skipping malformed batch output line: {e}");
                output.malformed_lines += 1;
            }
        }
    }
    output
}
