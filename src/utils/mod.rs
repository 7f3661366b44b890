//! Small shared helpers.

use rand::Rng;

/// Generates a 32-character lowercase hex label.
///
/// 128 random bits: the label cannot exist in any zone, and a fresh one
/// defeats resolver caches between runs.
pub fn random_label() -> String {
    format!("{:032x}", rand::rng().random::<u128>())
}

/// Reads a newline-delimited list, trimming lines and skipping blanks and
/// `#` comments. Duplicates are removed, keeping the first occurrence.
pub fn parse_line_list(content: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}
