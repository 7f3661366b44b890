//! Wildcard probe generation.

use std::collections::BTreeSet;

use log::debug;

use crate::domain::NameClassifier;
use crate::error_handling::{ProcessingStats, WarningType};

/// Builds the wildcard probes for a set of names.
///
/// Each name yields `<label>.<apex>` and, when the subdomain has more than one
/// label, `<label>.<subdomain minus its first label>.<apex>`. Names that cannot
/// be classified are skipped and counted. Output is deduplicated and sorted.
pub fn generate_probes<C: NameClassifier + ?Sized>(
    names: &[String],
    classifier: &C,
    label: &str,
    stats: &ProcessingStats,
) -> Vec<String> {
    let mut probes = BTreeSet::new();
    for name in names {
        let parts = match classifier.classify(name) {
            Ok(parts) => parts,
            Err(e) => {
                debug!("No wildcard probe for {name}: {e}");
                stats.increment_warning(WarningType::ClassificationFailed);
                continue;
            }
        };
        if let Some(sub_apex) = parts.sub_apex() {
            probes.insert(format!("{label}.{sub_apex}.{}", parts.apex));
        }
        probes.insert(format!("{label}.{}", parts.apex));
    }
    probes.into_iter().collect()
}
