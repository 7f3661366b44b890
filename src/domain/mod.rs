//! Name classification.
//!
//! Splits a hostname into its registrable domain (apex) and the subdomain
//! labels in front of it, using the Public Suffix List so multi-part suffixes
//! such as `co.uk` are handled. The mass resolver uses this to place wildcard
//! probes next to real names.

use std::net::IpAddr;
use std::sync::Arc;

use tldextract::TldExtractor;

use crate::error_handling::ClassificationError;
use crate::models::strip_root_dot;

/// A name split at its registrable domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    /// Registrable domain, e.g. `example.co.uk`
    pub apex: String,
    /// Labels in front of the apex, e.g. `a.b` for `a.b.example.co.uk`
    pub subdomain: Option<String>,
}

impl NameParts {
    /// Subdomain with its first label removed (`b` for `a.b`).
    ///
    /// `None` when the subdomain has a single label or there is none.
    pub fn sub_apex(&self) -> Option<&str> {
        self.subdomain
            .as_deref()
            .and_then(|sub| sub.split_once('.'))
            .map(|(_, rest)| rest)
            .filter(|rest| !rest.is_empty())
    }
}

/// Splits names into apex and subdomain labels.
///
/// A failure only means the name cannot take part in wildcard probing; the
/// caller still resolves it directly.
pub trait NameClassifier: Send + Sync {
    fn classify(&self, name: &str) -> Result<NameParts, ClassificationError>;
}

/// Classifier backed by the Public Suffix List via `tldextract`.
#[derive(Clone)]
pub struct PublicSuffixClassifier {
    extractor: Arc<TldExtractor>,
}

impl PublicSuffixClassifier {
    pub fn new(extractor: Arc<TldExtractor>) -> Self {
        Self { extractor }
    }
}

impl NameClassifier for PublicSuffixClassifier {
    fn classify(&self, name: &str) -> Result<NameParts, ClassificationError> {
        let host = strip_root_dot(name.trim()).to_ascii_lowercase();
        if host.is_empty() {
            return Err(ClassificationError::Malformed(name.to_string()));
        }
        if is_ip(&host) {
            return Err(ClassificationError::IpAddress(host));
        }
        if host.starts_with('.')
            || host.contains("..")
            || host.contains(|c: char| c.is_whitespace() || c == '/' || c == ':')
        {
            return Err(ClassificationError::Malformed(name.to_string()));
        }

        // tldextract expects a URL
        let result = self
            .extractor
            .extract(&format!("http://{}", host))
            .map_err(|_| ClassificationError::Malformed(name.to_string()))?;

        match (result.domain, result.suffix) {
            (Some(domain), Some(suffix)) if !domain.is_empty() && !suffix.is_empty() => {
                Ok(NameParts {
                    apex: format!("{}.{}", domain, suffix),
                    subdomain: result.subdomain.filter(|s| !s.is_empty()),
                })
            }
            _ => Err(ClassificationError::NoRegistrableDomain(host)),
        }
    }
}

fn is_ip(host: &str) -> bool {
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok()
}
