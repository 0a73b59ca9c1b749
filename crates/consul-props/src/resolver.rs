//! Placeholder key resolution
//!
//! Decides whether a raw configuration key is addressed to this provider,
//! extracts and qualifies the lookup path, and coordinates the KV fetch.
//! Lookup failures are classified, logged with their cause, and suppressed:
//! one missing or forbidden secret must not abort the host's whole
//! configuration load, so this boundary reports "not resolved" instead of
//! propagating.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error};

use crate::client::KvRead;
use crate::error::PropertyError;
use crate::provider::ResolvedProperty;

/// Marker identifying keys addressed to this provider
pub(crate) const MARKER: &str = "consul::";

/// Provenance string attached to every resolved property
pub(crate) const PROVIDER_SOURCE: &str = "Consul provider source";

// The segment ends at the first `.` or `}` after the marker; both terminate
// an embedding template reference and must not reach the lookup path. Only
// the first occurrence of the marker is considered.
static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"consul::([^.}]*)").expect("key pattern compiles"));

/// Resolves raw placeholder keys against a KV store
///
/// Holds the store client and the immutable namespace prefix configured at
/// provider construction.
#[derive(Debug)]
pub(crate) struct KeyResolver<C> {
    client: C,
    key_prefix: String,
}

impl<C: KvRead> KeyResolver<C> {
    pub(crate) fn new(client: C, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Resolve a raw configuration key, or report that it is not ours.
    pub(crate) async fn resolve(&self, raw_key: &str) -> Option<ResolvedProperty> {
        if !raw_key.starts_with(MARKER) {
            return None;
        }

        let captures = KEY_PATTERN.captures(raw_key)?;
        let segment = captures.get(1).map_or("", |m| m.as_str());
        if segment.is_empty() {
            // An empty segment would address the store root when the prefix
            // is also empty.
            debug!(key = raw_key, "placeholder has no path segment");
            return None;
        }

        let path = format!("{}{}", self.key_prefix, segment);

        match self.client.fetch(&path).await {
            Ok(Some(value)) => Some(ResolvedProperty {
                key: path,
                value,
                source: PROVIDER_SOURCE.to_string(),
            }),
            Ok(None) => {
                debug!(path = %path, "no value stored at path");
                None
            }
            Err(source) => {
                match PropertyError::classify(&path, source) {
                    e @ PropertyError::NotFound { .. } => {
                        error!(cause = ?e, "error getting data from Consul, property not found");
                    }
                    e @ PropertyError::AccessDenied { .. } => {
                        error!(cause = ?e, "error getting data from Consul, access denied");
                    }
                    e @ PropertyError::Unknown { .. } => {
                        error!(cause = ?e, "error getting data from Consul");
                    }
                }
                None
            }
        }
    }
}
