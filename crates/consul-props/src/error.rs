//! Error types for the Consul properties provider
//!
//! Failures are split into three layers: `KvError` is the raw outcome of a
//! single KV round-trip, `PropertyError` is the classified form used at the
//! resolution boundary, and `ProviderError` covers construction-time
//! failures, which are the only ones surfaced to the embedding host.

use thiserror::Error;

/// Raw failure from a single Consul KV round-trip
///
/// The HTTP status code is preserved unmodified so that classification can
/// happen at the resolver boundary rather than inside the transport.
#[derive(Error, Debug)]
pub enum KvError {
    /// Consul answered with a non-success status code
    #[error("Consul returned status {status} for {path}")]
    Status { status: u16, path: String },

    /// The request never produced an HTTP response
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into a value
    #[error("could not decode the value at {path}: {detail}")]
    Decode { path: String, detail: String },
}

/// Classified lookup failure
///
/// Every `KvError` maps to exactly one of these variants. The original
/// backend failure is kept as the cause for logging; callers of the public
/// API never see this type, they see an unresolved property.
#[derive(Error, Debug)]
pub enum PropertyError {
    /// The path does not exist in the KV store (HTTP 404)
    #[error("The property at {path} was not found")]
    NotFound {
        path: String,
        #[source]
        source: KvError,
    },

    /// The configured credentials may not read the path (HTTP 403)
    #[error("Access to the property at {path} is denied")]
    AccessDenied {
        path: String,
        #[source]
        source: KvError,
    },

    /// Anything the backend reported that is neither 404 nor 403
    #[error("Unknown backend exception")]
    Unknown {
        #[source]
        source: KvError,
    },
}

impl PropertyError {
    /// Classify a raw KV failure for the path that was being resolved.
    ///
    /// Total over `KvError`: 404 means not found, 403 means access denied,
    /// every other status and every transport or decode failure is unknown.
    pub fn classify(path: &str, source: KvError) -> Self {
        match &source {
            KvError::Status { status: 404, .. } => PropertyError::NotFound {
                path: path.to_string(),
                source,
            },
            KvError::Status { status: 403, .. } => PropertyError::AccessDenied {
                path: path.to_string(),
                source,
            },
            KvError::Status { .. } | KvError::Transport { .. } | KvError::Decode { .. } => {
                PropertyError::Unknown { source }
            }
        }
    }
}

/// Construction-time provider failures
///
/// A provider that cannot even build its backend connection is
/// non-functional for the whole configuration load, so these fail loudly
/// instead of degrading to "nothing resolved".
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A required construction parameter was not supplied by the host
    #[error("required parameter '{name}' is missing")]
    MissingParameter { name: String },

    /// The Consul server URL could not be parsed
    #[error("invalid Consul URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The underlying HTTP client could not be constructed
    #[error("could not build the Consul HTTP client")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}
