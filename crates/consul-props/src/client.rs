//! Consul KV backend client
//!
//! A thin authenticated HTTP client over Consul's KV read endpoint. Each
//! `fetch` is one fresh round-trip: values may be dynamic secrets that
//! legitimately change between reads, so nothing is cached and nothing is
//! retried here.
//!
//! The client distinguishes a stored-but-empty value (`Ok(None)`) from a
//! backend failure (`Err`); classification of failures happens at the
//! resolver boundary, not here.

use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;

use crate::auth::ConsulAuth;
use crate::error::{KvError, ProviderError};

/// Read access to a key-value store
///
/// The seam between key resolution and the transport. `fetch` returns the
/// raw string value at a fully qualified path, `Ok(None)` when the store
/// answers without a value, and the unclassified backend failure otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KvRead: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Option<String>, KvError>;
}

/// One entry of a Consul KV read response; `Value` is base64-encoded and
/// null for keys stored without a value.
#[derive(Debug, Deserialize)]
struct KvEntry {
    #[serde(rename = "Value")]
    value: Option<String>,
}

/// HTTP client for Consul's KV read endpoint
///
/// Owned exclusively by the provider instance that created it. The
/// underlying `reqwest::Client` tolerates concurrent use, so one client
/// serves all reader threads of a configuration load.
#[derive(Debug, Clone)]
pub struct ConsulKvClient {
    http: reqwest::Client,
    base_url: String,
    auth: ConsulAuth,
}

impl ConsulKvClient {
    /// Build a client for the given Consul server URL.
    ///
    /// Fails loudly on an unparseable URL or an unconstructable HTTP
    /// client: a provider that cannot reach its store at all is
    /// non-functional for the whole load cycle.
    pub fn new(base_url: &str, auth: ConsulAuth) -> Result<Self, ProviderError> {
        url::Url::parse(base_url).map_err(|source| ProviderError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|source| ProviderError::ClientBuild { source })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn kv_url(&self, path: &str) -> String {
        format!("{}/v1/kv/{}", self.base_url, path)
    }

    fn decode_value(path: &str, raw: &str) -> Result<String, KvError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(raw)
            .map_err(|e| KvError::Decode {
                path: path.to_string(),
                detail: e.to_string(),
            })?;
        String::from_utf8(bytes).map_err(|e| KvError::Decode {
            path: path.to_string(),
            detail: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl KvRead for ConsulKvClient {
    async fn fetch(&self, path: &str) -> Result<Option<String>, KvError> {
        let url = self.kv_url(path);
        debug!(url = %url, "reading key from Consul");

        let request = self.auth.apply(self.http.get(&url));
        let response = request.send().await.map_err(|source| KvError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(KvError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let entries: Vec<KvEntry> = response.json().await.map_err(|e| KvError::Decode {
            path: path.to_string(),
            detail: e.to_string(),
        })?;

        match entries.into_iter().next().and_then(|entry| entry.value) {
            Some(raw) => Self::decode_value(path, &raw).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn test_kv_url_strips_trailing_slash() {
        let client = ConsulKvClient::new("http://localhost:8500/", ConsulAuth::None).unwrap();
        assert_eq!(
            client.kv_url("myapp/db/password"),
            "http://localhost:8500/v1/kv/myapp/db/password"
        );
    }

    #[test]
    fn test_invalid_url_fails_construction() {
        let result = ConsulKvClient::new("not a url", ConsulAuth::None);
        assert!(matches!(result, Err(ProviderError::InvalidUrl { .. })));
    }

    #[test]
    fn test_decode_value_roundtrip() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("secretValue");
        let decoded = ConsulKvClient::decode_value("any", &encoded).unwrap();
        assert_eq!(decoded, "secretValue");
    }

    #[test]
    fn test_decode_value_rejects_invalid_base64() {
        let result = ConsulKvClient::decode_value("any", "!!not-base64!!");
        assert!(matches!(result, Err(KvError::Decode { .. })));
    }
}
