//! Property facade
//!
//! The public entry point of the crate: a `ConsulProvider` is constructed
//! once from host-supplied parameters and then queried with raw
//! configuration keys. Construction is the only operation that can fail;
//! lookups report either a resolved property or nothing.

use std::fmt;

use tracing::debug;

use crate::auth::ConsulAuth;
use crate::client::ConsulKvClient;
use crate::error::ProviderError;
use crate::params::{self, ProviderParameters};
use crate::resolver::KeyResolver;

/// A successfully resolved configuration property
///
/// `key` is the fully qualified store path, `value` the raw string the
/// store returned, and `source` identifies this provider as the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperty {
    pub key: String,
    pub value: String,
    pub source: String,
}

/// A source of externalized configuration properties
///
/// Implementations must be safe under concurrent read-only invocation: the
/// host evaluates many placeholders, in no defined order, possibly from
/// several threads.
#[async_trait::async_trait]
pub trait PropertiesProvider: Send + Sync + fmt::Debug {
    /// Unique name of this provider
    fn name(&self) -> &str;

    /// Human-readable description of this provider
    fn description(&self) -> &str;

    /// Resolve a raw configuration key.
    ///
    /// Returns `None` when the key is not addressed to this provider, when
    /// the store holds no value at the derived path, or when the lookup
    /// failed. Never fails and never panics: the host processes many
    /// providers per load cycle and a single bad key must not crash it.
    async fn get_property(&self, key: &str) -> Option<ResolvedProperty>;
}

/// Construction settings for a [`ConsulProvider`]
#[derive(Debug, Clone, Default)]
pub struct ConsulConfig {
    /// URL of the Consul server (e.g. "http://localhost:8500")
    pub url: String,
    /// Namespace prefix prepended to every lookup (may be empty)
    pub key_prefix: String,
    /// Authentication mode
    pub auth: ConsulAuth,
}

impl ConsulConfig {
    /// Set the Consul server URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the namespace prefix prepended to every lookup
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Use token authentication
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth = ConsulAuth::Token(token.into());
        self
    }

    /// Use basic authentication
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = ConsulAuth::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Build a configuration from the host-supplied parameter bag.
    ///
    /// `consul_url` is required; the key prefix defaults to the empty
    /// string; the authentication mode is selected from whichever
    /// credential parameters are present.
    pub fn from_parameters(parameters: &ProviderParameters) -> Result<Self, ProviderError> {
        let url = parameters.get_string(params::CONSUL_URL).ok_or_else(|| {
            ProviderError::MissingParameter {
                name: params::CONSUL_URL.to_string(),
            }
        })?;

        let key_prefix = match parameters.get_string(params::BASE_KEY_PREFIX) {
            Some(prefix) => prefix.to_string(),
            None => {
                debug!("base key prefix parameter is not present");
                String::new()
            }
        };

        let auth = ConsulAuth::select(
            parameters.get_string(params::TOKEN),
            parameters.get_string(params::USERNAME),
            parameters.get_string(params::PASSWORD),
        );

        Ok(Self {
            url: url.to_string(),
            key_prefix,
            auth,
        })
    }
}

/// Configuration properties provider backed by Consul's KV store
///
/// Owns its backend connection exclusively; create one instance per
/// configured provider. All state is fixed at construction, so an instance
/// can be shared freely across reader threads.
#[derive(Debug)]
pub struct ConsulProvider {
    resolver: KeyResolver<ConsulKvClient>,
}

impl ConsulProvider {
    /// Create a provider from a configuration.
    ///
    /// This is the one loud failure point: a provider whose backend
    /// connection cannot be built would silently resolve nothing forever,
    /// so the error is surfaced to the host instead.
    pub fn new(config: ConsulConfig) -> Result<Self, ProviderError> {
        let client = ConsulKvClient::new(&config.url, config.auth)?;
        Ok(Self {
            resolver: KeyResolver::new(client, config.key_prefix),
        })
    }

    /// Create a provider directly from the host-supplied parameter bag.
    pub fn from_parameters(parameters: &ProviderParameters) -> Result<Self, ProviderError> {
        Self::new(ConsulConfig::from_parameters(parameters)?)
    }
}

#[async_trait::async_trait]
impl PropertiesProvider for ConsulProvider {
    fn name(&self) -> &str {
        "consul"
    }

    fn description(&self) -> &str {
        "Consul properties provider"
    }

    async fn get_property(&self, key: &str) -> Option<ResolvedProperty> {
        self.resolver.resolve(key).await
    }
}
