//! Authentication strategy for the Consul connection
//!
//! The host supplies credentials as optional parameters; exactly one mode is
//! selected at construction time and stays fixed for the provider's
//! lifetime. Token auth wins over basic auth when both are configured.

use tracing::debug;

/// Authentication mode for Consul requests
#[derive(Debug, Clone)]
pub enum ConsulAuth {
    /// Anonymous access
    None,
    /// ACL token, sent as the `X-Consul-Token` header
    Token(String),
    /// HTTP basic authentication
    Basic { username: String, password: String },
}

impl Default for ConsulAuth {
    fn default() -> Self {
        ConsulAuth::None
    }
}

impl ConsulAuth {
    /// Pick the authentication mode for a set of optional credentials.
    ///
    /// Deterministic and total: a present, non-empty token wins; otherwise a
    /// complete username/password pair selects basic auth; otherwise the
    /// connection is anonymous. Absent fields are a normal input.
    pub fn select(
        token: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            debug!("using token authentication");
            return ConsulAuth::Token(token.to_string());
        }

        if let (Some(username), Some(password)) = (username, password) {
            debug!("using basic authentication");
            return ConsulAuth::Basic {
                username: username.to_string(),
                password: password.to_string(),
            };
        }

        debug!("no credentials configured, connecting anonymously");
        ConsulAuth::None
    }

    /// Decorate an outgoing request with the selected credentials.
    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            ConsulAuth::None => request,
            ConsulAuth::Token(token) => request.header("X-Consul-Token", token),
            ConsulAuth::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }
}
