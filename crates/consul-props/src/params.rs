//! Provider construction parameters
//!
//! The embedding host owns discovery and form rendering; what reaches this
//! crate is a bag of already-parsed named values. This module declares the
//! parameters the provider understands as pure data (`parameter_schema`) and
//! the bag type the host hands over at construction time
//! (`ProviderParameters`).
//!
//! Absence of an optional parameter is a normal input, never an error: all
//! getters return `Option`.

use std::collections::HashMap;

/// Name of the required Consul server URL parameter
pub const CONSUL_URL: &str = "consul_url";
/// Name of the optional namespace prefix prepended to every lookup
pub const BASE_KEY_PREFIX: &str = "base_key_prefix";
/// Name of the optional ACL token parameter
pub const TOKEN: &str = "token";
/// Name of the optional basic-auth username parameter
pub const USERNAME: &str = "username";
/// Name of the optional basic-auth password parameter
pub const PASSWORD: &str = "password";

/// Value type a parameter is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Number,
    Boolean,
}

/// Declarative description of one construction parameter
///
/// This is display/collection metadata for the host; the core never reads
/// it back.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
    pub default: Option<&'static str>,
    pub description: &'static str,
}

/// The parameters this provider declares, in display order.
pub fn parameter_schema() -> &'static [ParameterSpec] {
    const SCHEMA: &[ParameterSpec] = &[
        ParameterSpec {
            name: CONSUL_URL,
            kind: ParameterKind::String,
            required: true,
            default: None,
            description: "URL for the Consul server",
        },
        ParameterSpec {
            name: BASE_KEY_PREFIX,
            kind: ParameterKind::String,
            required: false,
            default: Some(""),
            description: "Namespace prefix prepended to every key lookup",
        },
        ParameterSpec {
            name: TOKEN,
            kind: ParameterKind::String,
            required: false,
            default: None,
            description: "Consul ACL token with access to the necessary KV context",
        },
        ParameterSpec {
            name: USERNAME,
            kind: ParameterKind::String,
            required: false,
            default: None,
            description: "Basic auth username",
        },
        ParameterSpec {
            name: PASSWORD,
            kind: ParameterKind::String,
            required: false,
            default: None,
            description: "Basic auth password",
        },
    ];
    SCHEMA
}

/// A single parsed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl ParameterValue {
    /// The string content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, if this is a number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

/// Named construction values supplied once by the host
#[derive(Debug, Clone, Default)]
pub struct ProviderParameters {
    values: HashMap<String, ParameterValue>,
}

impl ProviderParameters {
    /// Create an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (builder pattern)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Add or replace a parameter
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// Look up a string parameter by name
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParameterValue::as_str)
    }

    /// Look up a numeric parameter by name
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParameterValue::as_number)
    }

    /// Look up a boolean parameter by name
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParameterValue::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_declares_url_as_only_required_parameter() {
        let schema = parameter_schema();
        let required: Vec<&str> = schema
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        assert_eq!(required, vec![CONSUL_URL]);
    }

    #[test]
    fn test_schema_defaults_prefix_to_empty() {
        let prefix = parameter_schema()
            .iter()
            .find(|p| p.name == BASE_KEY_PREFIX)
            .expect("prefix parameter is declared");
        assert_eq!(prefix.default, Some(""));
        assert_eq!(prefix.kind, ParameterKind::String);
    }

    #[test]
    fn test_typed_getters() {
        let params = ProviderParameters::new()
            .with(CONSUL_URL, "http://localhost:8500")
            .with("port", 8500.0)
            .with("verify", false);

        assert_eq!(params.get_string(CONSUL_URL), Some("http://localhost:8500"));
        assert_eq!(params.get_number("port"), Some(8500.0));
        assert_eq!(params.get_bool("verify"), Some(false));
    }

    #[test]
    fn test_absent_parameter_is_none() {
        let params = ProviderParameters::new();
        assert!(params.get(TOKEN).is_none());
        assert!(params.get_string(TOKEN).is_none());
    }

    #[test]
    fn test_type_mismatch_is_none() {
        let params = ProviderParameters::new().with(USERNAME, 42.0);
        assert!(params.get_string(USERNAME).is_none());
        assert_eq!(params.get_number(USERNAME), Some(42.0));
    }
}
