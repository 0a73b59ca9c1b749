//! Consul Configuration Properties Provider
//!
//! This crate resolves externalized configuration placeholders of the form
//! `consul::some/path` against HashiCorp Consul's KV store at
//! configuration-load time, so applications can keep secrets and
//! environment-specific values in a central store instead of static config
//! files.
//!
//! # Placeholder Syntax
//!
//! A key is addressed to this provider when it starts with the `consul::`
//! marker. The lookup segment is everything after the marker up to the
//! first `.` or `}`; the configured base key prefix is prepended to it:
//!
//! ```text
//! consul::db/password        ->  {prefix}db/password
//! consul::db/password.extra  ->  {prefix}db/password
//! ```
//!
//! # Resolution Semantics
//!
//! Every lookup is a fresh read: values may be dynamic secrets that change
//! between reads, so nothing is cached and nothing is retried. A missing,
//! forbidden, or erroring key resolves to nothing (logged, never thrown) —
//! a single bad secret must not abort the host's configuration load. Only
//! provider construction fails loudly.
//!
//! # Example
//!
//! ```rust,ignore
//! use consul_props::{ConsulConfig, ConsulProvider, PropertiesProvider};
//!
//! let provider = ConsulProvider::new(
//!     ConsulConfig::default()
//!         .with_url("http://localhost:8500")
//!         .with_key_prefix("myapp/")
//!         .with_token("acl-token"),
//! )?;
//!
//! if let Some(property) = provider.get_property("consul::db/password").await {
//!     println!("{} = {}", property.key, property.value);
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod params;
pub mod provider;

mod resolver;

pub use auth::ConsulAuth;
pub use client::{ConsulKvClient, KvRead};
pub use error::{KvError, PropertyError, ProviderError};
pub use params::{
    parameter_schema, ParameterKind, ParameterSpec, ParameterValue, ProviderParameters,
};
pub use provider::{ConsulConfig, ConsulProvider, PropertiesProvider, ResolvedProperty};
