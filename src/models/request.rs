// src/models/request.rs

//! Scoped transport options.
//!
//! A [`RequestScope`] is a stack of [`RequestOptions`] layers carried as a
//! plain value. Fetches read the innermost layer. Entering a scope derives a
//! new value, so the caller's scope is unchanged once the work returns, and
//! each concurrent crawl receives its own snapshot.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Option key for a proxy URL.
pub const PROXY: &str = "proxy";
/// Option key for the User-Agent header.
pub const USER_AGENT: &str = "user_agent";
/// Option key for a per-request timeout in seconds.
pub const TIMEOUT_SECS: &str = "timeout_secs";
/// Prefix for option keys that become request headers.
pub const HEADER_PREFIX: &str = "header.";

/// Open-ended transport options, keyed by option name.
///
/// Keys the HTTP fetcher does not understand are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestOptions(BTreeMap<String, String>);

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn proxy(&self) -> Option<&str> {
        self.get(PROXY)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.get(USER_AGENT)
    }

    /// Per-request timeout, if one is set.
    pub fn timeout(&self) -> Result<Option<Duration>> {
        self.get(TIMEOUT_SECS)
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    AppError::validation(format!("{TIMEOUT_SECS} must be an integer, got '{raw}'"))
                })
            })
            .transpose()
    }

    /// Header name/value pairs from `header.<Name>` keys.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter_map(|(k, v)| k.strip_prefix(HEADER_PREFIX).map(|name| (name, v)))
    }

    /// Keys that the HTTP fetcher does not interpret.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| !matches!(*k, PROXY | USER_AGENT | TIMEOUT_SECS))
            .filter(|k| !k.starts_with(HEADER_PREFIX))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Stack of option layers; the innermost layer is the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestScope {
    layers: Vec<RequestOptions>,
}

impl RequestScope {
    /// A scope with nothing active.
    pub fn root() -> Self {
        Self::default()
    }

    /// Options visible to fetches issued under this scope.
    pub fn active(&self) -> Option<&RequestOptions> {
        self.layers.last()
    }

    /// Number of nested layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Derive a scope with `options` pushed on top.
    pub fn nested(&self, options: RequestOptions) -> Self {
        let mut layers = self.layers.clone();
        layers.push(options);
        Self { layers }
    }

    /// Copy handed to a forked task.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Run `work` with `options` active.
    ///
    /// `self` is not modified, so on return (success or error) the
    /// caller is back under its previous configuration.
    pub async fn with_options<F, Fut, T>(&self, options: RequestOptions, work: F) -> T
    where
        F: FnOnce(RequestScope) -> Fut,
        Fut: Future<Output = T>,
    {
        work(self.nested(options)).await
    }
}
