// src/services/fetcher.rs

//! Page fetching.
//!
//! [`PageFetcher`] is the transport seam used by the crawlers. [`HttpFetcher`]
//! is the `reqwest` implementation; it applies the options active in the
//! caller's [`RequestScope`] to every request.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, RequestOptions, RequestScope};
use crate::utils::http::{create_async_client, create_scoped_client};

/// Fetches the raw text of one page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` under `scope`. Failures are not retried.
    async fn fetch(&self, url: &Url, scope: &RequestScope) -> Result<String>;
}

type ClientKey = (Option<String>, Option<String>);

/// HTTP fetcher sharing one connection pool across all crawls.
pub struct HttpFetcher {
    config: CrawlerConfig,
    client: Client,
    /// Clients for scopes that override proxy or user agent
    scoped: Mutex<HashMap<ClientKey, Client>>,
}

impl HttpFetcher {
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        let client = create_async_client(&config)?;
        Ok(Self {
            config,
            client,
            scoped: Mutex::new(HashMap::new()),
        })
    }

    fn client_for(&self, options: Option<&RequestOptions>) -> Result<Client> {
        let Some(options) = options else {
            return Ok(self.client.clone());
        };
        let key = (
            options.proxy().map(str::to_string),
            options.user_agent().map(str::to_string),
        );
        if key == (None, None) {
            return Ok(self.client.clone());
        }

        let mut scoped = self.scoped.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = scoped.get(&key) {
            return Ok(client.clone());
        }
        let client = create_scoped_client(&self.config, key.0.as_deref(), key.1.as_deref())?;
        scoped.insert(key, client.clone());
        Ok(client)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, scope: &RequestScope) -> Result<String> {
        let options = scope.active();
        let client = self
            .client_for(options)
            .map_err(|e| AppError::transport(url.as_str(), e))?;
        let mut request = client.get(url.clone());

        if let Some(options) = options {
            for (name, value) in options.headers() {
                request = request.header(name, value);
            }
            if let Some(timeout) = options.timeout()? {
                request = request.timeout(timeout);
            }
            for key in options.unrecognized() {
                log::debug!("Transport option '{key}' is not used by the HTTP fetcher");
            }
        }

        log::debug!("GET {url}");
        let response = request
            .send()
            .await
            .map_err(|e| AppError::transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::transport(url.as_str(), format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::transport(url.as_str(), e))
    }
}
