// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};

use crate::error::Result;
use crate::models::CrawlerConfig;

fn base_builder(config: &CrawlerConfig) -> ClientBuilder {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<Client> {
    Ok(base_builder(config).build()?)
}

/// Create a client that differs from the base one in proxy or user agent.
pub fn create_scoped_client(
    config: &CrawlerConfig,
    proxy: Option<&str>,
    user_agent: Option<&str>,
) -> Result<Client> {
    let mut builder = base_builder(config);
    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }
    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent);
    }
    Ok(builder.build()?)
}
