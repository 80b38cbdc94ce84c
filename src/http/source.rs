//! HTTP implementation of [`AsyncPageSource`]

use crate::error::{Error, Result};
use crate::source::AsyncPageSource;
use crate::types::{JsonObject, JsonValue, Page};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP method used to send request parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// Parameters go in the query string
    #[default]
    Get,
    /// Parameters go in a JSON body
    Post,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// Configuration for an HTTP page source
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Endpoint every page is fetched from
    pub url: String,
    /// How parameters are sent
    pub method: HttpMethod,
    /// Request timeout
    pub timeout: Duration,
    /// Headers sent with every request
    pub headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::Get,
            timeout: Duration::from_secs(30),
            headers: HashMap::new(),
            user_agent: format!("pagechain/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpSourceConfig {
    /// Create a new config builder
    pub fn builder(url: impl Into<String>) -> HttpSourceConfigBuilder {
        HttpSourceConfigBuilder {
            config: Self {
                url: url.into(),
                ..Self::default()
            },
        }
    }
}

/// Builder for HTTP source config
pub struct HttpSourceConfigBuilder {
    config: HttpSourceConfig,
}

impl HttpSourceConfigBuilder {
    /// Set the HTTP method
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpSourceConfig {
        self.config
    }
}

/// Page source backed by a JSON HTTP endpoint
pub struct HttpPageSource {
    client: Client,
    url: Url,
    config: HttpSourceConfig,
}

impl HttpPageSource {
    /// Create a GET source with default settings
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(HttpSourceConfig::builder(url).build())
    }

    /// Create a source from a config; fails on an unparsable URL
    pub fn with_config(config: HttpSourceConfig) -> Result<Self> {
        let url = Url::parse(&config.url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            url,
            config,
        })
    }

    /// Endpoint URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP method in use
    pub fn method(&self) -> HttpMethod {
        self.config.method
    }
}

#[async_trait]
impl AsyncPageSource for HttpPageSource {
    async fn fetch(&self, params: &JsonObject) -> Result<Page> {
        let mut req = self
            .client
            .request(self.config.method.into(), self.url.clone());

        for (key, value) in &self.config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req = match self.config.method {
            HttpMethod::Get => req.query(&query_pairs(params)),
            HttpMethod::Post => req.json(params),
        };

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(url = %self.url, status = status.as_u16(), "Page request succeeded");
        let body: JsonValue = response.json().await?;
        Page::from_value(body)
    }
}

impl std::fmt::Debug for HttpPageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("url", &self.url.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Flatten request parameters into query-string pairs.
///
/// Strings are sent verbatim, numbers and booleans in their JSON text form.
/// Arrays repeat the key once per non-null element, nulls are skipped and
/// objects are sent as JSON text.
pub fn query_pairs(params: &JsonObject) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            JsonValue::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
