use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};

pub const DEFAULT_USER_AGENT: &str = concat!("matchcount/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Raw access to the upstream API: one GET, body returned undecoded
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub user_agent: String,
    /// Deadline for a single request, connect included
    pub timeout: Duration,
    /// Extra attempts after a transport failure
    pub retries: u32,
    /// Delay before the first retry, doubled for each one after
    pub retry_backoff: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;

        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;

        self
    }

    /// Backoff to wait before retry number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("retry_backoff", &self.retry_backoff)
            .finish_non_exhaustive()
    }
}

/// [`Transport`] backed by a shared reqwest client
#[derive(Clone)]
pub struct HttpTransport {
    http_client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = http_client(&config)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    async fn get_once(&self, url: &str) -> Result<String> {
        let response = self.http_client.get(url).send().await?;
        let body = response.text().await?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.config.retries => {
                    attempt += 1;
                    let delay = self.config.backoff_for(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "upstream request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish()
    }
}

fn http_client(config: &ClientConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut api_key = HeaderValue::from_str(&config.api_key)
        .map_err(|_| Error::InvalidInput("API key is not a valid header value".to_string()))?;
    api_key.set_sensitive(true);
    headers.insert(API_KEY_HEADER, api_key);

    Client::builder()
        .default_headers(headers)
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Internal(format!("failed to build HTTP client: {e}"))
        })
}
