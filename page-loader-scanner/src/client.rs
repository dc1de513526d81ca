use crate::error::{Result, ScanError};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = concat!("page-loader/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: 5,
        }
    }
}

/// Thin wrapper over `reqwest::Client` that turns non-2xx responses into errors.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs((config.timeout_secs / 2).max(1)))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a body decoded as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }

    /// Fetch a body as raw bytes.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get(&self, url: &str) -> Result<Response> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }
}
