use std::time::Duration;

use log::debug;
use reqwest::{Client, Proxy, StatusCode};
use thiserror::Error;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Browser user agent, some providers refuse non-browser clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed to set proxy: {0}")]
    Proxy(#[source] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(StatusCode),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Options shared by every outgoing request
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Optional proxy, e.g. "http://127.0.0.1:8080"
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            proxy: None,
        }
    }
}

/// Builds a client honoring the timeout, user agent and proxy in `config`
pub fn build_client(config: &HttpConfig) -> Result<Client, HttpError> {
    let mut client_builder = Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str());

    if let Some(proxy) = &config.proxy {
        if !proxy.is_empty() {
            client_builder = client_builder.proxy(Proxy::all(proxy).map_err(HttpError::Proxy)?);
        }
    }

    client_builder.build().map_err(HttpError::Client)
}

/// Makes a GET request to the specified URL and returns the body as text
///
/// # Arguments
/// * `client` - Client built with [`build_client`]
/// * `url` - The URL to request
pub async fn web_get_with(client: &Client, url: &str) -> Result<String, HttpError> {
    debug!("GET {}", url);
    let response = client
        .get(url)
        .header("Accept", "text/plain, application/yaml, */*")
        .send()
        .await
        .map_err(HttpError::Request)?;

    if response.status() != StatusCode::OK {
        return Err(HttpError::Status(response.status()));
    }

    response.text().await.map_err(HttpError::Body)
}

/// Convenience wrapper building a one-off client for a single request
pub async fn web_get(url: &str, config: &HttpConfig) -> Result<String, HttpError> {
    let client = build_client(config)?;
    web_get_with(&client, url).await
}
