use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;

/// Shared HTTP client with fixed default headers. Cheap to clone.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        Self::with_headers(user_agent, timeout_secs, &[])
    }

    pub fn with_headers(
        user_agent: &str,
        timeout_secs: u64,
        headers: &[(&'static str, String)],
    ) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs, headers)?;
        Ok(Self { client })
    }

    /// GET that fails on non-success status codes
    pub async fn get(&self, url: &str) -> Result<Response> {
        let response = self.send_get_request(url).await?;
        if !response.status().is_success() {
            anyhow::bail!("{} returned status: {}", url, response.status());
        }
        Ok(response)
    }

    fn build_client(
        user_agent: &str,
        timeout_secs: u64,
        headers: &[(&'static str, String)],
    ) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(Self::build_headers(headers)?)
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_headers(headers: &[(&'static str, String)]) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {}", name))?;
            map.insert(HeaderName::from_static(*name), value);
        }
        Ok(map)
    }

    async fn send_get_request(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }
}
