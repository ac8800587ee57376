use super::parsers;
use super::source::PhotoSource;
use crate::config::ApiSettings;
use crate::config::settings::ACCESS_KEY_VAR;
use crate::domain::PhotoPage;
use crate::errors::{fetch_context, with_parse_context};
use crate::http::HttpClient;
use crate::pagination::{build_paginated_url, build_paginated_url_with_params};
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;

const API_VERSION: &str = "v1";

/// Which listing the client pages through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoEndpoint {
    /// `GET /photos`, the editorial feed
    List,
    /// `GET /search/photos?query=..`
    Search(String),
}

/// Unsplash API client
pub struct UnsplashClient {
    client: HttpClient,
    base_url: String,
    endpoint: PhotoEndpoint,
    per_page: usize,
}

impl UnsplashClient {
    /// Create a new Unsplash API client. Fails without an access key.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let access_key = settings
            .access_key
            .as_deref()
            .with_context(|| format!("{} is not set", ACCESS_KEY_VAR))?;

        let client = HttpClient::with_headers(
            settings.user_agent,
            settings.timeout_secs,
            &[
                ("authorization", format!("Client-ID {}", access_key)),
                ("accept-version", API_VERSION.to_string()),
            ],
        )?;

        let endpoint = match settings.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => PhotoEndpoint::Search(query.to_string()),
            _ => PhotoEndpoint::List,
        };

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            endpoint,
            per_page: settings.per_page,
        })
    }

    pub fn endpoint(&self) -> &PhotoEndpoint {
        &self.endpoint
    }

    /// Fetch one page of photos
    pub async fn photos(&self, page: usize) -> Result<PhotoPage> {
        let url = self.build_page_url(page);
        debug!("Fetching photos page {} from {}", page, url);

        let response = self
            .client
            .get(&url)
            .await
            .with_context(|| fetch_context(&url))?;

        let data: Value = with_parse_context(response.json().await, "response body")?;
        let photos = self.parse_page(data)?;

        info!("Received {} photos on page {}", photos.results.len(), page);
        Ok(photos)
    }

    // --- Helper Methods ---

    fn build_page_url(&self, page: usize) -> String {
        match &self.endpoint {
            PhotoEndpoint::List => {
                build_paginated_url(&format!("{}/photos", self.base_url), page, self.per_page)
            }
            PhotoEndpoint::Search(query) => build_paginated_url_with_params(
                &format!("{}/search/photos", self.base_url),
                &[("query", query.as_str())],
                page,
                self.per_page,
            ),
        }
    }

    fn parse_page(&self, data: Value) -> Result<PhotoPage> {
        match self.endpoint {
            PhotoEndpoint::List => parsers::parse_photo_list(data),
            PhotoEndpoint::Search(_) => parsers::parse_search_page(data),
        }
    }
}

impl PhotoSource for UnsplashClient {
    async fn fetch_page(&mut self, page: usize) -> Result<PhotoPage> {
        self.photos(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(query: Option<&str>) -> ApiSettings {
        ApiSettings {
            access_key: Some("test-key".to_string()),
            query: query.map(str::to_string),
            base_url: "https://api.example.com/".to_string(),
            per_page: 12,
            ..ApiSettings::default()
        }
    }

    #[test]
    fn test_missing_access_key_is_rejected() {
        let err = UnsplashClient::new(&ApiSettings::default()).err().unwrap();
        assert_eq!(err.to_string(), "UNSPLASH_ACCESS_KEY is not set");
    }

    #[test]
    fn test_list_endpoint_url() {
        let client = UnsplashClient::new(&settings(None)).unwrap();

        assert_eq!(client.endpoint(), &PhotoEndpoint::List);
        assert_eq!(
            client.build_page_url(1),
            "https://api.example.com/photos?page=1&per_page=12"
        );
    }

    #[test]
    fn test_search_endpoint_url() {
        let client = UnsplashClient::new(&settings(Some(" mountain lake "))).unwrap();

        assert_eq!(
            client.endpoint(),
            &PhotoEndpoint::Search("mountain lake".to_string())
        );
        assert_eq!(
            client.build_page_url(3),
            "https://api.example.com/search/photos?query=mountain%20lake&page=3&per_page=12"
        );
    }

    #[test]
    fn test_blank_query_falls_back_to_list() {
        let client = UnsplashClient::new(&settings(Some("   "))).unwrap();
        assert_eq!(client.endpoint(), &PhotoEndpoint::List);
    }

    #[test]
    fn test_parse_page_follows_endpoint() {
        let list = UnsplashClient::new(&settings(None)).unwrap();
        let page = list
            .parse_page(serde_json::json!([{ "id": "a", "urls": {} }]))
            .unwrap();
        assert_eq!(page.results.len(), 1);

        let search = UnsplashClient::new(&settings(Some("cats"))).unwrap();
        assert!(search
            .parse_page(serde_json::json!([{ "id": "a", "urls": {} }]))
            .is_err());
    }
}
