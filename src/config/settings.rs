use crate::domain::PhotoSize;
use crate::pagination::{DEFAULT_MAX_PAGES, PaginationConfig};
use std::env;

pub const ACCESS_KEY_VAR: &str = "UNSPLASH_ACCESS_KEY";
pub const API_URL_VAR: &str = "UNSPLASH_API_URL";

pub const DEFAULT_PAGE_DELAY_MS: u64 = 200;
pub const DEFAULT_PER_PAGE: usize = 30;
pub const DEFAULT_THUMBNAIL_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub max_pages: usize,
    pub page_delay_ms: u64,
    pub stop_when_exhausted: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            stop_when_exhausted: false,
        }
    }
}

impl FeedSettings {
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::new()
            .with_max_pages(self.max_pages)
            .stop_when_exhausted(self.stop_when_exhausted)
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub per_page: usize,
    pub access_key: Option<String>,
    /// Search query; `None` lists the editorial feed
    pub query: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.unsplash.com".to_string(),
            user_agent: "UnsplashBrowser/1.0",
            timeout_secs: 30,
            per_page: DEFAULT_PER_PAGE,
            access_key: None,
            query: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThumbnailSettings {
    pub enabled: bool,
    pub size: PhotoSize,
    /// Downloads allowed in flight at once
    pub max_concurrent: usize,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            size: PhotoSize::Regular,
            max_concurrent: DEFAULT_THUMBNAIL_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub feed: FeedSettings,
    pub thumbnails: ThumbnailSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus whatever the environment provides
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.api.access_key = non_empty_var(ACCESS_KEY_VAR);
        if let Some(url) = non_empty_var(API_URL_VAR) {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
