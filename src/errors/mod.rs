use anyhow::Context as _;
use thiserror::Error;

/// Failure of a feed run
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network, status, or decoding failure while fetching a page
    #[error("Failed to fetch page {page}")]
    PageFetch {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl FeedError {
    pub fn page_fetch(page: usize, source: anyhow::Error) -> Self {
        FeedError::PageFetch {
            page,
            source: source.into(),
        }
    }

    pub fn page(&self) -> usize {
        match self {
            FeedError::PageFetch { page, .. } => *page,
        }
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with fetch context
pub fn with_fetch_context<T, E>(result: Result<T, E>, url: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(fetch_context(url))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
