use super::config::PaginationConfig;
use crate::api::parsers::has_more_pages;
use crate::domain::{FetchState, PhotoPage};

/// Walks page numbers for a feed, bounded by the configured page count
pub struct PageIterator {
    config: PaginationConfig,
}

impl PageIterator {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn has_reached_max(&self, state: &FetchState) -> bool {
        state.current_page() > self.config.max_pages
    }

    /// Whether a run should end early after applying `page`.
    /// Always false unless `stop_when_exhausted` is set.
    pub fn is_exhausted(&self, page: usize, added: usize, data: &PhotoPage) -> bool {
        if !self.config.stop_when_exhausted {
            return false;
        }
        added == 0 || !has_more_pages(data, page)
    }
}
