/// Default number of pages a feed fetches: pages 1 through 9
pub const DEFAULT_MAX_PAGES: usize = 9;

/// Configuration for paginated requests
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// Pages fetched per run, counted from page 1
    pub max_pages: usize,
    /// Stop before `max_pages` once the source runs dry
    pub stop_when_exhausted: bool,
}

impl PaginationConfig {
    pub fn new() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            stop_when_exhausted: false,
        }
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = max;
        self
    }

    pub fn stop_when_exhausted(mut self, stop: bool) -> Self {
        self.stop_when_exhausted = stop;
        self
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new()
    }
}
