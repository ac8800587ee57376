use log::info;

/// Pagination cursor and loading flag of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchState {
    current_page: usize,
    is_loading: bool,
}

impl FetchState {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            is_loading: false,
        }
    }

    /// Next page to request. Starts at 1.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn pages_fetched(&self) -> usize {
        self.current_page - 1
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub(crate) fn advance(&mut self) {
        self.current_page += 1;
    }
}

impl Default for FetchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Running tally for a single page, logged once it has been applied
pub struct PageProgress {
    page: usize,
    received: usize,
    added: usize,
}

impl PageProgress {
    pub fn new(page: usize, received: usize) -> Self {
        Self {
            page,
            received,
            added: 0,
        }
    }

    pub fn increment_added(&mut self) {
        self.added += 1;
    }

    pub fn added(&self) -> usize {
        self.added
    }

    pub fn skipped(&self) -> usize {
        self.received - self.added
    }

    pub fn log_progress(&self, total: usize) {
        info!(
            "  → Page {}: {} new, {} duplicate ({} photos total)",
            self.page,
            self.added,
            self.skipped(),
            total
        );
    }
}
