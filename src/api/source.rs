use crate::domain::PhotoPage;
use anyhow::Result;

/// Anything that can hand out numbered pages of photos
pub trait PhotoSource {
    /// Fetch page `page` (1-based)
    fn fetch_page(&mut self, page: usize) -> impl Future<Output = Result<PhotoPage>> + Send;
}
