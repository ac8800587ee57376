use crate::domain::{Photo, PhotoPage};
use crate::errors::with_parse_context;
use anyhow::Result;
use serde_json::Value;

/// Check if the source reports pages after `page`.
/// Sources that don't report a page count are assumed to have more.
pub fn has_more_pages(data: &PhotoPage, page: usize) -> bool {
    data.total_pages.map_or(true, |total| page < total)
}

/// Parse a `/search/photos` response
pub fn parse_search_page(data: Value) -> Result<PhotoPage> {
    with_parse_context(serde_json::from_value(data), "search page")
}

/// Parse a `/photos` response, which is a bare array
pub fn parse_photo_list(data: Value) -> Result<PhotoPage> {
    let photos: Vec<Photo> = with_parse_context(serde_json::from_value(data), "photo list")?;
    Ok(PhotoPage::new(photos))
}
