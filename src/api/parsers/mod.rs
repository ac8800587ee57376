pub mod pagination;

pub use pagination::{has_more_pages, parse_photo_list, parse_search_page};
