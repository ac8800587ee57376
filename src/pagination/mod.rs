mod config;
mod iterator;
mod urls;

pub use config::{DEFAULT_MAX_PAGES, PaginationConfig};
pub use iterator::PageIterator;
pub use urls::{build_paginated_url, build_paginated_url_with_params};
