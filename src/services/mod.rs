pub mod accumulator;
pub mod browse;
pub mod observer;
pub mod thumbnails;

pub use accumulator::PaginationAccumulator;
pub use browse::{BrowseService, ThumbnailStats};
pub use observer::{FeedEvent, FeedPublisher, FeedState, FeedSubscription};
pub use thumbnails::ThumbnailLoader;
