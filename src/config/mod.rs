pub mod settings;

pub use settings::{ApiSettings, AppConfig, FeedSettings, ThumbnailSettings};
