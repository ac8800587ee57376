pub mod collection;
pub mod models;
pub mod progress;

pub use collection::PhotoCollection;
pub use models::{Photo, PhotoPage, PhotoSize, PhotoUser};
pub use progress::{FetchState, PageProgress};
