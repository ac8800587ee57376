pub mod parsers;
mod source;
mod unsplash_client;

pub use source::PhotoSource;
pub use unsplash_client::{PhotoEndpoint, UnsplashClient};
