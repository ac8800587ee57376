use log::{debug, warn};

use crate::config::ThumbnailSettings;
use crate::domain::{Photo, PhotoSize};
use crate::errors::with_fetch_context;
use crate::http::HttpClient;

/// Downloads image bytes for a single photo. Failures are logged and
/// reported as `None`; callers keep showing their placeholder.
#[derive(Clone)]
pub struct ThumbnailLoader {
    client: HttpClient,
    size: PhotoSize,
}

impl ThumbnailLoader {
    pub fn new(client: HttpClient, settings: &ThumbnailSettings) -> Self {
        Self {
            client,
            size: settings.size,
        }
    }

    pub async fn load(&self, photo: &Photo) -> Option<Vec<u8>> {
        let Some(url) = photo.url(self.size) else {
            warn!("Photo {} has no {} image", photo.id, self.size);
            return None;
        };

        match self.fetch_bytes(url).await {
            Ok(bytes) if bytes.is_empty() => {
                warn!("Empty {} image for photo {}", self.size, photo.id);
                None
            }
            Ok(bytes) => {
                debug!("Loaded {} bytes for photo {}", bytes.len(), photo.id);
                Some(bytes)
            }
            Err(e) => {
                warn!("Failed to load image for photo {}: {:#}", photo.id, e);
                None
            }
        }
    }

    async fn fetch_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let response = self.client.get(url).await?;
        let bytes = with_fetch_context(response.bytes().await, url)?;
        Ok(bytes.to_vec())
    }
}
