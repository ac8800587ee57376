use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use log::{info, warn};
use tokio::sync::Semaphore;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinSet;

use crate::api::UnsplashClient;
use crate::config::AppConfig;
use crate::domain::{Photo, PhotoSize};
use crate::http::HttpClient;
use crate::render::ConsoleRenderer;
use crate::services::accumulator::PaginationAccumulator;
use crate::services::observer::{FeedEvent, FeedSubscription};
use crate::services::thumbnails::ThumbnailLoader;

/// Totals for the images loaded alongside a feed
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ThumbnailStats {
    pub loaded: usize,
    pub failed: usize,
    pub bytes: usize,
}

pub struct BrowseService {
    config: AppConfig,
}

impl BrowseService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        info!("=== Browsing Unsplash ===");

        let client = UnsplashClient::new(&self.config.api)?;
        let mut accumulator = PaginationAccumulator::new(
            client,
            self.config.feed.pagination(),
            self.config.feed.page_delay_ms,
        );

        let renderer = ConsoleRenderer::new(accumulator.subscribe(), PhotoSize::Small);
        let render_task = tokio::spawn(renderer.run());

        let thumbnail_task = if self.config.thumbnails.enabled {
            let loader = self.build_loader()?;
            Some(tokio::spawn(load_thumbnails(
                loader,
                accumulator.subscribe(),
                self.config.thumbnails.max_concurrent,
            )))
        } else {
            None
        };

        let result = accumulator.run().await;
        // Dropping the accumulator closes the feed, which ends both followers.
        drop(accumulator);

        let summary = render_task.await.context("Renderer task panicked")?;
        info!(
            "  → Rendered {} photos from {} pages",
            summary.photos, summary.pages
        );

        if let Some(task) = thumbnail_task {
            let stats = task.await.context("Thumbnail task panicked")?;
            println!(
                "{} {} loaded, {} failed, {} KiB",
                "Thumbnails:".bold(),
                stats.loaded,
                stats.failed,
                stats.bytes / 1024
            );
        }

        result.context("Feed stopped early")?;
        info!("=== Browse Complete ===");
        Ok(())
    }

    fn build_loader(&self) -> Result<ThumbnailLoader> {
        let client = HttpClient::new(self.config.api.user_agent, self.config.api.timeout_secs)?;
        Ok(ThumbnailLoader::new(client, &self.config.thumbnails))
    }
}

/// Start one load per appended photo, at most `max_concurrent` in flight,
/// and wait for all of them once the feed closes
pub async fn load_thumbnails(
    loader: ThumbnailLoader,
    subscription: FeedSubscription,
    max_concurrent: usize,
) -> ThumbnailStats {
    follow_appended(subscription, max_concurrent, move |photo| {
        let loader = loader.clone();
        async move {
            let bytes = loader.load(&photo).await;
            (photo.id, bytes.map(|b| b.len()))
        }
    })
    .await
}

async fn follow_appended<F, Fut>(
    mut subscription: FeedSubscription,
    max_concurrent: usize,
    load: F,
) -> ThumbnailStats
where
    F: Fn(Photo) -> Fut,
    Fut: Future<Output = (String, Option<usize>)> + Send + 'static,
{
    let permits = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut loads = JoinSet::new();
    loop {
        match subscription.events.recv().await {
            Ok(FeedEvent::PhotoAppended { photo, .. }) => {
                let permits = Arc::clone(&permits);
                let load = load(photo);
                loads.spawn(async move {
                    // The semaphore is never closed, so this only waits.
                    let _permit = permits.acquire_owned().await;
                    load.await
                });
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!("Thumbnail loader missed {} feed events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }

    let mut stats = ThumbnailStats::default();
    while let Some(joined) = loads.join_next().await {
        match joined {
            Ok((id, Some(len))) => {
                println!("  {} {} ({} KiB)", "✓".green(), id, len / 1024);
                stats.loaded += 1;
                stats.bytes += len;
            }
            Ok((id, None)) => {
                println!("  {} {}", "✗".red(), id);
                stats.failed += 1;
            }
            Err(_) => stats.failed += 1,
        }
    }
    stats
}
