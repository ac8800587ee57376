use colored::Colorize;
use log::warn;
use tokio::sync::broadcast::error::RecvError;

use crate::domain::{Photo, PhotoSize};
use crate::services::observer::{FeedEvent, FeedSubscription};

/// Prints the feed to stdout as it grows
pub struct ConsoleRenderer {
    subscription: FeedSubscription,
    size: PhotoSize,
}

/// What a renderer saw before the feed closed
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderSummary {
    pub photos: usize,
    pub pages: usize,
    pub still_loading: bool,
}

impl ConsoleRenderer {
    pub fn new(subscription: FeedSubscription, size: PhotoSize) -> Self {
        Self { subscription, size }
    }

    /// Render events until the publisher goes away
    pub async fn run(mut self) -> RenderSummary {
        let mut summary = RenderSummary::default();
        loop {
            match self.subscription.events.recv().await {
                Ok(event) => {
                    self.track(&mut summary, &event);
                    println!("{}", self.format_event(&event));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Renderer fell behind by {} events, resyncing", skipped);
                    let state = self.subscription.snapshot();
                    summary.photos = state.photos.len();
                    summary.pages = state.fetch.pages_fetched();
                    summary.still_loading = state.is_loading();
                }
                Err(RecvError::Closed) => break,
            }
        }
        summary
    }

    fn track(&self, summary: &mut RenderSummary, event: &FeedEvent) {
        match event {
            FeedEvent::LoadingChanged(loading) => summary.still_loading = *loading,
            FeedEvent::PhotoAppended { .. } => summary.photos += 1,
            FeedEvent::PageApplied { .. } => summary.pages += 1,
        }
    }

    fn format_event(&self, event: &FeedEvent) -> String {
        match event {
            FeedEvent::LoadingChanged(true) => format!("{}", "Loading…".yellow().bold()),
            FeedEvent::LoadingChanged(false) => format!("{}", "Done".green().bold()),
            FeedEvent::PhotoAppended { index, photo } => self.format_photo(*index, photo),
            FeedEvent::PageApplied { page, added, total } => format!(
                "{} +{} new, {} total",
                format!("[page {}]", page).cyan(),
                added,
                total
            ),
        }
    }

    fn format_photo(&self, index: usize, photo: &Photo) -> String {
        let url = photo.url(self.size).unwrap_or("-");
        let by = photo
            .photographer()
            .map(|name| format!(" by {}", name))
            .unwrap_or_default();
        format!(
            "{:>4}. {} {}{}\n      {}",
            index + 1,
            photo.id.bold(),
            photo.caption(),
            by.dimmed(),
            url.blue()
        )
    }
}
