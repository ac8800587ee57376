use std::sync::Arc;

use log::{debug, info};

use crate::api::PhotoSource;
use crate::domain::{PageProgress, Photo, PhotoPage};
use crate::errors::FeedError;
use crate::pagination::{PageIterator, PaginationConfig};
use crate::rate_limiter::{PauseInterrupt, RateLimiter};
use crate::services::observer::{FeedPublisher, FeedState, FeedSubscription};

/// Pulls pages from a [`PhotoSource`] one at a time and folds them into a
/// deduplicated, observable photo collection.
///
/// The accumulator is the only writer of its feed state. Readers go through
/// [`PaginationAccumulator::subscribe`].
pub struct PaginationAccumulator<S> {
    source: S,
    pages: PageIterator,
    pacer: RateLimiter,
    publisher: Arc<FeedPublisher>,
}

impl<S: PhotoSource> PaginationAccumulator<S> {
    pub fn new(source: S, config: PaginationConfig, page_delay_ms: u64) -> Self {
        Self {
            source,
            pages: PageIterator::new(config),
            pacer: RateLimiter::new(page_delay_ms),
            publisher: Arc::new(FeedPublisher::new()),
        }
    }

    pub fn subscribe(&self) -> FeedSubscription {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> FeedState {
        self.publisher.snapshot()
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.publisher.snapshot().photos.into_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.publisher.is_loading()
    }

    /// Handle that cuts the current inter-page pause short
    pub fn pause_interrupt(&self) -> PauseInterrupt {
        self.pacer.interrupt_handle()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch pages from the current page up to the configured limit.
    ///
    /// The loading flag is raised for the whole run and lowered on every exit,
    /// including a failed page or the future being dropped mid-run.
    pub async fn run(&mut self) -> Result<(), FeedError> {
        let _loading = LoadingGuard::raise(Arc::clone(&self.publisher));
        self.fetch_pages().await
    }

    async fn fetch_pages(&mut self) -> Result<(), FeedError> {
        loop {
            let state = self.publisher.snapshot().fetch;
            if self.pages.has_reached_max(&state) {
                break;
            }

            let page = state.current_page();
            let data = self
                .source
                .fetch_page(page)
                .await
                .map_err(|e| FeedError::page_fetch(page, e))?;

            let added = self.apply_page(page, &data);

            if self.pages.is_exhausted(page, added, &data) {
                info!("Source exhausted after page {}, stopping early", page);
                break;
            }

            if !self.pacer.pause().await {
                debug!("Pause after page {} interrupted", page);
            }
        }
        Ok(())
    }

    fn apply_page(&self, page: usize, data: &PhotoPage) -> usize {
        let mut progress = PageProgress::new(page, data.results.len());
        for photo in &data.results {
            if self.publisher.append(photo.clone()) {
                progress.increment_added();
            }
        }
        self.publisher.complete_page(page, progress.added());
        progress.log_progress(self.publisher.photo_count());
        progress.added()
    }
}

/// Holds the loading flag up until dropped
struct LoadingGuard {
    publisher: Arc<FeedPublisher>,
}

impl LoadingGuard {
    fn raise(publisher: Arc<FeedPublisher>) -> Self {
        publisher.set_loading(true);
        Self { publisher }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.publisher.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedSettings;
    use crate::domain::collection::photo;
    use crate::services::observer::FeedEvent;
    use anyhow::{Result, bail};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::watch;

    /// Serves canned pages and records every request
    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<usize, Vec<&'static str>>,
        total_pages: Option<usize>,
        fail_on: Option<usize>,
        calls: Vec<usize>,
        loading_seen: Vec<bool>,
        observer: Arc<Mutex<Option<watch::Receiver<FeedState>>>>,
    }

    impl FakeSource {
        fn with_pages(pages: &[&[&'static str]]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .enumerate()
                    .map(|(i, ids)| (i + 1, ids.to_vec()))
                    .collect(),
                ..Self::default()
            }
        }

        fn failing_on(mut self, page: usize) -> Self {
            self.fail_on = Some(page);
            self
        }
    }

    impl PhotoSource for FakeSource {
        async fn fetch_page(&mut self, page: usize) -> Result<PhotoPage> {
            self.calls.push(page);
            let loading = self
                .observer
                .lock()
                .unwrap()
                .as_ref()
                .map(|rx| rx.borrow().is_loading());
            if let Some(loading) = loading {
                self.loading_seen.push(loading);
            }

            if self.fail_on == Some(page) {
                bail!("connection reset on page {}", page);
            }

            let ids = self.pages.get(&page).cloned().unwrap_or_default();
            Ok(PhotoPage {
                total: None,
                total_pages: self.total_pages,
                results: ids.into_iter().map(photo).collect(),
            })
        }
    }

    fn accumulator(source: FakeSource, max_pages: usize) -> PaginationAccumulator<FakeSource> {
        PaginationAccumulator::new(source, PaginationConfig::new().with_max_pages(max_pages), 0)
    }

    fn ids(acc: &PaginationAccumulator<FakeSource>) -> Vec<String> {
        acc.photos().into_iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_overlapping_pages_are_merged_in_first_seen_order() {
        let mut acc = accumulator(FakeSource::with_pages(&[&["A", "B"], &["B", "C"]]), 2);

        acc.run().await.unwrap();

        assert_eq!(ids(&acc), vec!["A", "B", "C"]);
        assert!(!acc.is_loading());
    }

    #[tokio::test]
    async fn test_exactly_max_pages_requested_in_order() {
        let mut acc = accumulator(FakeSource::with_pages(&[&["A"]]), 10);

        acc.run().await.unwrap();

        assert_eq!(acc.source().calls, (1..=10).collect::<Vec<_>>());
        assert_eq!(acc.snapshot().fetch.current_page(), 11);
    }

    #[tokio::test]
    async fn test_default_feed_requests_first_nine_pages() {
        let feed = FeedSettings {
            page_delay_ms: 0,
            ..FeedSettings::default()
        };
        let mut acc = PaginationAccumulator::new(
            FakeSource::with_pages(&[&["A"], &["B"]]),
            feed.pagination(),
            feed.page_delay_ms,
        );

        acc.run().await.unwrap();

        assert_eq!(acc.source().calls, (1..=9).collect::<Vec<_>>());
        assert_eq!(ids(&acc), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_result_is_union_of_pages() {
        let pages: &[&[&'static str]] = &[
            &["a", "b", "c"],
            &["c", "d"],
            &[],
            &["e", "a", "f", "d"],
            &["g", "g"],
        ];
        let mut acc = accumulator(FakeSource::with_pages(pages), pages.len());

        acc.run().await.unwrap();

        let expected: HashSet<&str> = pages.iter().flat_map(|p| p.iter().copied()).collect();
        let got = ids(&acc);
        assert_eq!(got.len(), expected.len());
        assert_eq!(got, vec!["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_pages_and_releases_loading() {
        let source = FakeSource::with_pages(&[&["A", "B"], &["C"]]).failing_on(2);
        let mut acc = accumulator(source, 10);

        let err = acc.run().await.unwrap_err();

        assert!(matches!(err, FeedError::PageFetch { page: 2, .. }));
        assert_eq!(ids(&acc), vec!["A", "B"]);
        assert_eq!(acc.source().calls, vec![1, 2]);
        assert!(!acc.is_loading());
    }

    #[tokio::test]
    async fn test_rerun_after_failure_resumes_at_failed_page() {
        let source = FakeSource::with_pages(&[&["A"], &["B"], &["C"]]).failing_on(2);
        let mut acc = accumulator(source, 3);

        assert!(acc.run().await.is_err());
        acc.source.fail_on = None;
        acc.run().await.unwrap();

        assert_eq!(acc.source().calls, vec![1, 2, 2, 3]);
        assert_eq!(ids(&acc), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_completed_feed_does_not_refetch() {
        let mut acc = accumulator(FakeSource::with_pages(&[&["A"]]), 1);

        acc.run().await.unwrap();
        acc.run().await.unwrap();

        assert_eq!(acc.source().calls, vec![1]);
    }

    #[tokio::test]
    async fn test_loading_is_raised_during_every_fetch() {
        let source = FakeSource::with_pages(&[&["A"], &["B"], &["C"]]);
        let observer = Arc::clone(&source.observer);
        let mut acc = accumulator(source, 3);
        *observer.lock().unwrap() = Some(acc.subscribe().state);

        assert!(!acc.is_loading());
        acc.run().await.unwrap();

        assert_eq!(acc.source().loading_seen, vec![true, true, true]);
        assert!(!acc.is_loading());
    }

    #[tokio::test]
    async fn test_events_bracket_the_run() {
        let mut acc = accumulator(FakeSource::with_pages(&[&["A", "B"], &["B"]]), 2);
        let mut sub = acc.subscribe();

        acc.run().await.unwrap();

        let mut events = Vec::new();
        while let Ok(event) = sub.events.try_recv() {
            events.push(event);
        }

        assert_eq!(
            events,
            vec![
                FeedEvent::LoadingChanged(true),
                FeedEvent::PhotoAppended { index: 0, photo: photo("A") },
                FeedEvent::PhotoAppended { index: 1, photo: photo("B") },
                FeedEvent::PageApplied { page: 1, added: 2, total: 2 },
                FeedEvent::PageApplied { page: 2, added: 0, total: 2 },
                FeedEvent::LoadingChanged(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_stop_when_exhausted_ends_early() {
        let mut source = FakeSource::with_pages(&[&["A"], &["B"], &["C"]]);
        source.total_pages = Some(2);
        let config = PaginationConfig::new().with_max_pages(10).stop_when_exhausted(true);
        let mut acc = PaginationAccumulator::new(source, config, 0);

        acc.run().await.unwrap();

        assert_eq!(acc.source().calls, vec![1, 2]);
        assert_eq!(ids(&acc), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_stop_when_page_adds_nothing() {
        let source = FakeSource::with_pages(&[&["A"], &["A"], &["B"]]);
        let config = PaginationConfig::new().with_max_pages(10).stop_when_exhausted(true);
        let mut acc = PaginationAccumulator::new(source, config, 0);

        acc.run().await.unwrap();

        assert_eq!(acc.source().calls, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_interrupted_pause_does_not_fail_run() {
        let source = FakeSource::with_pages(&[&["A"], &["B"]]);
        let mut acc = PaginationAccumulator::new(
            source,
            PaginationConfig::new().with_max_pages(2),
            60_000,
        );
        let interrupt = acc.pause_interrupt();

        let run = tokio::spawn(async move {
            let result = acc.run().await;
            result.map(|_| acc)
        });
        for _ in 0..2 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            interrupt.interrupt();
        }

        let acc = tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .expect("run should finish once pauses are interrupted")
            .unwrap()
            .unwrap();
        assert_eq!(ids(&acc), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_dropped_run_releases_loading() {
        let source = FakeSource::with_pages(&[&["A"], &["B"]]);
        let mut acc = PaginationAccumulator::new(
            source,
            PaginationConfig::new().with_max_pages(2),
            60_000,
        );

        let timed_out = tokio::time::timeout(Duration::from_millis(50), acc.run()).await;

        assert!(timed_out.is_err());
        assert_eq!(ids(&acc), vec!["A"]);
        assert!(!acc.is_loading());
    }
}
