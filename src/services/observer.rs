use crate::domain::{FetchState, Photo, PhotoCollection};
use log::debug;
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 1024;

/// Everything a renderer needs to draw the feed
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub photos: PhotoCollection,
    pub fetch: FetchState,
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }
}

/// One discrete change to a [`FeedState`], sent after it has been applied
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    LoadingChanged(bool),
    PhotoAppended { index: usize, photo: Photo },
    PageApplied { page: usize, added: usize, total: usize },
}

/// Write side of the feed. Only the accumulator holds one.
pub struct FeedPublisher {
    state: watch::Sender<FeedState>,
    events: broadcast::Sender<FeedEvent>,
}

/// Read side of the feed: a snapshot that always reflects the latest state,
/// plus the stream of changes that led there
pub struct FeedSubscription {
    pub state: watch::Receiver<FeedState>,
    pub events: broadcast::Receiver<FeedEvent>,
}

impl FeedSubscription {
    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }
}

impl FeedPublisher {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FeedState::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { state, events }
    }

    pub fn subscribe(&self) -> FeedSubscription {
        FeedSubscription {
            state: self.state.subscribe(),
            events: self.events.subscribe(),
        }
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn photo_count(&self) -> usize {
        self.state.borrow().photos.len()
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        let changed = self.state.send_if_modified(|state| {
            let changed = state.fetch.is_loading() != loading;
            state.fetch.set_loading(loading);
            changed
        });
        if changed {
            self.emit(FeedEvent::LoadingChanged(loading));
        }
    }

    /// Appends `photo` unless its id is already known; returns whether it was added
    pub(crate) fn append(&self, photo: Photo) -> bool {
        let mut appended = None;
        self.state.send_if_modified(|state| {
            if state.photos.contains(&photo.id) {
                return false;
            }
            appended = Some(state.photos.len());
            state.photos.add(photo.clone())
        });

        match appended {
            Some(index) => {
                self.emit(FeedEvent::PhotoAppended { index, photo });
                true
            }
            None => {
                debug!("Skipping duplicate photo {}", photo.id);
                false
            }
        }
    }

    /// Moves the page cursor past `page` once its photos have been applied
    pub(crate) fn complete_page(&self, page: usize, added: usize) {
        let mut total = 0;
        self.state.send_modify(|state| {
            state.fetch.advance();
            total = state.photos.len();
        });
        self.emit(FeedEvent::PageApplied { page, added, total });
    }

    fn emit(&self, event: FeedEvent) {
        // No subscribers is fine; the snapshot still carries the change.
        let _ = self.events.send(event);
    }
}

impl Default for FeedPublisher {
    fn default() -> Self {
        Self::new()
    }
}
