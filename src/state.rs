use std::sync::Arc;

use notion_ical_core::FeedCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    feed: Arc<FeedCache>,
}

impl AppState {
    pub fn new(feed: FeedCache) -> Self {
        AppState {
            feed: Arc::new(feed),
        }
    }

    pub fn feed(&self) -> &FeedCache {
        &self.feed
    }
}
