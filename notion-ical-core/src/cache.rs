//! Time-expiring, single-slot cache in front of the feed pipeline.
//!
//! At most one refresh runs at a time: the slot is held for the whole
//! fetch-and-build cycle, so callers arriving during a refresh wait for it
//! and then read the fresh entry instead of hitting Notion themselves.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::NotionIcalResult;
use crate::ics::{build_calendar, serialize_calendar};
use crate::notion::EventFetcher;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    timestamp: Instant,
}

pub struct FeedCache {
    fetcher: EventFetcher,
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl FeedCache {
    pub fn new(fetcher: EventFetcher, ttl: Duration) -> Self {
        FeedCache {
            fetcher,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the ICS feed, refreshing it first if missing or stale.
    ///
    /// A failed refresh leaves any previous entry in place.
    pub async fn get_feed(&self) -> NotionIcalResult<String> {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.timestamp.elapsed() < self.ttl {
                tracing::debug!("Serving cached feed");
                return Ok(entry.data.clone());
            }
        }

        let started = Instant::now();
        let events = self.fetcher.fetch_all().await?;
        let data = serialize_calendar(&build_calendar(&events));

        tracing::info!(
            events = events.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Refreshed calendar feed"
        );

        *slot = Some(CacheEntry {
            data: data.clone(),
            timestamp: started,
        });

        Ok(data)
    }
}
