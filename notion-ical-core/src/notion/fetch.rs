//! Fetches every matching record of the database and maps them to events.

use std::sync::Arc;

use crate::config::PropertyNames;
use crate::error::{NotionIcalError, NotionIcalResult};
use crate::event::CalendarEvent;
use crate::notion::client::DatabaseSource;
use crate::notion::mapper::map_record;

pub struct EventFetcher {
    source: Arc<dyn DatabaseSource>,
    names: PropertyNames,
    max_pages: usize,
}

impl EventFetcher {
    pub fn new(source: Arc<dyn DatabaseSource>, names: PropertyNames, max_pages: usize) -> Self {
        EventFetcher {
            source,
            names,
            max_pages,
        }
    }

    /// Run one fetch cycle.
    ///
    /// Events come back in upstream order; nothing is re-sorted or
    /// deduplicated. Any upstream error aborts the cycle.
    pub async fn fetch_all(&self) -> NotionIcalResult<Vec<CalendarEvent>> {
        let mut events = Vec::new();
        let mut skipped = 0usize;
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if pages >= self.max_pages {
                return Err(NotionIcalError::PageLimit(self.max_pages));
            }

            let page = self
                .source
                .query_page(&self.names.date, cursor.as_deref())
                .await?;
            pages += 1;

            tracing::debug!(
                page = pages,
                records = page.records.len(),
                has_more = page.has_more,
                "Fetched Notion page"
            );

            for record in &page.records {
                match map_record(record, &self.names) {
                    Some(event) => events.push(event),
                    None => {
                        skipped += 1;
                        tracing::trace!(id = %record.id, "Record has no usable date, skipping");
                    }
                }
            }

            cursor = match (page.has_more, page.next_cursor) {
                (true, Some(next)) => Some(next),
                _ => break,
            };
        }

        tracing::info!(events = events.len(), skipped, pages, "Fetched events from Notion");

        Ok(events)
    }
}
