//! Core pipeline for serving a Notion database as an iCalendar feed.
//!
//! - `notion` queries the database page by page and maps records to events
//! - `ics` turns events into a calendar document
//! - `cache` fronts both with a single time-expiring entry

pub mod cache;
pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod notion;

pub use cache::FeedCache;
pub use config::{Config, PropertyNames};
pub use error::{NotionIcalError, NotionIcalResult};
pub use event::{CalendarEvent, EventTime};
