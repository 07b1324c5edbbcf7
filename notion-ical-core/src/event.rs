//! Calendar event types produced by the record mapper.
//!
//! Events are rebuilt on every fetch cycle and only live until they are
//! serialized into the feed.

use chrono::{DateTime, Days, NaiveDate, Utc};

/// Title used when a record has no usable title.
pub const UNTITLED: &str = "Untitled";

/// A calendar event mapped from one database record
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// Page id, used as the UID
    pub id: String,
    pub title: String,
    pub start: EventTime,
    pub end: Option<EventTime>,
    /// True when the start value had no time of day
    pub all_day: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Link back to the page
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    /// Calendar date of this time (the UTC date for datetimes).
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::DateTime(dt) => dt.date_naive(),
            EventTime::Date(d) => *d,
        }
    }

    /// The calendar date after this one, as used for exclusive all-day ends.
    pub fn next_day(&self) -> NaiveDate {
        let date = self.date();
        date.checked_add_days(Days::new(1)).unwrap_or(date)
    }
}
