//! ICS feed generation.
//!
//! This module turns calendar events into an RFC 5545 calendar document.

mod generate;

pub use generate::{CALENDAR_NAME, PRODID, build_calendar, serialize_calendar};
