//! Record → CalendarEvent mapping.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::PropertyNames;
use crate::event::{CalendarEvent, EventTime, UNTITLED};
use crate::notion::record::{Property, Record, plain_text};

/// Map one record to a calendar event.
///
/// Returns `None` only when the configured date property is missing, not a
/// date, or has no usable start value. Every other field degrades to a
/// fallback.
pub fn map_record(record: &Record, names: &PropertyNames) -> Option<CalendarEvent> {
    let (start, end, all_day) = extract_date(record.property(&names.date))?;

    let description = names
        .description
        .as_deref()
        .and_then(|name| extract_rich_text(record.property(name)));

    let location = names
        .location
        .as_deref()
        .and_then(|name| extract_rich_text(record.property(name)));

    Some(CalendarEvent {
        id: record.id.clone(),
        title: extract_title(record.property(&names.title)),
        start,
        end,
        all_day,
        description,
        location,
        url: record.url.clone(),
    })
}

fn extract_title(property: Option<&Property>) -> String {
    match property {
        Some(Property::Title(runs)) => {
            let text = plain_text(runs);
            if text.is_empty() {
                UNTITLED.to_string()
            } else {
                text
            }
        }
        _ => UNTITLED.to_string(),
    }
}

fn extract_date(property: Option<&Property>) -> Option<(EventTime, Option<EventTime>, bool)> {
    let Some(Property::Date(Some(date))) = property else {
        return None;
    };

    let raw_start = date.start.as_deref().filter(|s| !s.is_empty())?;
    let tz = date
        .time_zone
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok());
    let start = parse_event_time(raw_start, tz)?;

    // Only the start value decides whether the event is all-day
    let all_day = !raw_start.contains('T');

    let end = date
        .end
        .as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|raw| parse_event_time(raw, tz));

    Some((start, end, all_day))
}

fn extract_rich_text(property: Option<&Property>) -> Option<String> {
    match property {
        Some(Property::RichText(runs)) => Some(plain_text(runs)).filter(|s| !s.is_empty()),
        _ => None,
    }
}

/// Parse a Notion date string: `YYYY-MM-DD` or a datetime.
///
/// Datetimes without an offset are local to `tz` when the property carries
/// a time zone, otherwise UTC.
fn parse_event_time(raw: &str, tz: Option<Tz>) -> Option<EventTime> {
    if !raw.contains('T') {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(EventTime::Date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(EventTime::DateTime(dt.with_timezone(&Utc)));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()?;

    let utc = match tz {
        Some(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc()),
        None => naive.and_utc(),
    };

    Some(EventTime::DateTime(utc))
}
