//! ICS feed generation.

use crate::event::{CalendarEvent, EventTime};
use chrono::NaiveDate;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

pub const CALENDAR_NAME: &str = "Notion Calendar";
pub const PRODID: &str = "-//notion-ical-calendar//notion-ical-calendar//EN";

/// Build a calendar document holding one VEVENT per event, in order
pub fn build_calendar(events: &[CalendarEvent]) -> Calendar {
    let mut cal = Calendar::new();

    // NAME (RFC 7986) plus X-WR-CALNAME for clients that predate it
    cal.append_property(Property::new("NAME", CALENDAR_NAME));
    cal.append_property(Property::new("X-WR-CALNAME", CALENDAR_NAME));

    for event in events {
        cal.push(build_event(event));
    }

    cal.done()
}

/// Serialize a calendar document to ICS text
pub fn serialize_calendar(calendar: &Calendar) -> String {
    normalize_ics(&calendar.to_string())
}

fn build_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.id);
    ics_event.summary(&event.title);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start, event.all_day);

    if let Some(end) = event_end(event) {
        add_datetime_property(&mut ics_event, "DTEND", &end, event.all_day);
    }

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    ics_event.add_property("URL", &event.url);

    ics_event.done()
}

/// DTEND for an event, if one should be emitted.
///
/// All-day ends are exclusive, so they land on the day after the last day
/// of the event. Timed events without an end stay open-ended.
fn event_end(event: &CalendarEvent) -> Option<EventTime> {
    if event.all_day {
        let last_day = event.end.as_ref().unwrap_or(&event.start);
        Some(EventTime::Date(last_day.next_day()))
    } else {
        event.end
    }
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn normalize_ics(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a date or datetime property.
///
/// Values on all-day events are always written as dates; timed events get
/// UTC datetimes, with date-only values pinned to midnight UTC.
fn add_datetime_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    time: &EventTime,
    all_day: bool,
) {
    if all_day {
        add_date_property(ics_event, name, time.date());
        return;
    }

    match time {
        EventTime::DateTime(dt) => {
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
        EventTime::Date(d) => {
            ics_event.add_property(name, d.format("%Y%m%dT000000Z").to_string());
        }
    }
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
