//! Shared fixtures for unit tests.

use crate::event::{parse_timestamp, DanceStyle, Event, DEFAULT_TIMEZONE};

pub(crate) fn event(id: &str, style: DanceStyle, city: &str, start: &str) -> Event {
    let start = parse_timestamp(start, DEFAULT_TIMEZONE).unwrap();
    Event {
        id: id.to_string(),
        title: format!("{} social", style.label()),
        style,
        city: city.to_string(),
        venue: format!("{} Dance Hall", city),
        address: None,
        start,
        end: start + chrono::Duration::hours(4),
        price: None,
        url: None,
        organizer: None,
        notes: None,
    }
}
