//! Presentation model for a single event.

use crate::event::Event;

pub const MISSING_PLACEHOLDER: &str = "N/A";
pub const FREE_PLACEHOLDER: &str = "Free";

const DATETIME_FORMAT: &str = "%a %-d %b %Y, %H:%M";

/// Every field of an event, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub title: String,
    pub style: String,
    /// "<city>, <venue>"
    pub location: String,
    pub address: String,
    pub start: String,
    pub end: String,
    pub price: String,
    pub organizer: String,
    pub notes: Option<String>,
    pub url: Option<String>,
}

impl EventDetail {
    pub fn from_event(event: &Event) -> Self {
        EventDetail {
            title: event.title.clone(),
            style: event.style.label().to_string(),
            location: format!("{}, {}", event.city, event.venue),
            address: or_placeholder(&event.address, MISSING_PLACEHOLDER),
            start: event.start.format(DATETIME_FORMAT).to_string(),
            end: event.end.format(DATETIME_FORMAT).to_string(),
            price: or_placeholder(&event.price, FREE_PLACEHOLDER),
            organizer: or_placeholder(&event.organizer, MISSING_PLACEHOLDER),
            notes: event.notes.clone(),
            url: event.url.clone(),
        }
    }

    /// Labelled text rows in display order; notes only when present. The
    /// url is left to the caller so it can be rendered as a link.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut rows = vec![
            ("Style", self.style.as_str()),
            ("Location", self.location.as_str()),
            ("Address", self.address.as_str()),
            ("Start", self.start.as_str()),
            ("End", self.end.as_str()),
            ("Price", self.price.as_str()),
            ("Organizer", self.organizer.as_str()),
        ];
        if let Some(notes) = &self.notes {
            rows.push(("Notes", notes.as_str()));
        }
        rows
    }

    /// `fields()` followed by the url, when present.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        let mut rows = self.fields();
        if let Some(url) = &self.url {
            rows.push(("More info", url.as_str()));
        }
        rows
    }
}

fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    value.clone().unwrap_or_else(|| placeholder.to_string())
}
