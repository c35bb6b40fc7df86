//! Event filtering.

use std::collections::BTreeSet;

use crate::event::{DanceStyle, Event};

/// User-selected criteria narrowing the displayed events.
///
/// Every field that is unset (or, for `styles`, holds every style) lets all
/// events through. An event is visible when it passes every predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Prefix of the local start timestamp, e.g. "2025-03" or "2025-03-20"
    pub date: Option<String>,
    /// Case-insensitive substring of the city
    pub location: Option<String>,
    pub styles: BTreeSet<DanceStyle>,
    /// Case-insensitive substring of title, venue or organizer
    pub search: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            date: None,
            location: None,
            styles: DanceStyle::ALL.into_iter().collect(),
            search: None,
        }
    }
}

/// Trim user input; blank input clears the field.
pub(crate) fn normalize(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl FilterState {
    pub fn set_date(&mut self, date: Option<&str>) {
        self.date = normalize(date);
    }

    pub fn set_location(&mut self, location: Option<&str>) {
        self.location = normalize(location);
    }

    pub fn set_search(&mut self, search: Option<&str>) {
        self.search = normalize(search);
    }

    pub fn toggle_style(&mut self, style: DanceStyle) {
        if !self.styles.remove(&style) {
            self.styles.insert(style);
        }
    }

    pub fn has_all_styles(&self) -> bool {
        self.styles.len() == DanceStyle::ALL.len()
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    /// Whether `event` passes every active predicate.
    pub fn matches(&self, event: &Event) -> bool {
        self.matches_date(event)
            && self.matches_location(event)
            && self.styles.contains(&event.style)
            && self.matches_search(event)
    }

    fn matches_date(&self, event: &Event) -> bool {
        match &self.date {
            Some(prefix) => event.start_iso().starts_with(prefix.as_str()),
            None => true,
        }
    }

    fn matches_location(&self, event: &Event) -> bool {
        match &self.location {
            Some(location) => event.city.to_lowercase().contains(&location.to_lowercase()),
            None => true,
        }
    }

    fn matches_search(&self, event: &Event) -> bool {
        let Some(search) = &self.search else {
            return true;
        };
        let needle = search.to_lowercase();

        [
            Some(event.title.as_str()),
            Some(event.venue.as_str()),
            event.organizer.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Visible subset of `events`, in their original order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }
}
