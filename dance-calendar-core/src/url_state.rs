//! Filter and view state as URL query parameters.
//!
//! Fields holding their default value are left out of the query, so a field
//! explicitly set to its default and a field never set look the same after a
//! round trip. The cursor has no stable default (it is "now") and is always
//! written.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use tracing::debug;
use url::form_urlencoded;

use crate::event::DanceStyle;
use crate::filter::{normalize, FilterState};
use crate::view::{ViewMode, ViewState};

pub const PARAM_DATE: &str = "date";
pub const PARAM_LOCATION: &str = "location";
pub const PARAM_STYLES: &str = "styles";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_VIEW: &str = "view";
pub const PARAM_CURSOR: &str = "cursor";

/// Encode state as a query string (without the leading `?`).
pub fn to_query(filters: &FilterState, view: &ViewState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(date) = &filters.date {
        query.append_pair(PARAM_DATE, date);
    }
    if let Some(location) = &filters.location {
        query.append_pair(PARAM_LOCATION, location);
    }
    if !filters.has_all_styles() {
        let styles: Vec<&str> = filters.styles.iter().map(DanceStyle::as_str).collect();
        query.append_pair(PARAM_STYLES, &styles.join(","));
    }
    if let Some(search) = &filters.search {
        query.append_pair(PARAM_SEARCH, search);
    }
    if view.mode != ViewMode::default() {
        query.append_pair(PARAM_VIEW, view.mode.as_str());
    }
    query.append_pair(
        PARAM_CURSOR,
        &view.cursor.to_rfc3339_opts(SecondsFormat::Millis, true),
    );

    query.finish()
}

/// Decode a query string, starting from defaults and letting each present
/// parameter override its field.
///
/// Unknown styles, unknown views and unreadable cursors are dropped. Repeated
/// `styles` parameters are merged.
pub fn from_query(query: &str, now: DateTime<Utc>) -> (FilterState, ViewState) {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut filters = FilterState::default();
    let mut view = ViewState::new(now);
    let mut styles: Option<BTreeSet<DanceStyle>> = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            PARAM_DATE => filters.date = normalize(Some(&*value)),
            PARAM_LOCATION => filters.location = normalize(Some(&*value)),
            PARAM_SEARCH => filters.search = normalize(Some(&*value)),
            PARAM_STYLES => {
                let selected = styles.get_or_insert_with(BTreeSet::new);
                for name in value.split(',') {
                    match name.trim().parse::<DanceStyle>() {
                        Ok(style) => {
                            selected.insert(style);
                        }
                        Err(_) => debug!("Ignoring unknown style '{}' in query", name),
                    }
                }
            }
            PARAM_VIEW => match value.parse::<ViewMode>() {
                Ok(mode) => view.mode = mode,
                Err(e) => debug!("Ignoring view parameter: {}", e),
            },
            PARAM_CURSOR => match parse_cursor(&value) {
                Some(cursor) => view.cursor = cursor,
                None => debug!("Ignoring unreadable cursor '{}'", value),
            },
            other => debug!("Ignoring unknown query parameter '{}'", other),
        }
    }

    if let Some(styles) = styles {
        filters.styles = styles;
    }

    (filters, view)
}

fn parse_cursor(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-03-18T10:15:00Z".parse().unwrap()
    }

    #[test]
    fn defaults_only_write_cursor() {
        let query = to_query(&FilterState::default(), &ViewState::new(now()));
        assert_eq!(query, "cursor=2025-03-18T10%3A15%3A00.000Z");
    }

    #[test]
    fn non_default_fields_are_written() {
        let mut filters = FilterState::default();
        filters.set_date(Some("2025-03"));
        filters.set_location(Some("Aarhus C"));
        filters.styles = [DanceStyle::Kizomba, DanceStyle::Salsa].into_iter().collect();
        filters.set_search(Some("latin night"));
        let mut view = ViewState::new(now());
        view.mode = ViewMode::Year;

        let query = to_query(&filters, &view);
        assert_eq!(
            query,
            "date=2025-03&location=Aarhus+C&styles=salsa%2Ckizomba&search=latin+night\
             &view=year&cursor=2025-03-18T10%3A15%3A00.000Z"
        );
    }

    #[test]
    fn round_trip_reproduces_state() {
        let mut filters = FilterState::default();
        filters.set_location(Some("Odense"));
        filters.styles = [DanceStyle::Bachata].into_iter().collect();
        filters.set_search(Some("Café; 50% off, & more"));
        let mut view = ViewState::new(now());
        view.mode = ViewMode::Year;

        let query = to_query(&filters, &view);
        let later: DateTime<Utc> = "2030-01-01T00:00:00Z".parse().unwrap();
        let (decoded_filters, decoded_view) = from_query(&query, later);

        assert_eq!(decoded_filters, filters);
        assert_eq!(decoded_view, view);
    }

    #[test]
    fn empty_style_selection_survives_round_trip() {
        let mut filters = FilterState::default();
        filters.styles.clear();
        let view = ViewState::new(now());

        let (decoded, _) = from_query(&to_query(&filters, &view), now());
        assert!(decoded.styles.is_empty());
    }

    #[test]
    fn explicit_default_is_indistinguishable_from_absent() {
        let (explicit, _) = from_query("styles=salsa,bachata,kizomba&view=month", now());
        let (absent, _) = from_query("", now());
        assert_eq!(explicit, absent);
    }

    #[test]
    fn unknown_styles_are_discarded() {
        let (filters, _) = from_query("styles=salsa,tango,,Kizomba", now());
        assert_eq!(filters.styles, BTreeSet::from([DanceStyle::Salsa]));
    }

    #[test]
    fn repeated_styles_are_merged() {
        let (filters, _) = from_query("?styles=salsa&styles=kizomba", now());
        assert_eq!(
            filters.styles,
            BTreeSet::from([DanceStyle::Salsa, DanceStyle::Kizomba])
        );
    }

    #[test]
    fn bad_view_and_cursor_keep_defaults() {
        let (_, view) = from_query("view=week&cursor=yesterday", now());
        assert_eq!(view, ViewState::new(now()));
    }

    #[test]
    fn cursor_accepts_plain_date() {
        let (_, view) = from_query("cursor=2024-02-10", now());
        assert_eq!(view.cursor, "2024-02-10T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }
}
