//! Event loading from the static event source.
//!
//! The source is a JSON array of event objects, read either from disk or over
//! HTTP. Loading never blocks the calendar: any failure is logged and the
//! calendar starts empty.

use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::error::{CalendarError, CalendarResult};
use crate::event::{parse_timestamp, DanceStyle, Event};

/// An event record as it appears in the source document.
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub title: String,
    pub style: String,
    pub city: String,
    pub venue: String,
    #[serde(default)]
    pub address: Option<String>,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RawEvent {
    pub fn to_model(&self, tz: Tz) -> CalendarResult<Event> {
        let style: DanceStyle = self.style.parse()?;
        let start = parse_timestamp(&self.start, tz)?;
        let end = match non_blank(&self.end) {
            Some(end) => parse_timestamp(&end, tz)?,
            None => start,
        };

        Ok(Event {
            id: self.id.clone(),
            title: self.title.clone(),
            style,
            city: self.city.clone(),
            venue: self.venue.clone(),
            address: non_blank(&self.address),
            start,
            end,
            price: non_blank(&self.price),
            url: non_blank(&self.url),
            organizer: non_blank(&self.organizer),
            notes: non_blank(&self.notes),
        })
    }
}

/// Empty strings in the source mean "not set".
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a source document into events sorted by start time.
///
/// Records that cannot be converted (bad timestamp, unknown style) are skipped
/// with a warning; a document that is not a JSON array of records is an error.
pub fn parse_events(json: &str, tz: Tz) -> CalendarResult<Vec<Event>> {
    let raw_events: Vec<RawEvent> = serde_json::from_str(json)?;

    let mut events: Vec<Event> = raw_events
        .iter()
        .filter_map(|raw| match raw.to_model(tz) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping event '{}': {}", raw.id, e);
                None
            }
        })
        .collect();

    // Stable, so same-time events keep their source order
    events.sort_by_key(|event| event.start);

    Ok(events)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn read_source(source: &str) -> CalendarResult<String> {
    if is_remote(source) {
        debug!("Fetching events from {}", source);
        let body = reqwest::get(source)
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    } else {
        debug!("Reading events from {}", source);
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| CalendarError::Io {
                path: source.to_string(),
                source: e,
            })
    }
}

/// Load events, returning the error on failure.
#[tracing::instrument(skip(tz))]
pub async fn try_load_events(source: &str, tz: Tz) -> CalendarResult<Vec<Event>> {
    let body = read_source(source).await?;
    let events = parse_events(&body, tz)?;
    info!("Loaded {} events", events.len());
    Ok(events)
}

/// Load events, degrading to an empty list on any failure.
pub async fn load_events(source: &str, tz: Tz) -> Vec<Event> {
    match try_load_events(source, tz).await {
        Ok(events) => events,
        Err(e) => {
            error!("Failed to load events from {}: {}", source, e);
            Vec::new()
        }
    }
}
