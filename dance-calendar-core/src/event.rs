//! Dance event types.
//!
//! Events are read once from the static event source and never mutated
//! afterwards. Start and end keep the UTC offset they were written with (or the
//! one the calendar time zone assigned to them), so the calendar day an event
//! lands on is the day its organizer wrote down.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{CalendarError, CalendarResult};

/// Time zone used for naive timestamps when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Copenhagen;

/// The fixed set of dance styles the calendar knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DanceStyle {
    Salsa,
    Bachata,
    Kizomba,
}

impl DanceStyle {
    pub const ALL: [DanceStyle; 3] = [DanceStyle::Salsa, DanceStyle::Bachata, DanceStyle::Kizomba];

    pub fn as_str(&self) -> &'static str {
        match self {
            DanceStyle::Salsa => "salsa",
            DanceStyle::Bachata => "bachata",
            DanceStyle::Kizomba => "kizomba",
        }
    }

    /// Capitalized name for display ("Salsa").
    pub fn label(&self) -> &'static str {
        match self {
            DanceStyle::Salsa => "Salsa",
            DanceStyle::Bachata => "Bachata",
            DanceStyle::Kizomba => "Kizomba",
        }
    }
}

impl fmt::Display for DanceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DanceStyle {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "salsa" => Ok(DanceStyle::Salsa),
            "bachata" => Ok(DanceStyle::Bachata),
            "kizomba" => Ok(DanceStyle::Kizomba),
            other => Err(CalendarError::UnknownStyle(other.to_string())),
        }
    }
}

/// A single dance event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub style: DanceStyle,
    pub city: String,
    pub venue: String,
    pub address: Option<String>,
    pub start: DateTime<FixedOffset>,
    /// Same as `start` when the source omits it
    pub end: DateTime<FixedOffset>,
    /// Display string, e.g. "80 DKK"
    pub price: Option<String>,
    pub url: Option<String>,
    pub organizer: Option<String>,
    pub notes: Option<String>,
}

impl Event {
    /// Calendar day the event starts on, in its own offset.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Local start as `YYYY-MM-DDTHH:MM:SS`, the form date filters match against.
    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Start time of day, e.g. "20:30".
    pub fn time_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.time_label())
    }
}

/// Parse a timestamp from the event source.
///
/// Accepts RFC 3339, naive date-times (with `T` or a space, with or without
/// seconds) and bare dates. Naive values are interpreted in `tz`.
pub fn parse_timestamp(s: &str, tz: Tz) -> CalendarResult<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CalendarError::InvalidTimestamp(s.to_string()))?;

    // Wall-clock times skipped by a DST jump have no mapping in `tz`
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| CalendarError::InvalidTimestamp(s.to_string()))
}

/// Parse an IANA time zone name such as "Europe/Copenhagen".
pub fn parse_timezone(name: &str) -> CalendarResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CalendarError::UnknownTimeZone(name.to_string()))
}
