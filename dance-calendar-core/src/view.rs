//! View mode and cursor navigation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Year => "year",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(ViewMode::Month),
            "year" => Ok(ViewMode::Year),
            other => Err(format!("Unknown view '{}'. Expected 'month' or 'year'", other)),
        }
    }
}

/// Which month or year is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub cursor: DateTime<Utc>,
}

impl ViewState {
    pub fn new(now: DateTime<Utc>) -> Self {
        ViewState {
            mode: ViewMode::default(),
            cursor: now,
        }
    }

    /// The cursor as a calendar day in `tz`.
    pub fn focus_date(&self, tz: Tz) -> NaiveDate {
        self.cursor.with_timezone(&tz).date_naive()
    }

    /// Move forward one month (month view) or one year (year view).
    pub fn next(&mut self, tz: Tz) {
        self.shift(tz, true);
    }

    /// Move back one month (month view) or one year (year view).
    pub fn previous(&mut self, tz: Tz) {
        self.shift(tz, false);
    }

    pub fn today(&mut self, now: DateTime<Utc>) {
        self.cursor = now;
    }

    /// Shift in local time so the displayed month never skips or repeats,
    /// clamping the day to the target month's length.
    fn shift(&mut self, tz: Tz, forward: bool) {
        let months = Months::new(match self.mode {
            ViewMode::Month => 1,
            ViewMode::Year => 12,
        });
        let local = self.cursor.with_timezone(&tz).naive_local();

        let shifted = if forward {
            local.checked_add_months(months)
        } else {
            local.checked_sub_months(months)
        };

        if let Some(shifted) = shifted.and_then(|naive| resolve_local(naive, tz)) {
            self.cursor = shifted;
        }
    }
}

/// Local wall-clock time to UTC, falling back to noon for times a DST jump
/// skipped.
fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let noon = naive.date().and_time(NaiveTime::from_hms_opt(12, 0, 0)?);
            tz.from_local_datetime(&noon).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}
