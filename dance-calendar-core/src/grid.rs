//! Month and year calendar grids.
//!
//! A month is always laid out as 6 weeks of 7 days starting on Monday. Days
//! before the 1st and after the last day come from the neighbouring months and
//! are marked as outside the month, but still carry their events.

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::event::Event;

pub const WEEKS_PER_GRID: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;
pub const CELLS_PER_GRID: usize = WEEKS_PER_GRID * DAYS_PER_WEEK;

pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One day in a month grid.
#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// False for padding days from the previous or next month
    pub in_month: bool,
    pub is_today: bool,
    /// Events starting on this day, in the order they were supplied
    pub events: Vec<&'a Event>,
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    /// First day of the month
    pub first: NaiveDate,
    pub cells: Vec<DayCell<'a>>,
}

type DayIndex<'a> = HashMap<NaiveDate, Vec<&'a Event>>;

fn index_by_day<'a>(events: &[&'a Event]) -> DayIndex<'a> {
    let mut index: DayIndex<'a> = HashMap::new();
    for event in events {
        index.entry(event.start_date()).or_default().push(event);
    }
    index
}

/// Number of days in the month starting at `first`.
fn month_length(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        // Only reachable for the last month chrono can represent (December)
        .unwrap_or(31)
}

/// Number of days in `month` (1-12) of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(month_length)
}

impl<'a> MonthGrid<'a> {
    /// Grid for the month containing `date`.
    pub fn containing(date: NaiveDate, events: &[&'a Event], today: NaiveDate) -> Self {
        Self::with_index(date, &index_by_day(events), today)
    }

    /// Grid for `month` (1-12) of `year`, or `None` for an invalid month.
    pub fn build(year: i32, month: u32, events: &[&'a Event], today: NaiveDate) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self::containing(first, events, today))
    }

    fn with_index(date: NaiveDate, index: &DayIndex<'a>, today: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let leading = u64::from(first.weekday().num_days_from_monday());
        let grid_start = first.checked_sub_days(Days::new(leading)).unwrap_or(first);

        let cells = grid_start
            .iter_days()
            .take(CELLS_PER_GRID)
            .map(|day| DayCell {
                date: day,
                in_month: day.year() == first.year() && day.month() == first.month(),
                is_today: day == today,
                events: index.get(&day).cloned().unwrap_or_default(),
            })
            .collect();

        MonthGrid { first, cells }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        month_length(self.first)
    }

    /// Header text, e.g. "2025 - 3".
    pub fn title(&self) -> String {
        format!("{} - {}", self.year(), self.month())
    }

    /// Long header text, e.g. "March 2025".
    pub fn long_title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// The grid as rows of seven days, Monday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<'a>]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn event_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.in_month)
            .map(|cell| cell.events.len())
            .sum()
    }
}

/// Twelve month grids for one year.
#[derive(Debug, Clone)]
pub struct YearGrid<'a> {
    pub year: i32,
    pub months: Vec<MonthGrid<'a>>,
}

impl<'a> YearGrid<'a> {
    /// Grids for every month of the year containing `date`.
    pub fn containing(date: NaiveDate, events: &[&'a Event], today: NaiveDate) -> Self {
        let index = index_by_day(events);
        let january = date.with_day(1).and_then(|d| d.with_month(1)).unwrap_or(date);

        let months = (0..12)
            .filter_map(|offset| january.checked_add_months(Months::new(offset)))
            .map(|first| MonthGrid::with_index(first, &index, today))
            .collect();

        YearGrid {
            year: january.year(),
            months,
        }
    }

    pub fn build(year: i32, events: &[&'a Event], today: NaiveDate) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1).map(|first| Self::containing(first, events, today))
    }
}
