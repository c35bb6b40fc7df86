//! Terminal rendering for calendar types.
//!
//! Extension traits that add colored output to dance-calendar-core types
//! using owo_colors.

use chrono::Datelike;
use dance_calendar_core::detail::EventDetail;
use dance_calendar_core::grid::{DayCell, MonthGrid, YearGrid, WEEKDAY_LABELS};
use dance_calendar_core::{CalendarView, DanceStyle, Event};
use owo_colors::OwoColorize;

/// Width of one day column, including the separating space
const CELL_WIDTH: usize = 6;

/// At most this many event markers per day before showing a count
const MAX_MARKERS: usize = 3;

pub trait Render {
    fn render(&self) -> String;
}

fn style_marker(style: DanceStyle) -> String {
    match style {
        DanceStyle::Salsa => "•".red().to_string(),
        DanceStyle::Bachata => "•".magenta().to_string(),
        DanceStyle::Kizomba => "•".cyan().to_string(),
    }
}

impl Render for DanceStyle {
    fn render(&self) -> String {
        match self {
            DanceStyle::Salsa => self.label().red().to_string(),
            DanceStyle::Bachata => self.label().magenta().to_string(),
            DanceStyle::Kizomba => self.label().cyan().to_string(),
        }
    }
}

/// One fixed-width day cell: day number, then up to three markers.
fn render_cell(cell: &DayCell) -> String {
    let number = format!("{:>2}", cell.date.day());
    let number = if cell.is_today {
        number.reversed().bold().to_string()
    } else if !cell.in_month {
        number.dimmed().to_string()
    } else {
        number
    };

    let count = cell.events.len();
    let (markers, marker_width) = if count > MAX_MARKERS {
        let label = format!("+{}", count);
        let width = label.len();
        (label.bold().to_string(), width)
    } else {
        let markers: String = cell.events.iter().map(|e| style_marker(e.style)).collect();
        (markers, count)
    };

    // Pad by visible width; the escape codes don't take up columns
    let padding = CELL_WIDTH.saturating_sub(2 + marker_width);
    format!("{}{}{}", number, markers, " ".repeat(padding))
}

impl Render for MonthGrid<'_> {
    fn render(&self) -> String {
        let mut lines = vec![self.long_title().bold().to_string()];

        let header: String = WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:<width$}", label, width = CELL_WIDTH))
            .collect();
        lines.push(header.trim_end().dimmed().to_string());

        for week in self.weeks() {
            let row: String = week.iter().map(render_cell).collect();
            lines.push(row.trim_end().to_string());
        }

        lines.join("\n")
    }
}

/// A month grid followed by its in-month events.
pub fn render_month_with_events(grid: &MonthGrid) -> String {
    let mut lines = vec![grid.render(), String::new()];

    let events: Vec<&Event> = grid
        .cells
        .iter()
        .filter(|cell| cell.in_month)
        .flat_map(|cell| cell.events.iter().copied())
        .collect();

    if events.is_empty() {
        lines.push("No events this month".dimmed().to_string());
    } else {
        lines.extend(events.iter().map(|event| render_event_line(event)));
    }

    lines.join("\n")
}

impl Render for YearGrid<'_> {
    fn render(&self) -> String {
        let total: usize = self.months.iter().map(MonthGrid::event_count).sum();
        let mut sections = vec![format!("{} ({} events)", self.year.bold(), total)];
        sections.extend(self.months.iter().map(|month| month.render()));
        sections.join("\n\n")
    }
}

impl Render for CalendarView<'_> {
    fn render(&self) -> String {
        match self {
            CalendarView::Month(grid) => render_month_with_events(grid),
            CalendarView::Year(year) => year.render(),
        }
    }
}

/// "Thu 20  20:00  Salsa Social  Aarhus, Godsbanen  [salsa-aarhus-1]"
pub fn render_event_line(event: &Event) -> String {
    format!(
        "{}  {}  {} {}  {}",
        event.start.format("%a %e").dimmed(),
        event.time_label(),
        style_marker(event.style),
        event.title,
        format!("{}, {}  [{}]", event.city, event.venue, event.id).dimmed()
    )
}

impl Render for EventDetail {
    fn render(&self) -> String {
        let mut lines = vec![self.title.bold().to_string()];
        for (label, value) in self.rows() {
            let label = format!("{:<10}", format!("{}:", label));
            lines.push(format!("  {} {}", label.dimmed(), value));
        }
        lines.join("\n")
    }
}

/// Events grouped under a heading per day.
pub fn render_event_list(events: &[&Event]) -> String {
    if events.is_empty() {
        return "No events found".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current_date = None;

    for event in events {
        let date = event.start_date();
        if current_date != Some(date) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(date.format("%A %-d %B %Y").bold().to_string());
            current_date = Some(date);
        }
        lines.push(format!(
            "  {} {} {}  {}",
            event.time_label(),
            event.style.render(),
            event.title,
            format!("{}, {}  [{}]", event.city, event.venue, event.id).dimmed()
        ));
    }

    lines.join("\n")
}
