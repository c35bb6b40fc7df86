//! Application state and the actions that change it.
//!
//! All mutation goes through [`AppState::update`]. Renderers take the state by
//! reference and derive what they show from it, so a front end runs a plain
//! loop: input -> `Action` -> `update` -> sync query -> render.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::event::{DanceStyle, Event};
use crate::filter::FilterState;
use crate::grid::{MonthGrid, YearGrid};
use crate::url_state;
use crate::view::{ViewMode, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `None` clears the filter
    SetDate(Option<String>),
    SetLocation(Option<String>),
    SetSearch(Option<String>),
    ToggleStyle(DanceStyle),
    SetStyles(Vec<DanceStyle>),
    SetView(ViewMode),
    Next,
    Previous,
    Today,
    ClearFilters,
}

/// What the current view mode displays.
#[derive(Debug, Clone)]
pub enum CalendarView<'a> {
    Month(MonthGrid<'a>),
    Year(YearGrid<'a>),
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Sorted by start, never mutated after loading
    events: Vec<Event>,
    pub filters: FilterState,
    pub view: ViewState,
    pub tz: Tz,
}

impl AppState {
    pub fn new(events: Vec<Event>, tz: Tz, now: DateTime<Utc>) -> Self {
        AppState {
            events,
            filters: FilterState::default(),
            view: ViewState::new(now),
            tz,
        }
    }

    /// State hydrated from a query string.
    pub fn from_query(events: Vec<Event>, tz: Tz, query: &str, now: DateTime<Utc>) -> Self {
        let (filters, view) = url_state::from_query(query, now);
        AppState {
            events,
            filters,
            view,
            tz,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn update(&mut self, action: Action, now: DateTime<Utc>) {
        debug!(?action, "Applying action");

        match action {
            Action::SetDate(date) => self.filters.set_date(date.as_deref()),
            Action::SetLocation(location) => self.filters.set_location(location.as_deref()),
            Action::SetSearch(search) => self.filters.set_search(search.as_deref()),
            Action::ToggleStyle(style) => self.filters.toggle_style(style),
            Action::SetStyles(styles) => self.filters.styles = styles.into_iter().collect(),
            Action::SetView(mode) => self.view.mode = mode,
            Action::Next => self.view.next(self.tz),
            Action::Previous => self.view.previous(self.tz),
            Action::Today => self.view.today(now),
            Action::ClearFilters => self.filters = FilterState::default(),
        }
    }

    pub fn visible_events(&self) -> Vec<&Event> {
        self.filters.apply(&self.events)
    }

    /// Shareable query string for the current state.
    pub fn query(&self) -> String {
        url_state::to_query(&self.filters, &self.view)
    }

    pub fn find_event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Current calendar day in the calendar time zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    /// Grid(s) for the current view, filled with the visible events.
    pub fn calendar(&self, today: NaiveDate) -> CalendarView<'_> {
        let visible = self.visible_events();
        let focus = self.view.focus_date(self.tz);

        match self.view.mode {
            ViewMode::Month => CalendarView::Month(MonthGrid::containing(focus, &visible, today)),
            ViewMode::Year => CalendarView::Year(YearGrid::containing(focus, &visible, today)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DEFAULT_TIMEZONE;
    use crate::testing::event;
    use chrono::Datelike;

    fn now() -> DateTime<Utc> {
        "2025-03-18T10:00:00Z".parse().unwrap()
    }

    fn state() -> AppState {
        AppState::new(
            vec![
                event("a", DanceStyle::Salsa, "Aarhus", "2025-03-20T20:00"),
                event("b", DanceStyle::Bachata, "Aarhus", "2025-03-21T20:00"),
                event("c", DanceStyle::Salsa, "Odense", "2025-04-02T19:00"),
            ],
            DEFAULT_TIMEZONE,
            now(),
        )
    }

    #[test]
    fn actions_update_filters() {
        let mut app = state();
        app.update(Action::SetLocation(Some("aarhus".into())), now());
        app.update(Action::ToggleStyle(DanceStyle::Bachata), now());

        let ids: Vec<_> = app.visible_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);

        app.update(Action::ClearFilters, now());
        assert_eq!(app.visible_events().len(), 3);
    }

    #[test]
    fn visible_events_are_a_subset() {
        let mut app = state();
        app.update(Action::SetSearch(Some("salsa".into())), now());
        for visible in app.visible_events() {
            assert!(app.events().contains(visible));
        }
    }

    #[test]
    fn navigation_changes_displayed_month() {
        let mut app = state();
        app.update(Action::Next, now());
        match app.calendar(app.today(now())) {
            CalendarView::Month(grid) => {
                assert_eq!(grid.month(), 4);
                assert_eq!(grid.event_count(), 1);
            }
            CalendarView::Year(_) => panic!("expected month view"),
        }

        app.update(Action::Today, now());
        assert_eq!(app.view.focus_date(app.tz).month(), 3);
    }

    #[test]
    fn year_view_shows_twelve_months() {
        let mut app = state();
        app.update(Action::SetView(ViewMode::Year), now());
        match app.calendar(app.today(now())) {
            CalendarView::Year(year) => {
                assert_eq!(year.year, 2025);
                assert_eq!(year.months.len(), 12);
                let total: usize = year.months.iter().map(|m| m.event_count()).sum();
                assert_eq!(total, 3);
            }
            CalendarView::Month(_) => panic!("expected year view"),
        }
    }

    #[test]
    fn query_round_trips_through_state() {
        let mut app = state();
        app.update(Action::SetStyles(vec![DanceStyle::Kizomba]), now());
        app.update(Action::SetView(ViewMode::Year), now());
        let query = app.query();

        let restored = AppState::from_query(app.events().to_vec(), DEFAULT_TIMEZONE, &query, now());
        assert_eq!(restored.filters, app.filters);
        assert_eq!(restored.view, app.view);
    }

    #[test]
    fn find_event_by_id() {
        let app = state();
        assert_eq!(app.find_event("b").map(|e| e.city.as_str()), Some("Aarhus"));
        assert!(app.find_event("zzz").is_none());
    }
}
