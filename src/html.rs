//! Static HTML rendering of the calendar.
//!
//! The page mirrors the terminal view: a filter form whose fields use the same
//! query parameters as `link`, month grid(s), and one `<dialog>` per visible
//! event holding its details.

use chrono::{DateTime, Utc};
use dance_calendar_core::detail::EventDetail;
use dance_calendar_core::grid::{DayCell, MonthGrid, WEEKDAY_LABELS};
use dance_calendar_core::url_state::{
    PARAM_CURSOR, PARAM_DATE, PARAM_LOCATION, PARAM_SEARCH, PARAM_STYLES, PARAM_VIEW,
};
use dance_calendar_core::view::ViewMode;
use dance_calendar_core::{Action, AppState, CalendarView, DanceStyle, Event};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 1.5rem; color: #222; }
form.filters { display: flex; flex-wrap: wrap; gap: .75rem; align-items: end; margin-bottom: 1rem; }
nav.pager a { margin-right: 1rem; }
.year-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1rem; }
.month-grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 2px; }
.weekday { font-weight: 600; text-align: center; font-size: .8rem; }
.day { min-height: 4.5rem; border: 1px solid #ddd; padding: 2px; font-size: .8rem; }
.day.outside { background: #f6f6f6; color: #999; }
.day.today { border: 2px solid #1a73e8; }
.day-num { font-weight: 600; }
.event { display: block; width: 100%; text-align: left; border: 0; border-radius: 3px;
         margin-top: 2px; padding: 1px 3px; cursor: pointer; font-size: .75rem; }
.event.salsa { background: #fde2e2; }
.event.bachata { background: #f3e2fd; }
.event.kizomba { background: #e2f5fd; }
dialog .meta dt { font-weight: 600; }
"#;

const JAVASCRIPT: &str = r#"
document.querySelectorAll("[data-dialog]").forEach((button) => {
  button.addEventListener("click", () => {
    document.getElementById(button.dataset.dialog).showModal();
  });
});
"#;

fn dialog_id(event: &Event) -> String {
    format!("event-{}", event.id)
}

/// Query string the page would have after applying `action`.
fn query_after(app: &AppState, action: Action, now: DateTime<Utc>) -> String {
    let mut next = app.clone();
    next.update(action, now);
    format!("?{}", next.query())
}

pub fn render_page(app: &AppState, now: DateTime<Utc>) -> Markup {
    let today = app.today(now);
    let calendar = app.calendar(today);
    let visible = app.visible_events();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Dance Calendar" }
                style { (PreEscaped(CSS)) }
            }
            body {
                header {
                    h1 { "Dance Calendar" }
                    p.count { (visible.len()) " of " (app.events().len()) " events match" }
                }
                (render_filters(app))
                nav.pager {
                    a href=(query_after(app, Action::Previous, now)) { "← Previous" }
                    a href=(query_after(app, Action::Today, now)) { "Today" }
                    a href=(query_after(app, Action::Next, now)) { "Next →" }
                    a href={ "?" (app.query()) } { "Link to this view" }
                }
                main #calendar {
                    @match &calendar {
                        CalendarView::Month(grid) => {
                            (render_month(grid, false))
                        }
                        CalendarView::Year(year) => {
                            div.year-grid {
                                @for grid in &year.months {
                                    (render_month(grid, true))
                                }
                            }
                        }
                    }
                }
                @for event in &visible {
                    (render_dialog(event))
                }
                script { (PreEscaped(JAVASCRIPT)) }
            }
        }
    }
}

fn render_filters(app: &AppState) -> Markup {
    let filters = &app.filters;

    html! {
        form.filters method="get" {
            label {
                "Date "
                input type="text" name=(PARAM_DATE) placeholder="YYYY-MM-DD"
                    value=(filters.date.as_deref().unwrap_or(""));
            }
            label {
                "City "
                input type="text" name=(PARAM_LOCATION) value=(filters.location.as_deref().unwrap_or(""));
            }
            label {
                "Search "
                input type="search" name=(PARAM_SEARCH) value=(filters.search.as_deref().unwrap_or(""));
            }
            fieldset {
                legend { "Styles" }
                // Unchecked boxes are not submitted; this keeps an empty selection empty
                input type="hidden" name=(PARAM_STYLES) value="";
                @for style in DanceStyle::ALL {
                    label {
                        input type="checkbox" name=(PARAM_STYLES) value=(style.as_str())
                            checked[filters.styles.contains(&style)];
                        " " (style.label())
                    }
                }
            }
            label {
                "View "
                select name=(PARAM_VIEW) {
                    @for mode in [ViewMode::Month, ViewMode::Year] {
                        option value=(mode.as_str()) selected[app.view.mode == mode] { (mode.as_str()) }
                    }
                }
            }
            input type="hidden" name=(PARAM_CURSOR) value=(app.view.cursor.to_rfc3339());
            button type="submit" { "Apply" }
        }
    }
}

/// `compact` grids sit twelve to a page under smaller headings.
fn render_month(grid: &MonthGrid, compact: bool) -> Markup {
    html! {
        section.month-card {
            @if compact {
                h3 { (grid.title()) }
            } @else {
                h2 { (grid.title()) }
            }
            div.month-grid {
                @for label in WEEKDAY_LABELS {
                    div.weekday { (label) }
                }
                @for cell in &grid.cells {
                    (render_day(cell))
                }
            }
        }
    }
}

fn render_day(cell: &DayCell) -> Markup {
    let mut class = String::from("day");
    if !cell.in_month {
        class.push_str(" outside");
    }
    if cell.is_today {
        class.push_str(" today");
    }

    html! {
        div class=(class) data-date=(cell.date.format("%Y-%m-%d").to_string()) {
            div.day-header {
                div.day-num { (cell.date.format("%-d").to_string()) }
            }
            @for event in &cell.events {
                button type="button" class={ "event " (event.style.as_str()) }
                    title=(event.to_string()) data-dialog=(dialog_id(event)) {
                    (event.title)
                }
            }
        }
    }
}

fn render_dialog(event: &Event) -> Markup {
    let detail = EventDetail::from_event(event);

    html! {
        dialog id=(dialog_id(event)) {
            h3 { (detail.title) }
            dl.meta {
                @for (label, value) in detail.fields() {
                    dt { (label) }
                    dd { (value) }
                }
                @if let Some(url) = &detail.url {
                    dt { "More info" }
                    dd { a href=(url) target="_blank" rel="noopener noreferrer" { (url) } }
                }
            }
            form method="dialog" {
                button { "Close" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dance_calendar_core::event::DEFAULT_TIMEZONE;
    use dance_calendar_core::loader::parse_events;

    fn app(query: &str) -> (AppState, DateTime<Utc>) {
        let events = parse_events(
            r#"[
              {"id":"a","title":"Salsa <Social>","style":"salsa","city":"Aarhus","venue":"Godsbanen",
               "start":"2025-03-20T20:00","url":"https://example.com/a"},
              {"id":"b","title":"Bachata Night","style":"bachata","city":"Odense","venue":"Studio",
               "start":"2025-03-21T20:00"}
            ]"#,
            DEFAULT_TIMEZONE,
        )
        .unwrap();
        let now: DateTime<Utc> = "2025-03-18T12:00:00Z".parse().unwrap();
        (AppState::from_query(events, DEFAULT_TIMEZONE, query, now), now)
    }

    #[test]
    fn month_page_has_grid_and_dialogs() {
        let (app, now) = app("");
        let page = render_page(&app, now).into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert_eq!(page.matches("class=\"weekday\"").count(), 7);
        assert_eq!(page.matches("data-date=").count(), 42);
        assert!(page.contains("class=\"day today\""));
        assert!(page.contains("<dialog id=\"event-a\">"));
        assert!(page.contains("<dialog id=\"event-b\">"));
        // Titles are escaped
        assert!(page.contains("Salsa &lt;Social&gt;"));
    }

    #[test]
    fn filters_are_reflected_in_form_and_dialogs() {
        let (app, now) = app("styles=bachata&location=Odense");
        let page = render_page(&app, now).into_string();

        assert!(page.contains("value=\"Odense\""));
        assert!(!page.contains("<dialog id=\"event-a\">"));
        assert!(page.contains("<dialog id=\"event-b\">"));
        assert!(page.contains("1 of 2 events match"));
    }

    #[test]
    fn dialog_links_event_url() {
        let (app, now) = app("");
        let page = render_page(&app, now).into_string();
        assert!(page.contains("<a href=\"https://example.com/a\""));
    }

    #[test]
    fn unchecking_every_style_hides_all_events() {
        let (state, now) = app("");
        let page = render_page(&state, now).into_string();
        assert!(page.contains("<input type=\"hidden\" name=\"styles\" value=\"\">"));

        // What the form submits with all three boxes unchecked
        let (submitted, _) =
            app("date=&location=&styles=&search=&view=month&cursor=2025-03-18T12%3A00%3A00Z");
        assert!(submitted.filters.styles.is_empty());
        assert!(submitted.visible_events().is_empty());

        let (submitted, _) = app("styles=&styles=kizomba&styles=bachata");
        assert_eq!(submitted.visible_events().len(), 1);
    }

    #[test]
    fn year_page_has_twelve_months() {
        let (app, now) = app("view=year");
        let page = render_page(&app, now).into_string();
        assert_eq!(page.matches("class=\"month-card\"").count(), 12);
        assert_eq!(page.matches("<h3>").count(), 12 + 2);
    }

    #[test]
    fn pager_links_move_the_cursor() {
        let (app, now) = app("");
        let next = query_after(&app, Action::Next, now);
        assert!(next.contains("cursor=2025-04-18"));
    }
}
