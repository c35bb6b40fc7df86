use anyhow::{Context, Result};
use dance_calendar_core::{AppState, Event};

use crate::render::render_event_list;

pub fn to_json(events: &[&Event]) -> Result<String> {
    serde_json::to_string_pretty(events).context("Failed to serialize events")
}

pub fn run(app: &AppState, json: bool) -> Result<()> {
    let visible = app.visible_events();

    if json {
        println!("{}", to_json(&visible)?);
    } else {
        println!("{}", render_event_list(&visible));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dance_calendar_core::event::DEFAULT_TIMEZONE;
    use dance_calendar_core::loader::parse_events;

    #[test]
    fn json_lists_visible_events() {
        let events = parse_events(
            r#"[
              {"id":"a","title":"Salsa Social","style":"salsa","city":"Aarhus","venue":"Godsbanen","start":"2025-03-20T20:00"},
              {"id":"b","title":"Bachata Night","style":"bachata","city":"Odense","venue":"Studio","start":"2025-03-21T20:00"}
            ]"#,
            DEFAULT_TIMEZONE,
        )
        .unwrap();
        let now = "2025-03-18T12:00:00Z".parse().unwrap();
        let app = AppState::from_query(events, DEFAULT_TIMEZONE, "styles=salsa", now);

        let json = to_json(&app.visible_events()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let listed = value.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["style"], "salsa");
        assert_eq!(listed[0]["start"], "2025-03-20T20:00:00+01:00");
        assert_eq!(listed[0]["address"], serde_json::Value::Null);
    }
}
