use anyhow::Result;
use dance_calendar_core::detail::EventDetail;
use dance_calendar_core::AppState;

use crate::render::Render;

/// Detail view for one event, looked up among all loaded events.
pub fn detail(app: &AppState, id: &str) -> Result<String> {
    match app.find_event(id) {
        Some(event) => Ok(EventDetail::from_event(event).render()),
        None => anyhow::bail!(
            "Event '{}' not found.\n\n\
            List event ids with:\n  \
            dance-calendar list",
            id
        ),
    }
}

pub fn run(app: &AppState, id: &str) -> Result<()> {
    println!("{}", detail(app, id)?);
    Ok(())
}
