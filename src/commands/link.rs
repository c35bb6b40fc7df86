use anyhow::Result;
use dance_calendar_core::AppState;

/// Shareable link for the current state, relative unless `base` is given.
pub fn link(app: &AppState, base: Option<&str>) -> String {
    format!("{}?{}", base.unwrap_or(""), app.query())
}

pub fn run(app: &AppState, base: Option<&str>) -> Result<()> {
    println!("{}", link(app, base));
    Ok(())
}
