use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dance_calendar_core::ics::export_ics;
use dance_calendar_core::{AppState, CalendarError};
use owo_colors::OwoColorize;
use tracing::info;

use crate::config::Config;

/// Write the visible events to `out`, returning how many were exported.
///
/// Nothing is written when no event is visible.
pub fn write_ics(app: &AppState, config: &Config, out: &Path) -> Result<usize> {
    let visible = app.visible_events();
    let ics = export_ics(&visible, &config.export_options())?;

    std::fs::write(out, ics)
        .with_context(|| format!("Failed to write calendar file at {}", out.display()))?;

    info!("Exported {} events to {}", visible.len(), out.display());
    Ok(visible.len())
}

/// Whether `err` is the refusal to export an empty selection.
pub fn is_nothing_to_export(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CalendarError>(),
        Some(CalendarError::NothingToExport)
    )
}

pub fn run(app: &AppState, config: &Config, out: Option<PathBuf>) -> Result<()> {
    let path = out.unwrap_or_else(|| config.export_file.clone());
    match write_ics(app, config, &path) {
        Ok(count) => println!("Exported {} events to {}", count, path.display()),
        Err(e) if is_nothing_to_export(&e) => println!("{}", "No events to export.".yellow()),
        Err(e) => return Err(e),
    }
    Ok(())
}
