use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use dance_calendar_core::AppState;
use tracing::info;

use crate::html::render_page;
use crate::render::Render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored grid for the terminal
    #[default]
    Text,
    /// Standalone HTML page
    Html,
}

pub fn render(app: &AppState, format: OutputFormat, now: DateTime<Utc>) -> String {
    match format {
        OutputFormat::Text => app.calendar(app.today(now)).render(),
        OutputFormat::Html => render_page(app, now).into_string(),
    }
}

pub fn run(app: &AppState, format: OutputFormat, out: Option<PathBuf>, now: DateTime<Utc>) -> Result<()> {
    let output = render(app, format, now);

    match out {
        Some(path) => {
            std::fs::write(&path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
            println!("Wrote {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}
