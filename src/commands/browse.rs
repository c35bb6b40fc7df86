//! Interactive browsing.
//!
//! Each input line becomes one command. Commands that change state go through
//! `AppState::update`, after which the calendar is redrawn and the shareable
//! link printed, so the loop always shows what the link would reproduce.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use dance_calendar_core::view::ViewMode;
use dance_calendar_core::{Action, AppState, DanceStyle};
use owo_colors::OwoColorize;

use crate::commands::export::{is_nothing_to_export, write_ics};
use crate::commands::link::link;
use crate::commands::show::detail;
use crate::config::Config;
use crate::render::{render_event_list, Render};

const HELP: &str = "\
Commands:
  next | n                 next month (or year)
  prev | p                 previous month (or year)
  today | t                jump to today
  view month|year          switch view
  date [PREFIX]            filter by date prefix, e.g. 2025-03; no value clears
  location [CITY]          filter by city; no value clears
  search [TEXT]            search title, venue and organizer; no value clears
  style STYLE              toggle salsa, bachata or kizomba
  styles STYLE,STYLE       select exactly these styles
  clear                    reset all filters
  list                     list visible events
  show ID                  event details
  export [FILE]            write visible events to an .ics file
  link                     print the shareable link
  help                     this text
  quit | q                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Action),
    List,
    Show(String),
    Export(Option<PathBuf>),
    Link,
    Help,
    Quit,
}

fn parse_style(name: &str) -> Result<DanceStyle, String> {
    name.trim()
        .to_lowercase()
        .parse()
        .map_err(|_| format!("Unknown style '{}'. Expected salsa, bachata or kizomba", name.trim()))
}

/// Parse one input line. Blank lines are `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (line, None),
    };
    let text = || arg.map(str::to_string);

    let command = match name.to_lowercase().as_str() {
        "next" | "n" => Command::Apply(Action::Next),
        "prev" | "previous" | "p" => Command::Apply(Action::Previous),
        "today" | "t" => Command::Apply(Action::Today),
        "view" => {
            let mode = arg
                .ok_or_else(|| "Usage: view month|year".to_string())?
                .parse::<ViewMode>()?;
            Command::Apply(Action::SetView(mode))
        }
        "date" => Command::Apply(Action::SetDate(text())),
        "location" | "city" => Command::Apply(Action::SetLocation(text())),
        "search" => Command::Apply(Action::SetSearch(text())),
        "style" => {
            let style = parse_style(arg.ok_or_else(|| "Usage: style STYLE".to_string())?)?;
            Command::Apply(Action::ToggleStyle(style))
        }
        "styles" => {
            let styles = arg
                .unwrap_or("")
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(parse_style)
                .collect::<Result<Vec<_>, _>>()?;
            Command::Apply(Action::SetStyles(styles))
        }
        "clear" => Command::Apply(Action::ClearFilters),
        "list" | "ls" => Command::List,
        "show" => Command::Show(arg.ok_or_else(|| "Usage: show ID".to_string())?.to_string()),
        "export" => Command::Export(arg.map(PathBuf::from)),
        "link" | "url" => Command::Link,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    };

    Ok(Some(command))
}

fn redraw<W: Write>(app: &AppState, out: &mut W, now: DateTime<Utc>) -> Result<()> {
    writeln!(out, "{}", app.calendar(app.today(now)).render())?;
    writeln!(out)?;
    writeln!(out, "{} {}", "Link:".dimmed(), link(app, None))?;
    Ok(())
}

/// Run the loop until `quit` or end of input. `clock` supplies "now" for each
/// command.
pub fn run_loop<R, W, C>(
    app: &mut AppState,
    config: &Config,
    input: R,
    out: &mut W,
    clock: C,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: Fn() -> DateTime<Utc>,
{
    redraw(app, out, clock())?;

    for line in input.lines() {
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message.yellow())?;
                continue;
            }
        };

        match command {
            Command::Apply(action) => {
                let now = clock();
                app.update(action, now);
                redraw(app, out, now)?;
            }
            Command::List => writeln!(out, "{}", render_event_list(&app.visible_events()))?,
            Command::Show(id) => match detail(app, &id) {
                Ok(text) => writeln!(out, "{}", text)?,
                Err(e) => writeln!(out, "{}", e.to_string().yellow())?,
            },
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| config.export_file.clone());
                match write_ics(app, config, &path) {
                    Ok(count) => writeln!(out, "Exported {} events to {}", count, path.display())?,
                    Err(e) if is_nothing_to_export(&e) => {
                        writeln!(out, "{}", "No events to export.".yellow())?
                    }
                    Err(e) => return Err(e),
                }
            }
            Command::Link => writeln!(out, "{}", link(app, None))?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    Ok(())
}

pub fn run(mut app: AppState, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_loop(&mut app, config, stdin.lock(), &mut stdout, Utc::now)
}
