//! ICS export of the visible events.

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{CalendarError, CalendarResult};
use crate::event::Event;

pub const DEFAULT_PRODID: &str = "-//Denmark Dance Calendar//EN";
pub const DEFAULT_UID_DOMAIN: &str = "dancecalendar";

/// Calendar-wide values written into every export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub prodid: String,
    /// Appended to event ids to form UIDs (`<id>@<uid_domain>`)
    pub uid_domain: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            prodid: DEFAULT_PRODID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
        }
    }
}

/// Escape a TEXT value.
///
/// Replacements run in a fixed order. A backslash-n pair in the input is
/// already an escaped newline and is kept as is; literal newlines run last so
/// the backslashes they introduce are not touched again.
pub fn escape_text(text: &str) -> String {
    const REPLACEMENTS: [(&str, &str); 4] = [
        ("\\n", "\\n"),
        (",", "\\,"),
        (";", "\\;"),
        ("\n", "\\n"),
    ];

    REPLACEMENTS
        .into_iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// UTC basic format, e.g. `20250320T190000Z`.
pub fn format_utc(dt: &DateTime<FixedOffset>) -> String {
    dt.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

fn push_event(lines: &mut Vec<String>, event: &Event, options: &ExportOptions) {
    let organizer = event.organizer.as_deref().unwrap_or("");

    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}@{}", event.id, options.uid_domain));
    lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
    lines.push(format!(
        "DESCRIPTION:{} - {}",
        escape_text(organizer),
        escape_text(&event.venue)
    ));
    lines.push(format!("DTSTART:{}", format_utc(&event.start)));
    lines.push(format!("DTEND:{}", format_utc(&event.end)));
    if let Some(url) = &event.url {
        lines.push(format!("URL:{}", url));
    }
    lines.push("END:VEVENT".to_string());
}

/// Serialize `events` into one VCALENDAR document with CRLF line endings.
///
/// An empty selection is refused rather than producing an empty calendar.
pub fn export_ics(events: &[&Event], options: &ExportOptions) -> CalendarResult<String> {
    if events.is_empty() {
        return Err(CalendarError::NothingToExport);
    }

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", options.prodid),
    ];

    for event in events {
        push_event(&mut lines, event, options);
    }

    lines.push("END:VCALENDAR".to_string());

    Ok(lines.join("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DanceStyle;
    use crate::testing::event;

    // --- escape_text ---

    #[test]
    fn escapes_commas_and_semicolons() {
        assert_eq!(escape_text("Salsa, Bachata; Kizomba"), "Salsa\\, Bachata\\; Kizomba");
    }

    #[test]
    fn escapes_literal_newlines() {
        assert_eq!(escape_text("line one\nline two"), "line one\\nline two");
    }

    #[test]
    fn keeps_already_escaped_newlines() {
        assert_eq!(escape_text("line one\\nline two"), "line one\\nline two");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_text("Friday Social"), "Friday Social");
    }

    // --- export_ics ---

    #[test]
    fn empty_selection_is_refused() {
        assert!(matches!(
            export_ics(&[], &ExportOptions::default()),
            Err(CalendarError::NothingToExport)
        ));
    }

    #[test]
    fn document_is_framed_and_crlf_joined() {
        let ev = event("abc", DanceStyle::Salsa, "Aarhus", "2025-03-20T20:00");
        let ics = export_ics(&[&ev], &ExportOptions::default()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Denmark Dance Calendar//EN\r\n"));
        assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR"));
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn event_lines_in_order() {
        let mut ev = event("abc", DanceStyle::Salsa, "Aarhus", "2025-03-20T20:00");
        ev.title = "Salsa, Rueda & more".to_string();
        ev.organizer = Some("Club; Latino".to_string());
        ev.url = Some("https://example.com/abc".to_string());

        let ics = export_ics(&[&ev], &ExportOptions::default()).unwrap();
        let lines: Vec<_> = ics.split("\r\n").collect();

        assert_eq!(
            &lines[3..],
            &[
                "BEGIN:VEVENT",
                "UID:abc@dancecalendar",
                "SUMMARY:Salsa\\, Rueda & more",
                "DESCRIPTION:Club\\; Latino - Aarhus Dance Hall",
                // 20:00 in Copenhagen winter time
                "DTSTART:20250320T190000Z",
                "DTEND:20250320T230000Z",
                "URL:https://example.com/abc",
                "END:VEVENT",
                "END:VCALENDAR",
            ]
        );
    }

    #[test]
    fn missing_organizer_and_url() {
        let ev = event("abc", DanceStyle::Bachata, "Odense", "2025-07-01T21:00");
        let ics = export_ics(&[&ev], &ExportOptions::default()).unwrap();

        assert!(ics.contains("DESCRIPTION: - Odense Dance Hall\r\n"));
        assert!(!ics.contains("URL:"));
        // Summer time, UTC+2
        assert!(ics.contains("DTSTART:20250701T190000Z"));
    }

    #[test]
    fn one_vevent_per_event() {
        let a = event("a", DanceStyle::Salsa, "Aarhus", "2025-03-20T20:00");
        let b = event("b", DanceStyle::Kizomba, "Vejle", "2025-03-21T20:00");
        let ics = export_ics(&[&a, &b], &ExportOptions::default()).unwrap();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(ics.matches("END:VEVENT").count(), 2);
    }

    #[test]
    fn custom_options_are_used() {
        let ev = event("abc", DanceStyle::Salsa, "Aarhus", "2025-03-20T20:00");
        let options = ExportOptions {
            prodid: "-//Test//EN".to_string(),
            uid_domain: "example.org".to_string(),
        };
        let ics = export_ics(&[&ev], &options).unwrap();
        assert!(ics.contains("PRODID:-//Test//EN\r\n"));
        assert!(ics.contains("UID:abc@example.org\r\n"));
    }
}
