use anyhow::{Context, Result};
use chrono_tz::Tz;
use dance_calendar_core::event::{parse_timezone, DEFAULT_TIMEZONE};
use dance_calendar_core::ics::{ExportOptions, DEFAULT_PRODID, DEFAULT_UID_DOMAIN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

static DEFAULT_EVENTS_SOURCE: &str = "events.json";
static DEFAULT_EXPORT_FILE: &str = "dance-events.ics";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Path or http(s) URL of the events document
    #[serde(default = "default_events_source")]
    pub events_source: String,

    /// IANA zone for event times written without an offset
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Where `export` writes when no --out is given
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    #[serde(default = "default_prodid")]
    pub prodid: String,

    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
}

fn default_events_source() -> String {
    DEFAULT_EVENTS_SOURCE.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.name().to_string()
}

fn default_export_file() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_FILE)
}

fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            events_source: default_events_source(),
            timezone: default_timezone(),
            export_file: default_export_file(),
            prodid: default_prodid(),
            uid_domain: default_uid_domain(),
        }
    }
}

impl Config {
    /// ~/.config/dance-calendar/config.toml (or the platform equivalent)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("dance-calendar");
        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        Ok(config)
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
            .with_context(|| format!("Invalid timezone in config: {}", self.timezone))
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            prodid: self.prodid.clone(),
            uid_domain: self.uid_domain.clone(),
        }
    }

    /// Write a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# dance-calendar configuration

# Events document, a path or an http(s) URL:
# events_source = \"{}\"

# Time zone for event times written without an offset:
# timezone = \"{}\"

# Default file for `dance-calendar export`:
# export_file = \"{}\"

# Calendar identity written into exported .ics files:
# prodid = \"{}\"
# uid_domain = \"{}\"
",
            DEFAULT_EVENTS_SOURCE,
            DEFAULT_TIMEZONE.name(),
            DEFAULT_EXPORT_FILE,
            DEFAULT_PRODID,
            DEFAULT_UID_DOMAIN,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tz().unwrap(), DEFAULT_TIMEZONE);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "events_source = \"https://example.com/events.json\"\ntimezone = \"Europe/Berlin\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.events_source, "https://example.com/events.json");
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(config.export_file, PathBuf::from("dance-events.ics"));
        assert_eq!(config.export_options().prodid, DEFAULT_PRODID);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timezone = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn bad_timezone_is_reported() {
        let config = Config {
            timezone: "Mars/Olympus".to_string(),
            ..Config::default()
        };
        assert!(config.tz().is_err());
    }

    #[test]
    fn default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::create_default_config(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
