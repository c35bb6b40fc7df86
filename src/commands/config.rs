use std::path::Path;

use anyhow::Result;

use crate::config::Config;

/// Write a commented default config file unless one already exists.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}\n\n\
            Use --force to overwrite it.",
            path.display()
        );
    }

    Config::create_default_config(path)?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timezone = \"Europe/Oslo\"\n").unwrap();

        assert!(init(&path, false).is_err());
        assert!(std::fs::read_to_string(&path).unwrap().contains("Europe/Oslo"));

        init(&path, true).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("Europe/Oslo"));
    }
}
