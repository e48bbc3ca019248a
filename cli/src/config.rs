//! Optional `hatfield.toml` configuration.
//!
//! Every key has a default, so a missing file or a partial file is fine.

use std::path::Path;

use anyhow::{Context, Result};
use hatfield_core::{Difficulty, FieldConfig};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "hatfield.toml";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub field: FieldSettings,
    pub game: GameSettings,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSettings {
    pub rows: u8,
    pub columns: u8,
    pub hazard_percent: u8,
}

impl Default for FieldSettings {
    fn default() -> Self {
        let FieldConfig {
            size: (rows, columns),
            hazard_percent,
        } = FieldConfig::default();
        Self {
            rows,
            columns,
            hazard_percent,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    /// Fixed difficulty; the player is asked every game when unset.
    pub difficulty: Option<Difficulty>,
    /// Seed for the random source; the OS provides one when unset.
    pub seed: Option<u64>,
}

impl Settings {
    /// Reads `path`, or `hatfield.toml` from the working directory if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        if !required && !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn field_config(&self) -> Result<FieldConfig> {
        let FieldSettings {
            rows,
            columns,
            hazard_percent,
        } = self.field;
        FieldConfig::new((rows, columns), hazard_percent).context("invalid field configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.field_config().unwrap(), FieldConfig::new((10, 20), 30).unwrap());
        assert_eq!(settings.game.difficulty, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::parse(
            r#"
            [field]
            rows = 4

            [game]
            difficulty = "hard"
            seed = 9
            "#,
        )
        .unwrap();

        assert_eq!(settings.field.rows, 4);
        assert_eq!(settings.field.columns, 20);
        assert_eq!(settings.game.difficulty, Some(Difficulty::Hard));
        assert_eq!(settings.game.seed, Some(9));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("[field]\nwidth = 3\n").is_err());
    }

    #[test]
    fn degenerate_field_is_a_config_error() {
        let settings = Settings::parse("[field]\nrows = 1\ncolumns = 1\n").unwrap();

        assert!(settings.field_config().is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/hatfield.toml"))).is_err());
    }
}
