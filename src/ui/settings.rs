use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gtk4::glib;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const SETTINGS_DIR_NAME: &str = "glowgrid";
const SETTINGS_FILE_NAME: &str = "settings.json";
const DEBUG_ENV: &str = "GLOWGRID_DEBUG";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Hold durations used by sequence playback and click feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub lit_ms: u64,
    pub gap_ms: u64,
    pub flash_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            lit_ms: 500,
            gap_ms: 100,
            flash_ms: 300,
        }
    }
}

impl Timings {
    pub fn lit(&self) -> Duration {
        Duration::from_millis(self.lit_ms.max(1))
    }

    pub fn gap(&self) -> Duration {
        Duration::from_millis(self.gap_ms.max(1))
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms.max(1))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timings: Timings,
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Option<Self>, SettingsError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_json(&raw).map(Some)
    }

    /// Settings from the user config dir, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let path = settings_path();
        match Self::from_file(&path) {
            Ok(Some(settings)) => {
                debug!(path = %path.display(), ?settings, "loaded settings");
                settings
            }
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring settings file");
                Settings::default()
            }
        }
    }
}

fn settings_path() -> PathBuf {
    glib::user_config_dir()
        .join(SETTINGS_DIR_NAME)
        .join(SETTINGS_FILE_NAME)
}

pub fn debug_mode_enabled() -> bool {
    match std::env::var(DEBUG_ENV) {
        Ok(value) => {
            let v = value.trim().to_ascii_lowercase();
            matches!(v.as_str(), "1" | "true" | "yes" | "on")
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timings.lit(), Duration::from_millis(500));
        assert_eq!(settings.timings.gap(), Duration::from_millis(100));
        assert_eq!(settings.timings.flash(), Duration::from_millis(300));
    }

    #[test]
    fn partial_timings_override_only_named_fields() {
        let settings =
            Settings::from_json(r#"{"timings": {"lit_ms": 400}, "theme": "dark"}"#).unwrap();
        assert_eq!(settings.timings.lit_ms, 400);
        assert_eq!(settings.timings.gap_ms, 100);
        assert_eq!(settings.timings.flash_ms, 300);
    }

    #[test]
    fn zero_durations_are_clamped() {
        let settings = Settings::from_json(r#"{"timings": {"gap_ms": 0}}"#).unwrap();
        assert_eq!(settings.timings.gap(), Duration::from_millis(1));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json("{\"timings\": "),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("glowgrid-missing-settings-file.json");
        assert!(Settings::from_file(&path).unwrap().is_none());
    }
}
