//! Application settings: loading, source tracking, and derived values.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::constants::{
    APP_NAME, DEFAULT_TYPING_DELAY_MAX_MS, DEFAULT_TYPING_DELAY_MIN_MS, SETTINGS_FILE,
};
use crate::util::env_first;

/// User-tunable settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Settings {
    /// Directory holding the persisted conversation. Falls back to the
    /// platform data directory when unset.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
    #[serde(default = "default_delay_min")]
    pub typing_delay_min_ms: u64,
    #[serde(default = "default_delay_max")]
    pub typing_delay_max_ms: u64,
}

fn default_delay_min() -> u64 {
    DEFAULT_TYPING_DELAY_MIN_MS
}

fn default_delay_max() -> u64 {
    DEFAULT_TYPING_DELAY_MAX_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_dir: None,
            typing_delay_min_ms: DEFAULT_TYPING_DELAY_MIN_MS,
            typing_delay_max_ms: DEFAULT_TYPING_DELAY_MAX_MS,
        }
    }
}

/// Where the settings were loaded from.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsSource {
    Embedded,
    File(PathBuf),
}

impl SettingsSource {
    pub fn label(&self) -> String {
        match self {
            SettingsSource::Embedded => "embedded defaults".to_string(),
            SettingsSource::File(path) => path.display().to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings from `$AGENT_CHAT_CONFIG`, `./agent-chat.json`, the
    /// platform config dir, and finally the embedded defaults. The
    /// `AGENT_CHAT_STATE_DIR` variable overrides `state_dir` in every case.
    pub fn load() -> Result<(Self, SettingsSource)> {
        let (mut settings, source) = Self::load_file()?;
        if let Some(dir) = env_first(&["AGENT_CHAT_STATE_DIR"]) {
            settings.state_dir = Some(PathBuf::from(dir));
        }
        Ok((settings, source))
    }

    fn load_file() -> Result<(Self, SettingsSource)> {
        if let Ok(path) = env::var("AGENT_CHAT_CONFIG") {
            let path = PathBuf::from(path);
            return Ok((Self::load_from_path(&path)?, SettingsSource::File(path)));
        }

        let cwd_path = PathBuf::from(SETTINGS_FILE);
        if cwd_path.exists() {
            return Ok((
                Self::load_from_path(&cwd_path)?,
                SettingsSource::File(cwd_path),
            ));
        }

        if let Some(config_path) = config_dir_file(SETTINGS_FILE) {
            if config_path.exists() {
                return Ok((
                    Self::load_from_path(&config_path)?,
                    SettingsSource::File(config_path),
                ));
            }
        }

        let embedded: Settings = serde_json::from_str(include_str!("../agent-chat.json"))
            .context("parse embedded agent-chat.json")?;
        Ok((embedded, SettingsSource::Embedded))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read settings from {}", path.display()))?;
        let settings = serde_json::from_str(&contents)
            .with_context(|| format!("parse settings from {}", path.display()))?;
        Ok(settings)
    }

    /// Directory for persisted state, or `None` if no location can be found.
    pub fn resolved_state_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.state_dir {
            return Some(dir.clone());
        }
        let proj_dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)?;
        Some(proj_dirs.data_dir().to_path_buf())
    }

    /// Typing-delay bounds; a reversed range collapses to its lower bound.
    pub fn typing_delay(&self) -> (Duration, Duration) {
        let min = self.typing_delay_min_ms;
        let max = self.typing_delay_max_ms.max(min);
        (Duration::from_millis(min), Duration::from_millis(max))
    }
}

fn config_dir_file(filename: &str) -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)?;
    Some(proj_dirs.config_dir().join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let embedded: Settings =
            serde_json::from_str(include_str!("../agent-chat.json")).unwrap();
        assert_eq!(embedded, Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "typing_delay_max_ms": 10 }"#).unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.state_dir, None);
        assert_eq!(settings.typing_delay_min_ms, DEFAULT_TYPING_DELAY_MIN_MS);
        assert_eq!(settings.typing_delay_max_ms, 10);
    }

    #[test]
    fn reversed_delay_collapses_to_min() {
        let settings = Settings {
            state_dir: None,
            typing_delay_min_ms: 300,
            typing_delay_max_ms: 100,
        };
        let (min, max) = settings.typing_delay();
        assert_eq!(min, Duration::from_millis(300));
        assert_eq!(max, min);
    }

    #[test]
    fn explicit_state_dir_wins() {
        let settings = Settings {
            state_dir: Some(PathBuf::from("/tmp/agent-chat-state")),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolved_state_dir(),
            Some(PathBuf::from("/tmp/agent-chat-state"))
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(Settings::load_from_path(&path).is_err());
    }
}
