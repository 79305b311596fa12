use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use super::domain::settings::{FONT_SIZE_RANGE, LocaleTag, Theme};
use super::infrastructure::error::{AppError, Result};
use super::infrastructure::file_ops::write_atomic;

/// Installation-level configuration. User preferences live in the settings
/// store; this file only shapes their defaults and the history size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    #[serde(default = "default_available_locales")]
    pub available_locales: Vec<LocaleTag>,

    #[serde(default = "default_locale")]
    pub default_locale: LocaleTag,

    /// Fixed default theme; computed from the desktop when absent.
    #[serde(default)]
    pub default_theme: Option<Theme>,

    #[serde(default = "default_font_size")]
    pub default_font_size: u32,
}

fn default_history_capacity() -> usize {
    10
}

fn default_available_locales() -> Vec<LocaleTag> {
    ["en", "fr", "es"].into_iter().map(LocaleTag::canonical).collect()
}

fn default_locale() -> LocaleTag {
    LocaleTag::canonical("en")
}

fn default_font_size() -> u32 {
    12
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            available_locales: default_available_locales(),
            default_locale: default_locale(),
            default_theme: None,
            default_font_size: default_font_size(),
        }
    }
}

impl PadConfig {
    /// Load config from disk, falling back to defaults if missing or corrupt
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(AppError::Config("history_capacity must be at least 1".into()));
        }
        if self.available_locales.is_empty() {
            return Err(AppError::Config("available_locales must not be empty".into()));
        }
        if !self.available_locales.contains(&self.default_locale) {
            return Err(AppError::Config(format!(
                "default_locale {} is not one of the available locales",
                self.default_locale
            )));
        }
        if !FONT_SIZE_RANGE.contains(&self.default_font_size) {
            return Err(AppError::Config(format!(
                "default_font_size {} is outside {}..={}",
                self.default_font_size,
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end()
            )));
        }
        Ok(())
    }
}
