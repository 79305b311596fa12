//! Key-value persistence for user preferences.
//!
//! Values are raw strings or integers keyed by fixed names; typing and
//! validation happen one level up in the settings store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::Result;
use super::file_ops::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Int(i64),
    Str(String),
}

impl PrefValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

impl From<&str> for PrefValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for PrefValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// A flat store of preference values.
pub trait PreferenceBackend {
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Store every entry, or none of them if persisting fails.
    fn put_all(&mut self, entries: &[(&str, PrefValue)]) -> Result<()>;

    fn put(&mut self, key: &str, value: PrefValue) -> Result<()> {
        self.put_all(&[(key, value)])
    }
}

/// Preferences kept in a JSON object on disk.
#[derive(Debug)]
pub struct JsonPreferences {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
}

impl JsonPreferences {
    /// Load preferences from `path`. A missing file means no overrides; an
    /// unreadable or corrupt one is logged and treated the same way, and is
    /// replaced by the next successful write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse preferences {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read preferences {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }
        };
        tracing::debug!("Loaded {} preference(s) from {}", values.len(), path.display());
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for JsonPreferences {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn put_all(&mut self, entries: &[(&str, PrefValue)]) -> Result<()> {
        let mut next = self.values.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), value.clone());
        }

        let json = serde_json::to_string_pretty(&next)?;
        write_atomic(&self.path, json.as_bytes())?;

        self.values = next;
        Ok(())
    }
}

/// Preferences that live only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: impl Into<PrefValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl PreferenceBackend for MemoryPreferences {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn put_all(&mut self, entries: &[(&str, PrefValue)]) -> Result<()> {
        for (key, value) in entries {
            self.values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pref_value_untagged_serialization() {
        let json = serde_json::to_string(&PrefValue::Int(14)).unwrap();
        assert_eq!(json, "14");
        let json = serde_json::to_string(&PrefValue::from("dark")).unwrap();
        assert_eq!(json, "\"dark\"");

        let parsed: PrefValue = serde_json::from_str("\"10,20,30\"").unwrap();
        assert_eq!(parsed.as_str(), Some("10,20,30"));
        assert_eq!(parsed.as_int(), None);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let prefs = JsonPreferences::open(tmp.path().join("preferences.json"));
        assert_eq!(prefs.get("theme"), None);
    }

    #[test]
    fn test_put_persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config").join("preferences.json");

        let mut prefs = JsonPreferences::open(&path);
        prefs.put("theme", PrefValue::from("dark")).unwrap();
        prefs
            .put_all(&[
                ("editor_font_family", PrefValue::from("Serif")),
                ("editor_font_size", PrefValue::Int(14)),
            ])
            .unwrap();

        let reopened = JsonPreferences::open(&path);
        assert_eq!(reopened.get("theme"), Some(PrefValue::from("dark")));
        assert_eq!(reopened.get("editor_font_size"), Some(PrefValue::Int(14)));
        assert_eq!(reopened.get("editor_font_family"), Some(PrefValue::from("Serif")));
    }

    #[test]
    fn test_corrupt_file_falls_back_and_is_repaired() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let mut prefs = JsonPreferences::open(&path);
        assert_eq!(prefs.get("locale"), None);

        prefs.put("locale", PrefValue::from("fr")).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, PrefValue> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.get("locale"), Some(&PrefValue::from("fr")));
    }

    #[test]
    fn test_failed_write_keeps_previous_values() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = tmp.path().join("preferences.json");
        fs::create_dir(&path).unwrap();

        let mut prefs = JsonPreferences::open(&path);
        assert!(prefs.put("theme", PrefValue::from("dark")).is_err());
        assert_eq!(prefs.get("theme"), None);
    }

    #[test]
    fn test_memory_preferences() {
        let mut prefs = MemoryPreferences::new().with_value("theme", "light");
        assert_eq!(prefs.get("theme"), Some(PrefValue::from("light")));
        prefs.put("theme", PrefValue::from("dark")).unwrap();
        assert_eq!(prefs.get("theme"), Some(PrefValue::from("dark")));
    }
}
