//! Persisted user preferences.
//!
//! Only the theme is persisted. The store is a flat string key-value map kept in a
//! TOML file; reads happen once at startup and writes once per theme toggle.

use crate::error::{PostdeckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Key under which the theme is stored.
pub const THEME_KEY: &str = "theme";

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Stored spelling
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Only an exact `"dark"` selects the dark theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    /// Glyph for the toggle control: a sun offers light mode, a moon offers dark.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            ThemeMode::Dark => "☀",
            ThemeMode::Light => "☾",
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = PostdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(PostdeckError::invalid_argument(format!(
                "unknown theme '{}', expected 'light' or 'dark'",
                other
            ))),
        }
    }
}

/// Persistent string key-value store with get/set semantics and no expiry.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept as a TOML table on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/postdeck/preferences.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("postdeck").join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                PostdeckError::preference(format!("{} is not valid: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(PostdeckError::file_error(
                format!("Cannot read preferences {}", self.path.display()),
                e,
            )),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&table)
            .map_err(|e| PostdeckError::preference(format!("cannot encode preferences: {}", e)))?;
        std::fs::write(&self.path, contents).map_err(|e| {
            PostdeckError::file_error(
                format!("Cannot write preferences {}", self.path.display()),
                e,
            )
        })
    }
}

/// Volatile store for tests and sessions without a writable data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
