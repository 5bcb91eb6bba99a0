//! Runtime configuration.
//!
//! Settings come from an optional TOML file (`--config`, else
//! `<config dir>/postdeck/config.toml`) and are then overridden by command-line
//! flags. A missing default file means defaults; a file that exists but cannot be
//! parsed is an error.

use crate::error::{PostdeckError, Result};
use crate::listing::DEFAULT_PAGE_SIZE;
use crate::preferences::FilePreferenceStore;
use crate::render::scroll::DEFAULT_BACK_TO_TOP_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Where posts are read from when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/posts.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the post collection
    pub data_path: PathBuf,

    /// Cards per page
    pub page_size: usize,

    /// Scroll offset (in scroll units) past which "back to top" is offered
    pub back_to_top_threshold: u32,

    /// Theme preference file; `None` uses the platform data directory
    pub preferences_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            back_to_top_threshold: DEFAULT_BACK_TO_TOP_THRESHOLD,
            preferences_path: None,
        }
    }
}

impl Config {
    /// `<config dir>/postdeck/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("postdeck").join("config.toml"))
    }

    /// Parse a config file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PostdeckError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            PostdeckError::config(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else the default location when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PostdeckError::config("page_size must be greater than zero"));
        }
        Ok(())
    }

    pub fn page_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.page_size)
            .ok_or_else(|| PostdeckError::config("page_size must be greater than zero"))
    }

    /// Preference file to use, if any location is available.
    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences_path
            .clone()
            .or_else(FilePreferenceStore::default_path)
    }
}
