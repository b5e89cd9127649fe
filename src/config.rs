use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::event::DEFAULT_EVENT_COLOR;
use crate::core::task::DEFAULT_DURATION_MIN;
use crate::{Error, Result};

/// Engine defaults, loaded from `~/.huddle/huddle.toml`.
///
/// Everything here is a fallback applied to drafts at creation time;
/// nothing affects how existing records are interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Duration given to tasks and events created without one.
    #[serde(default = "default_duration_min")]
    pub default_duration_min: u32,
    /// Color given to events created without one.
    #[serde(default = "default_event_color")]
    pub default_event_color: String,
}

fn default_duration_min() -> u32 {
    DEFAULT_DURATION_MIN
}

fn default_event_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_min: default_duration_min(),
            default_event_color: default_event_color(),
        }
    }
}

impl Config {
    pub fn huddle_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".huddle"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::huddle_dir()?.join("huddle.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        if !path.exists() {
            debug!("config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        debug!(
            default_duration_min = config.default_duration_min,
            default_event_color = %config.default_event_color,
            "config loaded"
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let dir = Self::huddle_dir()?;
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        self.save_to(&Self::config_path()?)
    }

    /// Write to an explicit path. The parent directory must exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}
