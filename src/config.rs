//! Configuration loading for termfolio.
//!
//! Read from `<config dir>/termfolio/config.toml` (e.g.
//! `~/.config/termfolio/config.toml` on Linux). Every key is optional:
//!
//! ```toml
//! # Profile shown when --profile is not given
//! profile = "/home/me/portfolio.json"
//!
//! [hero]
//! command_char_ms = 80
//! command_pause_ms = 300
//! line_pause_ms = 500
//! cursor_blink_ms = 530
//! name_char_ms = 50
//! role_char_ms = 40
//! bio_char_ms = 20
//!
//! [ui]
//! frame_ms = 33
//! toast_ms = 3000
//! skill_level = 85
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::sequencer::Timing;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile file used when none is given on the command line.
    pub profile: Option<PathBuf>,
    pub hero: HeroConfig,
    pub ui: UiConfig,
}

/// Hero typewriter timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub command_char_ms: u64,
    pub command_pause_ms: u64,
    pub line_pause_ms: u64,
    pub cursor_blink_ms: u64,
    /// Output speed for the `whoami` line.
    pub name_char_ms: u64,
    /// Output speed for the `cat role.txt` line.
    pub role_char_ms: u64,
    /// Output speed for the `cat bio.txt` line. Faster, since bios run long.
    pub bio_char_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            command_char_ms: 80,
            command_pause_ms: 300,
            line_pause_ms: 500,
            cursor_blink_ms: 530,
            name_char_ms: 50,
            role_char_ms: 40,
            bio_char_ms: 20,
        }
    }
}

impl HeroConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            command_char_delay: Duration::from_millis(self.command_char_ms),
            command_pause: Duration::from_millis(self.command_pause_ms),
            line_pause: Duration::from_millis(self.line_pause_ms),
        }
    }

    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms.max(1))
    }
}

/// TUI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval while something is animating.
    pub frame_ms: u64,
    /// How long a toast stays visible.
    pub toast_ms: u64,
    /// Fill level of skill meters, 0-100.
    pub skill_level: u8,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_ms: 33,
            toast_ms: 3000,
            skill_level: 85,
        }
    }
}

impl UiConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn skill_level(&self) -> u8 {
        self.skill_level.min(100)
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("termfolio").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. The default location is
    /// best-effort: missing means defaults, broken means a warning and
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let Some(path) = Self::default_path() else {
            return Ok(Config::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        match Self::from_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("ignoring config file: {}", e);
                Ok(Config::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&content).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(content)
    }
}
