//! Screen layout configuration.
//!
//! A layout file is JSON: window size, background image, music, the font
//! candidates to try, input settings, and the rectangular and round
//! sequences in draw order. The demo layout ships embedded as
//! [`ScreenConfig::builtin`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{RoundSpec, SequenceSpec};
use crate::input::{EditUnit, CURSOR_BLINK_MS};

const BUILTIN_LAYOUT: &str = include_str!("../layouts/default.json");

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read layout '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid layout '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid built-in layout: {0}")]
    Builtin(serde_json::Error),
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Initial volume, 0-128.
    #[serde(default = "default_volume")]
    pub volume: i32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            path: None,
            volume: default_volume(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_blink")]
    pub blink_interval_ms: u64,
    #[serde(default)]
    pub edit_unit: EditUnit,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            blink_interval_ms: default_blink(),
            edit_unit: EditUnit::default(),
        }
    }
}

fn default_title() -> String {
    "sequence-screen".into()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_volume() -> i32 {
    32
}

fn default_blink() -> u64 {
    CURSOR_BLINK_MS
}

// =============================================================================
// Screen config
// =============================================================================

/// Everything needed to build a [`Screen`](crate::pipeline::Screen).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub background: Option<PathBuf>,
    #[serde(default)]
    pub music: MusicConfig,
    /// Font files tried in order until one loads.
    #[serde(default)]
    pub fonts: Vec<PathBuf>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub sequences: Vec<SequenceSpec>,
    #[serde(default)]
    pub rounds: Vec<RoundSpec>,
}

impl ScreenConfig {
    /// The embedded demo layout.
    pub fn builtin() -> Result<Self, ConfigError> {
        serde_json::from_str(BUILTIN_LAYOUT).map_err(ConfigError::Builtin)
    }

    /// Read a layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write this layout as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
