//! Configuration management
//!
//! Overlay options, loaded from and saved to a TOML config file.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};

/// Corner of the screen the overlay is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Position {
    pub fn name(&self) -> &'static str {
        match self {
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
        }
    }

    pub fn all() -> &'static [Position] {
        &ALL_POSITIONS[..]
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Position::TopRight | Position::TopLeft)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Position::TopLeft | Position::BottomLeft)
    }
}

static ALL_POSITIONS: [Position; 4] = [
    Position::TopRight,
    Position::TopLeft,
    Position::BottomRight,
    Position::BottomLeft,
];

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self> {
        Position::all()
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| MonitorError::Config(format!("unknown position '{}'", s)))
    }
}

/// Options recognized when constructing a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    pub position: Position,
    /// Start with only the header visible
    pub collapsed: bool,
    /// Install the default palette if none is installed yet
    pub inject_styles: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            position: Position::TopRight,
            collapsed: false,
            inject_styles: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub overlay: OverlayOptions,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "fpsmon", "fpsmon") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            // Fallback to current directory
            Ok(PathBuf::from("fpsmon.toml"))
        }
    }
}
