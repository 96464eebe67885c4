//! Configuration and settings module.
//!
//! Settings are read-only defaults for the viewer (palette, starting speed,
//! end policy). They are loaded from the user's config directory; the viewer
//! never writes them back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::error::AppError;
use super::playback::{DEFAULT_FPS, MAX_FPS, MIN_FPS};
use super::replay::{CellAppearance, CellCode};

/// Settings filename inside the config directory.
const SETTINGS_FILENAME: &str = "config.json";

/// Application directory name under the platform config dir.
const APP_DIR: &str = "grid-replay-viewer";

/// Default file name suffix of replay logs.
pub const DEFAULT_LOG_SUFFIX: &str = ".viz.txt";

/// Colour palette for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    // Window colors
    /// Window background
    pub background: [u8; 3],
    /// Panel background
    pub panel_background: [u8; 3],
    /// HUD and name bar background
    pub header_background: [u8; 3],
    /// Grid line color
    pub grid: [u8; 3],

    // Text colors
    /// HUD and name bar text
    pub text_header: [u8; 3],
    /// Frame counter text
    pub text_counter: [u8; 3],

    // Cell colors
    /// Wall cells
    pub wall: [u8; 3],
    /// Mine cells
    pub mine: [u8; 3],
    /// Player 1 tanks
    pub tank_a: [u8; 3],
    /// Player 2 tanks
    pub tank_b: [u8; 3],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: [18, 18, 24],
            panel_background: [28, 28, 36],
            header_background: [40, 40, 52],
            grid: [60, 60, 72],

            text_header: [250, 250, 255],
            text_counter: [210, 210, 220],

            wall: [120, 120, 130],  // Gray
            mine: [230, 230, 230],  // Off-white
            tank_a: [80, 160, 255], // Blue
            tank_b: [255, 80, 80],  // Red
        }
    }
}

impl CellAppearance for ColorSettings {
    /// `None` means the cell is left unpainted.
    type Token = Option<[u8; 3]>;

    fn appearance(&self, cell: CellCode) -> Self::Token {
        match cell {
            CellCode::Wall => Some(self.wall),
            CellCode::Mine => Some(self.mine),
            CellCode::TankA => Some(self.tank_a),
            CellCode::TankB => Some(self.tank_b),
            CellCode::Empty => None,
        }
    }
}

/// Viewer settings: palette and startup preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Colour customization settings.
    #[serde(default)]
    pub colors: ColorSettings,

    /// Starting playback speed in frames per second (1 to 60).
    #[serde(default = "default_fps")]
    pub default_fps: u32,

    /// Whether finished replays hold their last frame by default.
    #[serde(default = "default_hold_last")]
    pub hold_last: bool,

    /// Whether panel names are visible at startup.
    #[serde(default)]
    pub show_names: bool,

    /// File name suffix used to discover replay logs.
    #[serde(default = "default_log_suffix")]
    pub log_suffix: String,

    /// Initial window size (width, height).
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

fn default_hold_last() -> bool {
    true
}

fn default_log_suffix() -> String {
    DEFAULT_LOG_SUFFIX.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            colors: ColorSettings::default(),
            default_fps: default_fps(),
            hold_last: default_hold_last(),
            show_names: false,
            log_suffix: default_log_suffix(),
            window_size: None,
        }
    }
}

impl AppSettings {
    /// Get the settings file path in the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR);
            path.push(SETTINGS_FILENAME);
            path
        })
    }

    /// Read settings from `path`.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::SettingsLoadError {
            reason: format!("{}: {}", path.display(), e),
        })?;
        serde_json::from_str(&content).map_err(|e| AppError::SettingsLoadError {
            reason: format!("{}: {}", path.display(), e),
        })
    }

    /// Load settings from `path` (or the default location), returning
    /// defaults if the file is missing or unusable.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Self::default(),
            },
        };

        Self::load_from(&path).unwrap_or_else(|e| {
            warn!(error = %e, "using default settings");
            Self::default()
        })
    }

    /// Get the default playback speed, clamped to valid range.
    pub fn get_default_fps(&self) -> u32 {
        self.default_fps.clamp(MIN_FPS, MAX_FPS)
    }
}
