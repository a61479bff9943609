use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::load::default_sounds_dir;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/hush/config.toml` or `~/.config/hush/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `HUSH__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output level for every sound, from 0.0 (silent) to 1.0 (full).
    pub volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 0.5,
            quit_fade_out_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether each row shows its "For <category>" hint.
    pub show_categories: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " Soothing sounds to help your little one relax ".to_string(),
            show_categories: true,
        }
    }
}

/// Where the sounds live and which ones are offered, in display order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Base directory for relative `asset` paths. Defaults to
    /// `$XDG_DATA_HOME/hush/sounds`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sounds_dir: Option<PathBuf>,
    pub tracks: Vec<TrackEntry>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            sounds_dir: None,
            tracks: default_tracks(),
        }
    }
}

impl CatalogSettings {
    /// The configured sounds directory, or the XDG default.
    pub fn sounds_dir(&self) -> PathBuf {
        self.sounds_dir.clone().unwrap_or_else(default_sounds_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackEntry {
    pub id: String,
    pub label: String,
    pub category: String,
    /// Audio file; relative paths resolve against `catalog.sounds_dir`.
    pub asset: PathBuf,
}

fn entry(id: &str, label: &str, category: &str, asset: &str) -> TrackEntry {
    TrackEntry {
        id: id.to_string(),
        label: label.to_string(),
        category: category.to_string(),
        asset: PathBuf::from(asset),
    }
}

pub fn default_tracks() -> Vec<TrackEntry> {
    vec![
        entry("lullaby", "Lullaby", "Sleeping", "hush-little-baby.mp3"),
        entry(
            "midnight-beach",
            "Midnight Beach",
            "Chill Nights",
            "moonlit-beach-soundscape.mp3",
        ),
        entry(
            "calming-rain",
            "Calming Rain",
            "Comfort",
            "nature-rain-medium-heavy-consistent.mp3",
        ),
        entry("sweet-lullaby", "Sweet Lullaby", "Resting", "sweet-lullaby.mp3"),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Default filter directive; `HUSH_LOG` takes precedence when set.
    pub level: String,
    /// Log file path. Defaults to `$XDG_STATE_HOME/hush/hush.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file: None,
        }
    }
}
