use std::{collections::HashSet, env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `HUSH__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("HUSH")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(format!(
                "audio.volume must be within 0.0..=1.0, got {}",
                self.audio.volume
            ));
        }
        if self.catalog.tracks.iter().any(|t| t.asset.as_os_str().is_empty()) {
            return Err("catalog.tracks entries need a non-empty asset".to_string());
        }
        let mut seen = HashSet::new();
        for (i, t) in self.catalog.tracks.iter().enumerate() {
            let id = t.id.trim();
            if id.is_empty() {
                return Err(format!("catalog.tracks[{i}] has a blank id"));
            }
            if !seen.insert(id) {
                return Err(format!("catalog.tracks has a duplicate id: {id}"));
            }
        }
        Ok(())
    }
}

/// Resolve the config path from `HUSH_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("HUSH_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/hush/config.toml` or `~/.config/hush/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", ".config").map(|d| d.join("hush").join("config.toml"))
}

/// `$XDG_DATA_HOME/hush/sounds` or `~/.local/share/hush/sounds`, else `./sounds`.
pub fn default_sounds_dir() -> PathBuf {
    xdg_home("XDG_DATA_HOME", ".local/share")
        .map(|d| d.join("hush").join("sounds"))
        .unwrap_or_else(|| PathBuf::from("sounds"))
}

/// `$XDG_STATE_HOME/hush/hush.log` or `~/.local/state/hush/hush.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", ".local/state").map(|d| d.join("hush").join("hush.log"))
}

fn xdg_home(var: &str, home_relative: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_relative))
    }
}
