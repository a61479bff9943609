//! File-backed `tracing` setup. The terminal belongs to the UI, so log
//! lines never go to stdout or stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};
use crate::error::{Error, Result};

/// Environment variable that overrides `logging.level` (EnvFilter syntax).
pub const LOG_ENV: &str = "HUSH_LOG";

/// Install the global subscriber. Returns the log file in use, or `None`
/// when logging is disabled.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>> {
    if !settings.enabled {
        return Ok(None);
    }

    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return Err(Error::Logging("no log file path could be determined".into()));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(std::env::var(LOG_ENV).ok(), &settings.level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(Some(path))
}

/// `HUSH_LOG` wins over `logging.level`; anything unparsable falls through.
fn filter(from_env: Option<String>, level: &str) -> EnvFilter {
    from_env
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
