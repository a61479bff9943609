use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use crate::audio::{AudioEvent, AudioPlayer};
use crate::catalog;
use crate::config::Settings;
use crate::controller::PlaybackController;
use crate::error::Result;
use crate::logging;

/// Apply the optional `SOUNDS_DIR` argument on top of loaded settings.
pub fn apply_args(settings: &mut Settings, sounds_dir: Option<String>) {
    if let Some(dir) = sounds_dir {
        settings.catalog.sounds_dir = Some(PathBuf::from(dir));
    }
}

pub fn init_logging(settings: &Settings) {
    match logging::init(&settings.logging) {
        Ok(Some(path)) => {
            tracing::info!(
                log = %path.display(),
                sounds_dir = %settings.catalog.sounds_dir().display(),
                "hush starting"
            );
        }
        Ok(None) => {}
        Err(e) => eprintln!("hush: logging disabled: {e}"),
    }
}

/// Build the catalog and the audio-backed controller.
pub fn build_controller(
    settings: &Settings,
) -> Result<(PlaybackController<AudioPlayer>, Receiver<AudioEvent>)> {
    let catalog = catalog::from_settings(&settings.catalog)?;
    let (audio_player, audio_events) = AudioPlayer::new();
    let controller = PlaybackController::new(catalog, audio_player, settings.audio.volume);
    Ok((controller, audio_events))
}
