//! Audio-related small types: commands, events and errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace whatever is playing with `asset`, looped forever at `volume`.
    Start {
        generation: u64,
        asset: PathBuf,
        volume: f32,
    },
    /// Stop the sound started under `generation`, if it is still the current one.
    Release { generation: u64 },
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Outcome of a `Start` command, reported asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    Started { generation: u64 },
    Failed { generation: u64, reason: String },
}

impl AudioEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation } | Self::Failed { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoDevice(String),
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
