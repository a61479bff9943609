use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::catalog::TrackDescriptor;
use crate::controller::{PlaybackHandle, PlaybackOutput};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent};

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread. The returned receiver yields the outcome of
    /// every start request.
    pub fn new() -> (Self, Receiver<AudioEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();

        let audio_handle = spawn_audio_thread(rx, event_tx);

        let player = Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        };
        (player, event_rx)
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Fade out whatever is playing and wait for the audio thread to exit.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlaybackOutput for AudioPlayer {
    fn acquire(&mut self, handle: &PlaybackHandle, track: &TrackDescriptor, volume: f32) {
        let cmd = AudioCmd::Start {
            generation: handle.generation(),
            asset: track.asset.clone(),
            volume,
        };
        if self.send(cmd).is_err() {
            tracing::warn!(id = %track.id, "audio thread is gone; cannot start sound");
        }
    }

    fn release(&mut self, handle: PlaybackHandle) {
        let generation = handle.generation();
        if self.send(AudioCmd::Release { generation }).is_err() {
            tracing::debug!(generation, "audio thread is gone; nothing to release");
        }
    }
}
