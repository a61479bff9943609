use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_looping_sink;
use super::types::{AudioCmd, AudioError, AudioEvent};

/// The one sink that may be producing sound, tagged with the generation it
/// was started under.
pub(super) struct Current {
    pub(super) generation: u64,
    pub(super) sink: Sink,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream: Result<OutputStream, String> = match OutputStreamBuilder::open_default_stream()
        {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped, which would
                // scribble over the TUI.
                stream.log_on_drop(false);
                Ok(stream)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to open audio output");
                Err(e.to_string())
            }
        };

        let mut current: Option<Current> = None;

        while let Ok(cmd) = rx.recv() {
            if !handle_cmd(&mut current, &stream, cmd, &events) {
                break;
            }
        }
    })
}

/// Apply one command to the audio state. Returns `false` once the thread
/// should exit.
pub(super) fn handle_cmd(
    current: &mut Option<Current>,
    stream: &Result<OutputStream, String>,
    cmd: AudioCmd,
    events: &Sender<AudioEvent>,
) -> bool {
    match cmd {
        AudioCmd::Start {
            generation,
            asset,
            volume,
        } => {
            // Never two sinks at once, even if a release got lost.
            if let Some(old) = current.take() {
                old.sink.stop();
            }

            let started = match stream {
                Ok(stream) => create_looping_sink(stream, &asset, volume),
                Err(reason) => Err(AudioError::NoDevice(reason.clone())),
            };

            let event = match started {
                Ok(sink) => {
                    tracing::debug!(generation, asset = %asset.display(), "sound started");
                    *current = Some(Current { generation, sink });
                    AudioEvent::Started { generation }
                }
                Err(e) => AudioEvent::Failed {
                    generation,
                    reason: e.to_string(),
                },
            };
            let _ = events.send(event);
            true
        }

        AudioCmd::Release { generation } => {
            if current.as_ref().is_some_and(|c| c.generation == generation) {
                if let Some(c) = current.take() {
                    c.sink.stop();
                    tracing::debug!(generation, "sound released");
                }
            } else {
                tracing::debug!(generation, "stale release ignored");
            }
            true
        }

        AudioCmd::Quit { fade_out_ms } => {
            if let Some(c) = current.take() {
                fade_out_sink(&c.sink, fade_out_ms);
                c.sink.stop();
            }
            false
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
