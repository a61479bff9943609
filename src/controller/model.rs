use crate::audio::AudioEvent;
use crate::catalog::{Catalog, TrackDescriptor};

/// Exclusive token for one live sound. Not `Clone`: releasing it consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PlaybackHandle {
    generation: u64,
}

impl PlaybackHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Where sounds actually get played.
///
/// Both calls are fire-and-forget. The outcome of `acquire` comes back later
/// through `PlaybackController::on_audio_event`.
pub trait PlaybackOutput {
    /// Start looping `track` at `volume`, bound to `handle`.
    fn acquire(&mut self, handle: &PlaybackHandle, track: &TrackDescriptor, volume: f32);
    /// Silence the sound bound to `handle`. Assumed to always succeed.
    fn release(&mut self, handle: PlaybackHandle);
}

/// What the user should see about the active sound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    /// Requested, not yet confirmed by the output.
    Starting,
    Playing,
    /// The output could not start the sound. The track still counts as active.
    Failed(String),
}

#[derive(Debug)]
struct ActivePlayback {
    track_id: String,
    handle: PlaybackHandle,
}

pub struct PlaybackController<O: PlaybackOutput> {
    catalog: Catalog,
    output: O,
    volume: f32,
    active: Option<ActivePlayback>,
    status: PlaybackStatus,
    next_generation: u64,
}

impl<O: PlaybackOutput> PlaybackController<O> {
    pub fn new(catalog: Catalog, output: O, volume: f32) -> Self {
        Self {
            catalog,
            output,
            volume: volume.clamp(0.0, 1.0),
            active: None,
            status: PlaybackStatus::Stopped,
            next_generation: 1,
        }
    }

    /// Toggle `id`: stop it if it is the active sound, otherwise switch to it.
    /// Unknown ids are ignored.
    pub fn select(&mut self, id: &str) {
        let Some(track) = self.catalog.get(id) else {
            tracing::debug!(id, "ignoring selection of unknown track");
            return;
        };

        if self.is_active(id) {
            tracing::info!(id, "toggled off");
            self.stop();
            return;
        }

        // Release before acquire.
        if let Some(previous) = self.active.take() {
            self.output.release(previous.handle);
        }

        let handle = PlaybackHandle {
            generation: self.next_generation,
        };
        self.next_generation += 1;

        tracing::info!(id, generation = handle.generation, "starting sound");
        self.output.acquire(&handle, track, self.volume);
        self.active = Some(ActivePlayback {
            track_id: track.id.clone(),
            handle,
        });
        self.status = PlaybackStatus::Starting;
    }

    /// Silence the active sound, if any.
    pub fn stop(&mut self) {
        if self.release_active() {
            tracing::info!("stopped");
        }
        self.status = PlaybackStatus::Stopped;
    }

    /// Select a uniformly random catalog entry. May pick the active one,
    /// which toggles it off.
    pub fn select_random_with<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(id) = self.catalog.choose(rng).map(|t| t.id.clone()) else {
            return;
        };
        self.select(&id);
    }

    pub fn select_random(&mut self) {
        self.select_random_with(&mut rand::rng());
    }

    /// Apply the outcome of an earlier `acquire`. Events for anything but
    /// the current handle are stale and dropped.
    pub fn on_audio_event(&mut self, event: AudioEvent) {
        let current = self.active.as_ref().map(|a| a.handle.generation);
        if current != Some(event.generation()) {
            tracing::debug!(?event, ?current, "ignoring stale audio event");
            return;
        }

        match event {
            AudioEvent::Started { .. } => self.status = PlaybackStatus::Playing,
            AudioEvent::Failed { reason, .. } => {
                tracing::warn!(id = self.active_track_id(), %reason, "playback failed to start");
                self.status = PlaybackStatus::Failed(reason);
            }
        }
    }

    pub fn active_track_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.track_id.as_str())
    }

    pub fn active_track(&self) -> Option<&TrackDescriptor> {
        self.active_track_id().and_then(|id| self.catalog.get(id))
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_track_id() == Some(id)
    }

    pub fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn release_active(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                self.output.release(active.handle);
                true
            }
            None => false,
        }
    }
}

impl<O: PlaybackOutput> Drop for PlaybackController<O> {
    fn drop(&mut self) {
        self.stop();
    }
}
