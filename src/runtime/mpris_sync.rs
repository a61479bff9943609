use crate::controller::{PlaybackController, PlaybackOutput, PlaybackStatus};
use crate::mpris::MprisHandle;

/// What MPRIS last saw: active id and whether it counted as playing.
pub type MprisSnapshot = (Option<String>, bool);

pub fn snapshot<O: PlaybackOutput>(controller: &PlaybackController<O>) -> MprisSnapshot {
    let playing = !matches!(
        controller.status(),
        PlaybackStatus::Stopped | PlaybackStatus::Failed(_)
    );
    (controller.active_track_id().map(str::to_string), playing)
}

pub fn update_mpris<O: PlaybackOutput>(mpris: &MprisHandle, controller: &PlaybackController<O>) {
    let (_, playing) = snapshot(controller);
    mpris.set_now_playing(controller.active_track(), playing);
}
