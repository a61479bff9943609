use std::collections::HashSet;

use rand::seq::IndexedRandom;

use super::*;
use crate::audio::AudioEvent;
use crate::catalog::{Catalog, TrackDescriptor};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Acquire { generation: u64, id: String, volume: f32 },
    Release { generation: u64 },
}

/// Records every call and tracks which generations are currently live.
#[derive(Default)]
struct RecordingOutput {
    ops: Vec<Op>,
    live: HashSet<u64>,
}

impl PlaybackOutput for RecordingOutput {
    fn acquire(&mut self, handle: &PlaybackHandle, track: &TrackDescriptor, volume: f32) {
        assert!(self.live.insert(handle.generation()), "generation reused");
        self.ops.push(Op::Acquire {
            generation: handle.generation(),
            id: track.id.clone(),
            volume,
        });
    }

    fn release(&mut self, handle: PlaybackHandle) {
        assert!(self.live.remove(&handle.generation()), "released twice");
        self.ops.push(Op::Release {
            generation: handle.generation(),
        });
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        TrackDescriptor::new("lullaby", "Lullaby", "Sleeping", "/s/lullaby.mp3"),
        TrackDescriptor::new("midnight-beach", "Midnight Beach", "Chill Nights", "/s/beach.mp3"),
        TrackDescriptor::new("calming-rain", "Calming Rain", "Comfort", "/s/rain.mp3"),
        TrackDescriptor::new("sweet-lullaby", "Sweet Lullaby", "Resting", "/s/sweet.mp3"),
    ])
    .unwrap()
}

fn controller() -> PlaybackController<RecordingOutput> {
    PlaybackController::new(catalog(), RecordingOutput::default(), 0.5)
}

fn assert_single_live(c: &PlaybackController<RecordingOutput>) {
    let live = c.output().live.len();
    assert!(live <= 1, "{live} sounds live");
    assert_eq!(live == 1, c.active_track_id().is_some());
}

#[test]
fn starts_idle() {
    let c = controller();
    assert_eq!(c.active_track_id(), None);
    assert_eq!(c.status(), &PlaybackStatus::Stopped);
    assert!(c.output().ops.is_empty());
}

#[test]
fn select_starts_the_track_at_the_configured_volume() {
    let mut c = controller();
    c.select("calming-rain");

    assert_eq!(c.active_track_id(), Some("calming-rain"));
    assert_eq!(c.active_track().map(|t| t.label.as_str()), Some("Calming Rain"));
    assert_eq!(c.status(), &PlaybackStatus::Starting);
    assert_eq!(
        c.output().ops,
        vec![Op::Acquire {
            generation: 1,
            id: "calming-rain".into(),
            volume: 0.5,
        }]
    );
}

#[test]
fn selecting_the_active_track_again_toggles_it_off() {
    let mut c = controller();
    c.select("lullaby");
    c.select("lullaby");

    assert_eq!(c.active_track_id(), None);
    assert_eq!(c.status(), &PlaybackStatus::Stopped);
    assert!(c.output().live.is_empty());
}

#[test]
fn switching_releases_the_old_handle_once_before_acquiring_the_new_one() {
    let mut c = controller();
    c.select("midnight-beach");
    c.select("calming-rain");

    assert_eq!(c.active_track_id(), Some("calming-rain"));
    assert_eq!(
        c.output().ops,
        vec![
            Op::Acquire {
                generation: 1,
                id: "midnight-beach".into(),
                volume: 0.5,
            },
            Op::Release { generation: 1 },
            Op::Acquire {
                generation: 2,
                id: "calming-rain".into(),
                volume: 0.5,
            },
        ]
    );
}

#[test]
fn unknown_id_changes_nothing() {
    let mut c = controller();
    c.select("nonexistent-id");
    assert_eq!(c.active_track_id(), None);
    assert!(c.output().ops.is_empty());

    c.select("lullaby");
    c.select("nonexistent-id");
    assert_eq!(c.active_track_id(), Some("lullaby"));
    assert_eq!(c.output().ops.len(), 1);
}

#[test]
fn stop_is_idempotent() {
    let mut c = controller();
    c.stop();
    assert_eq!(c.active_track_id(), None);
    assert!(c.output().ops.is_empty());

    c.select("sweet-lullaby");
    c.stop();
    let after_once = c.output().ops.clone();
    c.stop();

    assert_eq!(c.active_track_id(), None);
    assert_eq!(c.output().ops, after_once);
    assert_eq!(c.status(), &PlaybackStatus::Stopped);
}

#[test]
fn walkthrough_of_a_typical_evening() {
    let mut c = controller();

    c.select("midnight-beach");
    assert_eq!(c.active_track_id(), Some("midnight-beach"));

    c.select("calming-rain");
    assert_eq!(c.active_track_id(), Some("calming-rain"));
    assert!(c.output().ops.contains(&Op::Release { generation: 1 }));

    c.select("calming-rain");
    assert_eq!(c.active_track_id(), None);

    let ops_before = c.output().ops.len();
    c.stop();
    assert_eq!(c.active_track_id(), None);
    assert_eq!(c.output().ops.len(), ops_before);
}

#[test]
fn select_random_lands_on_a_catalog_entry_or_toggles_off() {
    let mut c = controller();
    let mut rng = rand::rng();
    for _ in 0..200 {
        let before = c.active_track_id().map(str::to_string);
        c.select_random_with(&mut rng);
        match c.active_track_id() {
            Some(id) => assert!(c.catalog().get(id).is_some()),
            None => assert!(before.is_some(), "toggle-off needs something active"),
        }
        assert_single_live(&c);
    }
}

#[test]
fn select_random_on_an_empty_catalog_is_a_no_op() {
    let mut c = PlaybackController::new(Catalog::default(), RecordingOutput::default(), 0.5);
    c.select_random();
    assert_eq!(c.active_track_id(), None);
    assert!(c.output().ops.is_empty());
}

#[test]
fn at_most_one_sound_is_live_across_random_sequences() {
    let ids = ["lullaby", "midnight-beach", "calming-rain", "sweet-lullaby", "bogus"];
    let mut rng = rand::rng();
    let mut c = controller();

    for _ in 0..2_000 {
        match [0, 1, 2].choose(&mut rng) {
            Some(0) => c.select(ids.choose(&mut rng).copied().unwrap_or("bogus")),
            Some(1) => c.stop(),
            _ => c.select_random(),
        }
        assert_single_live(&c);
    }
}

#[test]
fn started_event_for_the_current_handle_marks_playing() {
    let mut c = controller();
    c.select("lullaby");
    c.on_audio_event(AudioEvent::Started { generation: 1 });
    assert_eq!(c.status(), &PlaybackStatus::Playing);
}

#[test]
fn failed_start_is_reported_but_keeps_the_track_active() {
    let mut c = controller();
    c.select("lullaby");
    c.on_audio_event(AudioEvent::Failed {
        generation: 1,
        reason: "no audio output device".into(),
    });

    assert_eq!(c.active_track_id(), Some("lullaby"));
    assert_eq!(
        c.status(),
        &PlaybackStatus::Failed("no audio output device".into())
    );
}

#[test]
fn late_events_from_replaced_handles_are_ignored() {
    let mut c = controller();
    c.select("lullaby");
    c.select("calming-rain");

    c.on_audio_event(AudioEvent::Failed {
        generation: 1,
        reason: "too late".into(),
    });
    assert_eq!(c.status(), &PlaybackStatus::Starting);

    c.stop();
    c.on_audio_event(AudioEvent::Started { generation: 2 });
    assert_eq!(c.status(), &PlaybackStatus::Stopped);
    assert_eq!(c.active_track_id(), None);
}

#[test]
fn dropping_the_controller_releases_the_live_sound() {
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Shared(Rc<RefCell<Vec<u64>>>);

    impl PlaybackOutput for Shared {
        fn acquire(&mut self, _: &PlaybackHandle, _: &TrackDescriptor, _: f32) {}
        fn release(&mut self, handle: PlaybackHandle) {
            self.0.borrow_mut().push(handle.generation());
        }
    }

    let released = Rc::new(RefCell::new(Vec::new()));
    {
        let mut c = PlaybackController::new(catalog(), Shared(released.clone()), 0.5);
        c.select("sweet-lullaby");
    }
    assert_eq!(*released.borrow(), vec![1]);
}

#[test]
fn volume_is_clamped_into_range() {
    let mut c = PlaybackController::new(catalog(), RecordingOutput::default(), 3.0);
    c.select("lullaby");
    assert!(matches!(
        c.output().ops[0],
        Op::Acquire { volume, .. } if volume == 1.0
    ));
}
