use std::path::{Path, PathBuf};
use std::sync::mpsc;

use rodio::{OutputStream, Sink};

use super::sink::open_looping_source;
use super::thread::{Current, handle_cmd};
use super::types::{AudioCmd, AudioError, AudioEvent};

/// Minimal 16-bit mono PCM WAV with `samples` frames of a square-ish wave.
fn tiny_wav(samples: u32) -> Vec<u8> {
    let data_len = samples * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&8000u32.to_le_bytes());
    out.extend_from_slice(&16000u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for i in 0..samples {
        let v: i16 = if i % 20 < 10 { 4000 } else { -4000 };
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

#[test]
fn missing_file_is_an_open_error() {
    let err = open_looping_source(Path::new("/definitely/not/here.mp3"))
        .err()
        .expect("opening a missing file should fail");
    assert!(matches!(err, AudioError::Open { .. }));
    assert!(err.to_string().contains("/definitely/not/here.mp3"));
}

#[test]
fn garbage_file_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.mp3");
    std::fs::write(&path, b"this is not audio at all").unwrap();

    let err = open_looping_source(&path)
        .err()
        .expect("decoding garbage should fail");
    assert!(matches!(err, AudioError::Decode { .. }));
}

#[test]
fn decoded_source_keeps_looping_past_the_end_of_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blip.wav");
    std::fs::write(&path, tiny_wav(100)).unwrap();

    let source = open_looping_source(&path).unwrap();
    assert_eq!(source.take(1_000).count(), 1_000);
}

#[test]
fn audio_event_reports_its_generation() {
    assert_eq!(AudioEvent::Started { generation: 3 }.generation(), 3);
    let failed = AudioEvent::Failed {
        generation: 9,
        reason: "nope".into(),
    };
    assert_eq!(failed.generation(), 9);
}

fn idle(generation: u64) -> Current {
    let (sink, _queue) = Sink::new();
    Current { generation, sink }
}

fn no_device() -> Result<OutputStream, String> {
    Err("no default output device".to_string())
}

#[test]
fn start_without_a_device_fails_and_drops_the_previous_sound() {
    let (tx, rx) = mpsc::channel();
    let mut current = Some(idle(1));

    let keep_going = handle_cmd(
        &mut current,
        &no_device(),
        AudioCmd::Start {
            generation: 2,
            asset: PathBuf::from("/s/rain.mp3"),
            volume: 0.5,
        },
        &tx,
    );

    assert!(keep_going);
    assert!(current.is_none());
    match rx.try_recv().unwrap() {
        AudioEvent::Failed { generation, reason } => {
            assert_eq!(generation, 2);
            assert!(reason.contains("no default output device"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn release_only_stops_the_matching_generation() {
    let (tx, rx) = mpsc::channel();
    let mut current = Some(idle(2));

    assert!(handle_cmd(
        &mut current,
        &no_device(),
        AudioCmd::Release { generation: 1 },
        &tx,
    ));
    assert_eq!(current.as_ref().map(|c| c.generation), Some(2));

    assert!(handle_cmd(
        &mut current,
        &no_device(),
        AudioCmd::Release { generation: 2 },
        &tx,
    ));
    assert!(current.is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn quit_clears_the_current_sound_and_ends_the_loop() {
    let (tx, _rx) = mpsc::channel();
    let mut current = Some(idle(4));

    assert!(!handle_cmd(
        &mut current,
        &no_device(),
        AudioCmd::Quit { fade_out_ms: 0 },
        &tx,
    ));
    assert!(current.is_none());
}
