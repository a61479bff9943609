//! Opening sound files as endless `rodio` sources and wiring them to a `Sink`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::Repeat;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

pub(super) type LoopingSource = Repeat<Decoder<BufReader<File>>>;

/// Open and decode `path`, repeating it indefinitely.
pub(super) fn open_looping_source(path: &Path) -> Result<LoopingSource, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(decoder.repeat_infinite())
}

/// Create a playing `Sink` on `stream` that loops `path` at `volume`.
pub(super) fn create_looping_sink(
    stream: &OutputStream,
    path: &Path,
    volume: f32,
) -> Result<Sink, AudioError> {
    let source = open_looping_source(path)?;

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.set_volume(volume);
    sink.append(source);
    sink.play();
    Ok(sink)
}
