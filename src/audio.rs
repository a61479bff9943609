//! rodio-backed sound output.
//!
//! A dedicated audio thread owns the output stream and at most one looping
//! `Sink`. `AudioPlayer` talks to it over a command channel and receives
//! start confirmations or failures on an event channel.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;
