//! The playback controller: the single owner of "what is playing".
//!
//! All transitions go through `select`, `stop` and `select_random`. At most
//! one sound is ever live: a new one is only acquired after the previous
//! handle has been released.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
