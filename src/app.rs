//! Application module: presentation state for the TUI.
//!
//! Playback state lives in the controller; `App` only tracks which row
//! the cursor is on.

mod model;

pub use model::*;
