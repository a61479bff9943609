//! The sound catalog: the fixed, ordered set of tracks a user can pick from.
//!
//! The catalog is built once at startup from `[catalog]` settings and is
//! read-only afterwards.

mod build;
mod model;

pub use build::from_settings;
pub use model::*;
