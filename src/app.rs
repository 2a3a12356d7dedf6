//! Application module: exposes the UI-side model used by the TUI runtime.
//!
//! Playback and playlist state live in the controller; `App` only holds
//! what the terminal needs on top of that (cursor, input prompt).

mod model;

pub use model::*;
