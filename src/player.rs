//! The playlist-and-playback state machine.
//!
//! `PlaylistController` owns the ordered track list, the current index and
//! the cached playback state, and is the only writer of any of them. It is
//! generic over the [`Transport`](crate::transport::Transport) it drives
//! and the [`Notifier`](crate::notify::Notifier) it reports to, which is
//! also the seam the tests use.

mod controller;
mod edits;
mod types;

pub use controller::PlaylistController;
pub use types::PlaybackStatus;
