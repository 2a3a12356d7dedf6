use std::time::Instant;

/// Playback status as derived from the controller state.
///
/// There is no "loaded but sourceless" state: a current track implies the
/// transport holds (or is in the middle of loading) that track's source.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// No track selected or loaded.
    Idle,
    Paused,
    Playing,
}

/// Bookkeeping for the single in-flight track load.
///
/// `previous` is the committed current index to fall back to if this load
/// fails; it is reconciled on playlist edits just like the current index.
/// The stashed position/duration restore the pre-load view on rollback.
pub(super) struct PendingLoad {
    pub generation: u64,
    pub previous: Option<usize>,
    pub prev_position: std::time::Duration,
    pub prev_duration: std::time::Duration,
    pub started: Instant,
}
