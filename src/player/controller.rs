use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::library::Track;
use crate::notify::{Notice, Notifier};
use crate::transport::{Transport, TransportEvent};

use super::edits;
use super::types::{PendingLoad, PlaybackStatus};

/// Owns the playlist, the current index, and the cached playback view, and
/// keeps them mutually consistent with the transport under edits,
/// asynchronous load outcomes, and end-of-track completions.
///
/// Invariant: `current` is `None` or a valid index into `tracks`, in every
/// reachable state.
pub struct PlaylistController<T: Transport, N: Notifier> {
    transport: T,
    notifier: N,

    tracks: Vec<Track>,
    current: Option<usize>,
    position: Duration,
    /// `Duration::ZERO` means "not reported yet".
    duration: Duration,
    playing: bool,
    /// The current track ran to its natural end with nothing after it.
    ended: bool,

    generation_counter: u64,
    /// Generation of the sink whose position/duration/completion events
    /// are accepted.
    live_generation: u64,
    pending: Option<PendingLoad>,
    load_timeout: Option<Duration>,
}

impl<T: Transport, N: Notifier> PlaylistController<T, N> {
    pub fn new(transport: T, notifier: N, load_timeout: Option<Duration>) -> Self {
        Self {
            transport,
            notifier,
            tracks: Vec::new(),
            current: None,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            playing: false,
            ended: false,
            generation_counter: 0,
            live_generation: 0,
            pending: None,
            load_timeout,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True while a track load is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn status(&self) -> PlaybackStatus {
        match (self.current, self.playing) {
            (None, _) => PlaybackStatus::Idle,
            (Some(_), true) => PlaybackStatus::Playing,
            (Some(_), false) => PlaybackStatus::Paused,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn next_generation(&mut self) -> u64 {
        self.generation_counter += 1;
        self.generation_counter
    }

    /// Append tracks at the end, preserving their order. Never touches the
    /// current index or playback.
    pub fn append(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        debug!(count = tracks.len(), "appending tracks");
        self.tracks.extend(tracks);
    }

    /// Remove the track at `index`.
    ///
    /// Removing the current track stops playback and clears the selection;
    /// removing below it shifts the current index down by one. A pending
    /// load's rollback index is reconciled by the same rules.
    pub fn remove(&mut self, index: usize) -> Result<Track> {
        let len = self.tracks.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }

        if self.current == Some(index) {
            self.transport.stop();
            self.playing = false;
            self.ended = false;
            self.position = Duration::ZERO;
            self.duration = Duration::ZERO;
            self.current = None;
            // Anything still in flight for this slot is now meaningless.
            self.pending = None;
            self.live_generation = self.next_generation();
        } else {
            self.current = edits::index_after_remove(self.current, index);
            if let Some(p) = self.pending.as_mut() {
                p.previous = edits::index_after_remove(p.previous, index);
            }
        }

        let track = self.tracks.remove(index);
        debug!(index, track = %track.display, "removed track");
        self.notifier.notify(Notice::track_removed(&track.display));
        Ok(track)
    }

    /// Move the track at `from` so it lands at index `to`.
    ///
    /// Remove-then-insert: `[A,B,C,D]` with `move_track(0, 3)` becomes
    /// `[B,C,D,A]`. The current index (and a pending load's rollback
    /// index) follow the edit so they keep naming the same tracks.
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tracks.len();
        if from >= len {
            return Err(Error::OutOfRange { index: from, len });
        }
        if to >= len {
            return Err(Error::OutOfRange { index: to, len });
        }
        if from == to {
            return Ok(());
        }

        edits::move_item(&mut self.tracks, from, to);
        self.current = edits::index_after_move(self.current, from, to);
        if let Some(p) = self.pending.as_mut() {
            p.previous = edits::index_after_move(p.previous, from, to);
        }
        Ok(())
    }

    /// Select and start playing the track at `index`.
    ///
    /// An out-of-range index is a silent no-op: taps racing a removal are
    /// normal UI behavior, not errors. At most one load is in flight; a
    /// newer call supersedes the older one, whose outcome is then stale.
    pub fn play_at(&mut self, index: usize) {
        if index >= self.tracks.len() {
            debug!(index, len = self.tracks.len(), "play_at past end, ignoring");
            return;
        }

        let generation = self.next_generation();
        let (previous, prev_position, prev_duration) = match self.pending.take() {
            // A superseded load never committed; its rollback target and
            // stashed view are still the ones to fall back to.
            Some(p) => (p.previous, p.prev_position, p.prev_duration),
            None => (self.current, self.position, self.duration),
        };

        self.current = Some(index);
        self.ended = false;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.pending = Some(PendingLoad {
            generation,
            previous,
            prev_position,
            prev_duration,
            started: Instant::now(),
        });

        let path = self.tracks[index].path.clone();
        debug!(index, generation, path = %path.display(), "loading track");
        self.transport.load(&path, generation);
    }

    /// Advance to the next track; no-op at the end of the playlist (no
    /// wraparound). With nothing selected, starts from the top.
    pub fn play_next(&mut self) {
        let next = match self.current {
            Some(current) => current + 1,
            None => 0,
        };
        if next < self.tracks.len() {
            self.play_at(next);
        }
    }

    /// Go back one track; no-op at the start of the playlist.
    pub fn play_previous(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        if current > 0 {
            self.play_at(current - 1);
        }
    }

    /// Resume the loaded track, replay an ended one, or start the playlist
    /// from the top when nothing is selected.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        if self.pending.is_some() {
            // The in-flight load starts playback when it commits.
            return;
        }
        if let Some(current) = self.current {
            if self.ended {
                // The sink drained at the end of the playlist; replaying
                // needs a fresh load.
                self.play_at(current);
            } else {
                self.transport.play();
                self.playing = true;
            }
        } else if !self.tracks.is_empty() {
            self.play_at(0);
        }
    }

    /// Pause playback. Idempotent.
    pub fn pause(&mut self) {
        if self.playing {
            self.transport.pause();
            self.playing = false;
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop playback and clear the selection.
    pub fn stop(&mut self) {
        self.transport.stop();
        self.playing = false;
        self.ended = false;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.current = None;
        self.pending = None;
        self.live_generation = self.next_generation();
    }

    /// Seek to an absolute position, clamped to `[0, duration]`.
    pub fn seek_to(&mut self, position: Duration) {
        if self.current.is_none() || self.pending.is_some() || self.ended {
            return;
        }
        let clamped = position.min(self.duration);
        if clamped != self.position {
            self.position = clamped;
            self.transport.seek(clamped);
        }
    }

    /// Seek relative to the current position, clamped to `[0, duration]`.
    ///
    /// While the duration is unknown the upper bound is the current
    /// position: rewinding works, skipping forward is a no-op.
    pub fn seek_by(&mut self, delta_secs: i64) {
        if self.current.is_none() || self.pending.is_some() || self.ended {
            return;
        }

        let delta = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs < 0 {
            self.position.saturating_sub(delta)
        } else {
            let upper = if self.duration.is_zero() {
                self.position
            } else {
                self.duration
            };
            (self.position + delta).min(upper)
        };

        if target != self.position {
            self.position = target;
            self.transport.seek(target);
        }
    }

    /// Apply one transport event. Events tagged with a generation other
    /// than the one expected are stale and ignored.
    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Loaded { generation, result } => {
                self.on_loaded(generation, result);
            }
            TransportEvent::Position {
                generation,
                position,
            } => {
                if self.pending.is_none() && generation == self.live_generation {
                    self.position = position;
                }
            }
            TransportEvent::Duration {
                generation,
                duration,
            } => {
                if self.pending.is_none()
                    && generation == self.live_generation
                    && !duration.is_zero()
                {
                    self.duration = duration;
                }
            }
            TransportEvent::Completed { generation } => {
                self.on_completed(generation);
            }
        }
    }

    /// Check the optional load timeout. Called periodically by the runtime
    /// loop; a load older than the limit is treated as failed, and its
    /// eventual real outcome becomes stale.
    pub fn poll(&mut self, now: Instant) {
        let Some(timeout) = self.load_timeout else {
            return;
        };
        let timed_out = self
            .pending
            .take_if(|p| now.duration_since(p.started) >= timeout);
        if let Some(p) = timed_out {
            warn!(generation = p.generation, "track load timed out");
            self.roll_back(p);
        }
    }

    /// Release the transport. Safe to call mid-load.
    pub fn shutdown(&mut self) {
        self.transport.stop();
        self.transport.shutdown();
    }

    fn on_loaded(&mut self, generation: u64, result: std::result::Result<Option<Duration>, Error>) {
        let Some(p) = self.pending.take_if(|p| p.generation == generation) else {
            debug!(generation, "ignoring stale load outcome");
            return;
        };

        match result {
            Ok(total) => {
                self.live_generation = generation;
                let tag_duration = self.current_track().and_then(|t| t.duration);
                self.duration = total.or(tag_duration).unwrap_or(Duration::ZERO);
                self.position = Duration::ZERO;
                self.transport.play();
                self.playing = true;
            }
            Err(err) => {
                warn!(%err, "track load failed");
                self.roll_back(p);
            }
        }
    }

    /// Revert to the last committed state after a failed load. The
    /// transport kept the previous source, so the rollback index still
    /// names a loaded track (or nothing was loaded and it is `None`).
    fn roll_back(&mut self, p: PendingLoad) {
        let display = self
            .current_track()
            .map(|t| t.display.clone())
            .unwrap_or_else(|| "track".to_string());
        self.notifier.notify(Notice::track_unplayable(&display));

        self.current = p.previous;
        self.position = p.prev_position;
        self.duration = p.prev_duration;
        // `playing` was never touched for this load; the previous sink's
        // state still holds.
    }

    fn on_completed(&mut self, generation: u64) {
        if self.pending.is_some() {
            // A user-issued load owns the next transition; the old sink
            // finishing must not redirect it.
            return;
        }
        if generation != self.live_generation {
            return;
        }
        let Some(current) = self.current else {
            return;
        };

        self.playing = false;
        let next = current + 1;
        if next < self.tracks.len() {
            // Auto-advance starts the next track playing.
            self.play_at(next);
        } else {
            // End of the playlist: keep the last track selected so the
            // user still sees what just ended.
            self.position = self.duration;
            self.ended = true;
            debug!("playlist ran out, idling at last track");
        }
    }
}
