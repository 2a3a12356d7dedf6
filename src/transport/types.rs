//! Transport command/event types and the trait the controller drives.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::Error;

/// The single active audio transport, as seen by the controller.
///
/// Loading is asynchronous: `load` returns immediately and the outcome
/// arrives later as [`TransportEvent::Loaded`] tagged with `generation`.
/// All other commands act on whatever source is currently installed.
pub trait Transport {
    fn load(&mut self, path: &Path, generation: u64);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, position: Duration);
    fn is_playing(&self) -> bool;
    /// Release the underlying audio resources. Idempotent.
    fn shutdown(&mut self) {}
}

#[derive(Debug)]
pub enum TransportCmd {
    /// Install a new source. On failure the previous source is kept intact.
    Load { path: PathBuf, generation: u64 },
    /// Resume the current source.
    Play,
    /// Pause the current source.
    Pause,
    /// Drop the current source.
    Stop,
    /// Jump to an absolute position within the current source.
    Seek { position: Duration },
    /// Stop playback and exit the audio thread.
    Shutdown,
}

#[derive(Debug)]
pub enum TransportEvent {
    /// Outcome of a `Load`; `Ok` carries the decoder-reported total
    /// duration when the container knows it.
    Loaded {
        generation: u64,
        result: Result<Option<Duration>, Error>,
    },
    /// Periodic elapsed-time report for the current source.
    Position { generation: u64, position: Duration },
    /// Total duration of the current source, re-reported with each tick.
    Duration { generation: u64, duration: Duration },
    /// The current source reached its natural end. Fires once per load.
    Completed { generation: u64 },
}

/// Playback state mirrored out of the audio thread for synchronous reads.
#[derive(Debug, Default)]
pub struct TransportStatus {
    pub playing: bool,
}

pub type StatusHandle = Arc<Mutex<TransportStatus>>;
