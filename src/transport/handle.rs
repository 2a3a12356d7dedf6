use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::thread::spawn_transport_thread;
use super::types::{StatusHandle, Transport, TransportCmd, TransportEvent, TransportStatus};

/// Handle to the rodio audio thread.
///
/// Owns the command channel and the join handle; dropping the handle after
/// `shutdown` leaves no audio resources behind.
pub struct RodioTransport {
    tx: Sender<TransportCmd>,
    status: StatusHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioTransport {
    /// Spawn the audio thread and return the handle plus the event stream
    /// the runtime loop drains into the controller.
    pub fn spawn(settings: &AudioSettings) -> (Self, Receiver<TransportEvent>) {
        let (tx, rx) = mpsc::channel::<TransportCmd>();
        let (event_tx, event_rx) = mpsc::channel::<TransportEvent>();
        let status: StatusHandle = Arc::new(Mutex::new(TransportStatus::default()));

        let join = spawn_transport_thread(
            rx,
            event_tx,
            status.clone(),
            Duration::from_millis(settings.position_tick_ms),
        );

        (
            Self {
                tx,
                status,
                join: Mutex::new(Some(join)),
            },
            event_rx,
        )
    }

    fn send(&self, cmd: TransportCmd) {
        // The audio thread only dies on shutdown; a failed send past that
        // point is harmless.
        let _ = self.tx.send(cmd);
    }
}

impl Transport for RodioTransport {
    fn load(&mut self, path: &Path, generation: u64) {
        self.send(TransportCmd::Load {
            path: path.to_path_buf(),
            generation,
        });
    }

    fn play(&mut self) {
        self.send(TransportCmd::Play);
    }

    fn pause(&mut self) {
        self.send(TransportCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(TransportCmd::Stop);
    }

    fn seek(&mut self, position: Duration) {
        self.send(TransportCmd::Seek { position });
    }

    fn is_playing(&self) -> bool {
        self.status.lock().map(|s| s.playing).unwrap_or(false)
    }

    fn shutdown(&mut self) {
        self.send(TransportCmd::Shutdown);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
