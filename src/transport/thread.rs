use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::sink::create_sink_at;
use super::types::{StatusHandle, TransportCmd, TransportEvent};

/// Mutable state of the audio thread: at most one installed source.
struct Deck {
    sink: Option<Sink>,
    /// Generation of the load that produced `sink`.
    generation: u64,
    /// Path backing `sink`; needed to rebuild it on seek.
    path: Option<PathBuf>,
    total: Option<Duration>,
    paused: bool,
    // Wall-clock elapsed tracking: accumulated time while paused plus the
    // time since the last resume.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Deck {
    fn elapsed(&self) -> Duration {
        let running = self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        let elapsed = self.accumulated + running;
        match self.total {
            Some(total) => elapsed.min(total),
            None => elapsed,
        }
    }

    fn clear(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.path = None;
        self.total = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }
}

fn set_playing(status: &StatusHandle, playing: bool) {
    if let Ok(mut s) = status.lock() {
        s.playing = playing;
    }
}

pub(super) fn spawn_transport_thread(
    rx: Receiver<TransportCmd>,
    events: Sender<TransportEvent>,
    status: StatusHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut deck = Deck {
            sink: None,
            generation: 0,
            path: None,
            total: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(TransportCmd::Load { path, generation }) => {
                    match create_sink_at(&stream, &path, Duration::ZERO) {
                        Ok((sink, total)) => {
                            deck.clear();
                            deck.sink = Some(sink);
                            deck.generation = generation;
                            deck.path = Some(path);
                            deck.total = total;
                            set_playing(&status, false);
                            let _ = events.send(TransportEvent::Loaded {
                                generation,
                                result: Ok(total),
                            });
                        }
                        Err(err) => {
                            // The previous source stays installed and keeps
                            // playing; the controller decides what to show.
                            warn!(%err, "load failed");
                            let _ = events.send(TransportEvent::Loaded {
                                generation,
                                result: Err(err),
                            });
                        }
                    }
                }

                Ok(TransportCmd::Play) => {
                    if let Some(s) = deck.sink.as_ref() {
                        if deck.paused {
                            s.play();
                            deck.paused = false;
                            deck.started_at = Some(Instant::now());
                            set_playing(&status, true);
                        }
                    }
                }

                Ok(TransportCmd::Pause) => {
                    if let Some(s) = deck.sink.as_ref() {
                        if !deck.paused {
                            s.pause();
                            if let Some(st) = deck.started_at.take() {
                                deck.accumulated += st.elapsed();
                            }
                            deck.paused = true;
                            set_playing(&status, false);
                        }
                    }
                }

                Ok(TransportCmd::Stop) => {
                    deck.clear();
                    set_playing(&status, false);
                }

                Ok(TransportCmd::Seek { position }) => {
                    let Some(path) = deck.path.clone() else {
                        continue;
                    };
                    if deck.sink.is_none() {
                        continue;
                    }

                    // Scrubbing: rebuild the sink and skip into the file.
                    match create_sink_at(&stream, &path, position) {
                        Ok((sink, total)) => {
                            if let Some(old) = deck.sink.take() {
                                old.stop();
                            }
                            if deck.paused {
                                deck.started_at = None;
                            } else {
                                sink.play();
                                deck.started_at = Some(Instant::now());
                            }
                            deck.sink = Some(sink);
                            deck.total = total.or(deck.total);
                            deck.accumulated = position;
                            let _ = events.send(TransportEvent::Position {
                                generation: deck.generation,
                                position,
                            });
                        }
                        Err(err) => {
                            // File may have vanished since load; keep playing
                            // from the old position.
                            warn!(%err, "seek rebuild failed");
                        }
                    }
                }

                Ok(TransportCmd::Shutdown) => {
                    deck.clear();
                    set_playing(&status, false);
                    debug!("transport thread shutting down");
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    let Some(s) = deck.sink.as_ref() else {
                        continue;
                    };
                    if deck.paused {
                        continue;
                    }

                    let elapsed = deck.elapsed();
                    let _ = events.send(TransportEvent::Position {
                        generation: deck.generation,
                        position: elapsed,
                    });
                    if let Some(total) = deck.total {
                        let _ = events.send(TransportEvent::Duration {
                            generation: deck.generation,
                            duration: total,
                        });
                    }

                    // Natural end-of-track: the sink drained. Report it once
                    // and drop the sink so it cannot fire again.
                    if s.empty() {
                        let generation = deck.generation;
                        deck.clear();
                        set_playing(&status, false);
                        let _ = events.send(TransportEvent::Completed { generation });
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
