//! MPRIS D-Bus surface: lets media keys and `playerctl` drive the player.
//!
//! The service thread mirrors controller state out of `SharedState` and
//! feeds remote commands back through the same `ControlCmd` channel the
//! keyboard uses, so every command is serialized onto the runtime loop.

use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};

use async_io::{Timer, block_on};
use tracing::warn;
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::library::Track;
use crate::player::PlaybackStatus;

#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    /// Relative seek, in microseconds (MPRIS `Seek` semantics).
    SeekBy(i64),
}

#[derive(Debug)]
struct SharedState {
    playback: PlaybackStatus,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            playback: PlaybackStatus::Idle,
            title: None,
            artist: Vec::new(),
            album: None,
            url: None,
            length_micros: None,
            track_id: None,
        }
    }
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackStatus) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
        let _ = self.notify.send(());
    }

    pub fn set_track_metadata(&self, index: Option<usize>, track: Option<&Track>) {
        if let Ok(mut s) = self.state.lock() {
            match (index, track) {
                (Some(i), Some(t)) => {
                    s.title = Some(t.title.clone());
                    s.artist = t.artist.iter().cloned().collect();
                    s.album = t.album.clone();
                    s.url = Some(format!("file://{}", t.path.display()));
                    s.length_micros = t.duration.map(|d| d.as_micros() as i64);
                    s.track_id = ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{i}"))
                        .ok()
                        .map(|p| p.into());
                }
                _ => {
                    s.title = None;
                    s.artist = Vec::new();
                    s.album = None;
                    s.url = None;
                    s.length_micros = None;
                    s.track_id = None;
                }
            }
        }
        let _ = self.notify.send(());
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "quaver"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    fn seek(&self, offset: i64) {
        let _ = self.tx.send(ControlCmd::SeekBy(offset));
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        // NOTE: This returns a &'static str; we map state into static strings.
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackStatus::Idle => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        fn insert(map: &mut HashMap<String, OwnedValue>, key: &str, value: Value<'_>) {
            if let Ok(v) = OwnedValue::try_from(value) {
                map.insert(key.to_string(), v);
            }
        }

        if let Some(p) = &s.track_id {
            insert(&mut map, "mpris:trackid", Value::from(p.clone().into_inner()));
        }
        if let Some(title) = &s.title {
            insert(&mut map, "xesam:title", Value::from(title.clone()));
        }
        if !s.artist.is_empty() {
            insert(&mut map, "xesam:artist", Value::from(s.artist.clone()));
        }
        if let Some(album) = &s.album {
            insert(&mut map, "xesam:album", Value::from(album.clone()));
        }
        if let Some(url) = &s.url {
            insert(&mut map, "xesam:url", Value::from(url.clone()));
        }
        if let Some(length) = s.length_micros {
            insert(&mut map, "mpris:length", Value::from(length));
        }

        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.quaver")
                .await
            {
                warn!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!("MPRIS: failed to register player iface: {e}");
                return;
            }

            // Re-emit property-changed signals when the app updates the
            // mirrored state.
            loop {
                Timer::after(std::time::Duration::from_millis(250)).await;

                let mut changed = false;
                while notify_rx.try_recv().is_ok() {
                    changed = true;
                }
                if !changed {
                    continue;
                }

                if let Ok(iface_ref) = object_server.interface::<_, PlayerIface>(path).await {
                    let iface = iface_ref.get().await;
                    let _ = iface
                        .playback_status_changed(iface_ref.signal_emitter())
                        .await;
                    let _ = iface.metadata_changed(iface_ref.signal_emitter()).await;
                }
            }
        });
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}
