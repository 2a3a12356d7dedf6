use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::App;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::notify::NoticeLog;
use crate::picker::{FileSource, PermissionGate};
use crate::player::{PlaybackStatus, PlaylistController};
use crate::runtime::add_tracks;
use crate::runtime::mpris_sync::update_mpris;
use crate::transport::{Transport, TransportEvent};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
    /// Last-known current index as emitted to MPRIS.
    last_mpris_index: Option<usize>,
    /// Last-known playback status as emitted to MPRIS.
    last_mpris_status: PlaybackStatus,
}

/// Main terminal event loop.
///
/// Everything that can mutate the controller goes through this single
/// loop: transport events are drained first, then remote control commands,
/// then keyboard input. That ordering is what serializes asynchronous load
/// outcomes against user edits. Returns `Ok(())` on shutdown request.
#[allow(clippy::too_many_arguments)]
pub fn run<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlaylistController<T, NoticeLog>,
    transport_events: &Receiver<TransportEvent>,
    mpris: &MprisHandle,
    control_tx: &Sender<ControlCmd>,
    control_rx: &Receiver<ControlCmd>,
    gate: &dyn PermissionGate,
    source: &dyn FileSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState {
        pending_gg: false,
        last_mpris_index: None,
        last_mpris_status: player.status(),
    };

    loop {
        // Apply everything the audio thread reported since the last pass.
        while let Ok(ev) = transport_events.try_recv() {
            player.handle_event(ev);
        }
        player.poll(Instant::now());

        // Playlist edits and auto-advance may have shrunk or shifted the
        // list under the cursor.
        app.clamp_cursor(player.len());

        // Keep MPRIS in sync even when changes come from auto-advance or
        // media keys rather than the keyboard.
        if player.current_index() != state.last_mpris_index
            || player.status() != state.last_mpris_status
        {
            update_mpris(mpris, player);
            state.last_mpris_index = player.current_index();
            state.last_mpris_status = player.status();
        }

        terminal.draw(|f| ui::draw(f, app, player, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(
                    key, settings, app, player, control_tx, gate, source, &mut state,
                ) {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one remote control command. Returns `true` on quit.
fn handle_control_cmd<T: Transport>(
    cmd: ControlCmd,
    player: &mut PlaylistController<T, NoticeLog>,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => player.play(),
        ControlCmd::Pause => player.pause(),
        ControlCmd::PlayPause => player.toggle_play_pause(),
        ControlCmd::Stop => player.stop(),
        ControlCmd::Next => player.play_next(),
        ControlCmd::Prev => player.play_previous(),
        ControlCmd::SeekBy(offset_micros) => {
            player.seek_by(offset_micros / 1_000_000);
        }
    }
    false
}

/// Apply one keyboard event. Returns `true` on quit.
#[allow(clippy::too_many_arguments)]
fn handle_key_event<T: Transport>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlaylistController<T, NoticeLog>,
    control_tx: &Sender<ControlCmd>,
    gate: &dyn PermissionGate,
    source: &dyn FileSource,
    state: &mut EventLoopState,
) -> bool {
    if app.is_adding() {
        match key.code {
            KeyCode::Esc => app.cancel_add_mode(),
            KeyCode::Backspace => app.pop_input_char(),
            KeyCode::Enter => {
                if let Some(path) = app.take_input() {
                    add_tracks(std::path::Path::new(&path), gate, source, player);
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_input_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.cursor_down(player.len());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.cursor_up();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.cursor_bottom(player.len());
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            // Out-of-range is the controller's call: a tap racing a
            // removal is normal, not an error.
            player.play_at(app.selected);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            // Behave like MPRIS PlayPause.
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let secs = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
            player.seek_by(secs);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let secs = settings.controls.seek_seconds.min(i64::MAX as u64) as i64;
            player.seek_by(-secs);
        }
        KeyCode::Char('d') => {
            state.pending_gg = false;
            if app.selected < player.len() {
                match player.remove(app.selected) {
                    Ok(_) => app.clamp_cursor(player.len()),
                    Err(err) => warn!(%err, "remove failed"),
                }
            }
        }
        KeyCode::Char('J') => {
            state.pending_gg = false;
            if app.selected + 1 < player.len() {
                match player.move_track(app.selected, app.selected + 1) {
                    Ok(()) => app.selected += 1,
                    Err(err) => warn!(%err, "move failed"),
                }
            }
        }
        KeyCode::Char('K') => {
            state.pending_gg = false;
            if app.selected > 0 && app.selected < player.len() {
                match player.move_track(app.selected, app.selected - 1) {
                    Ok(()) => app.selected -= 1,
                    Err(err) => warn!(%err, "move failed"),
                }
            }
        }
        KeyCode::Char('a') => {
            state.pending_gg = false;
            app.enter_add_mode();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char.
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
