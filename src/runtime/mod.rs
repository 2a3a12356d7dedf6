use std::env;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::App;
use crate::mpris::ControlCmd;
use crate::notify::{Notice, NoticeLog, Notifier};
use crate::picker::{FileSource, FsFileSource, FsPermissionGate, PermissionGate};
use crate::player::PlaylistController;
use crate::transport::{RodioTransport, Transport};

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init();

    let (transport, transport_events) = RodioTransport::spawn(&settings.audio);
    let load_timeout = (settings.audio.load_timeout_ms > 0)
        .then(|| Duration::from_millis(settings.audio.load_timeout_ms));
    let mut player = PlaylistController::new(transport, NoticeLog::new(), load_timeout);

    let gate = FsPermissionGate;
    let source = FsFileSource::new(settings.library.clone());

    // Seed the playlist from CLI arguments (paths to files or directories).
    for arg in env::args().skip(1) {
        add_tracks(Path::new(&arg), &gate, &source, &mut player);
    }

    let mut app = App::new();
    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());
    mpris_sync::update_mpris(&mpris, &player);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &transport_events,
        &mpris,
        &control_tx,
        &control_rx,
        &gate,
        &source,
    );

    // Release the audio thread deterministically, even if the loop errored
    // or a load was still in flight.
    player.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

/// Gate, pick, append: the add-tracks flow shared by CLI seeding and the
/// in-app prompt. Denied paths produce a notice and never reach the picker;
/// an empty pick is a cancellation and does nothing.
pub(crate) fn add_tracks<T: Transport>(
    path: &Path,
    gate: &dyn PermissionGate,
    source: &dyn FileSource,
    player: &mut PlaylistController<T, NoticeLog>,
) {
    if let Err(err) = gate.check(path) {
        warn!(%err, "refusing to open picker");
        player.notifier_mut().notify(Notice::permission_denied(path));
        return;
    }
    let tracks = source.pick(path);
    if tracks.is_empty() {
        return;
    }
    player.append(tracks);
}
