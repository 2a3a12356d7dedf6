use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Set up file-backed logging when `QUAVER_LOG` is set.
///
/// The terminal belongs to the TUI, so log lines go to
/// `$XDG_STATE_HOME/quaver/quaver.log` (or `~/.local/state/quaver/`).
pub fn init() {
    let Ok(filter) = EnvFilter::try_from_env("QUAVER_LOG") else {
        return;
    };
    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("state")
    } else {
        return None;
    };
    Some(state_home.join("quaver").join("quaver.log"))
}
