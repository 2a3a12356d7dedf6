//! User-visible notices.
//!
//! The player never crashes on a recoverable failure; it tells the user
//! instead. Notices are produced by the controller and the add-tracks flow
//! and rendered in the status area until they expire.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn track_removed(display: &str) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: format!("Removed: {display}"),
        }
    }

    pub fn track_unplayable(display: &str) -> Self {
        Self {
            level: NoticeLevel::Warn,
            text: format!("Can't play: {display}"),
        }
    }

    pub fn permission_denied(path: &std::path::Path) -> Self {
        Self {
            level: NoticeLevel::Warn,
            text: format!("Permission denied: {}", path.display()),
        }
    }
}

/// Sink for user-visible notices.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// A bounded log of recent notices with their arrival times.
pub struct NoticeLog {
    entries: VecDeque<(Instant, Notice)>,
    cap: usize,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            cap: 32,
        }
    }

    /// The most recent notice, if it is younger than `ttl`.
    pub fn latest_within(&self, ttl: Duration, now: Instant) -> Option<&Notice> {
        self.entries
            .back()
            .filter(|(at, _)| now.duration_since(*at) <= ttl)
            .map(|(_, n)| n)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter().map(|(_, n)| n)
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back((Instant::now(), notice));
    }
}
