//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph},
};
use std::time::{Duration, Instant};

use crate::app::{App, InputMode};
use crate::config::{ControlsSettings, TimeField, TrackDisplayField, UiSettings};
use crate::library::Track;
use crate::notify::{NoticeLevel, NoticeLog};
use crate::player::{PlaybackStatus, PlaylistController};
use crate::transport::Transport;

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{}s", seek_seconds),
        "[J/K] move down/up".to_string(),
        "[d] remove".to_string(),
        "[a] add tracks".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the "now playing" track text according to `ui` settings.
fn now_playing_track_text(track: &Track, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_track_fields {
        match f {
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.clone());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = track
                    .artist
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = track
                    .album
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = track.path.file_stem().and_then(|s| s.to_str()) {
                    parts.push(stem.to_string());
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.path.display().to_string());
            }
        }
    }

    if parts.is_empty() {
        track.display.clone()
    } else {
        parts.join(&ui.now_playing_track_separator)
    }
}

/// Build the elapsed/total/remaining time text according to `ui` settings.
fn now_playing_time_text(position: Duration, duration: Duration, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(position)),
            TimeField::Total => {
                if !duration.is_zero() {
                    parts.push(format_mmss(duration));
                }
            }
            TimeField::Remaining => {
                if !duration.is_zero() {
                    parts.push(format!("-{}", format_mmss(duration.saturating_sub(position))));
                }
            }
        }
    }

    parts.join(&ui.now_playing_time_separator)
}

/// Compute a centered popup rect within `area`.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the whole frame: header, playlist, now-playing pane, controls.
pub fn draw<T: Transport>(
    f: &mut Frame,
    app: &App,
    player: &PlaylistController<T, NoticeLog>,
    ui: &UiSettings,
    controls: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(ui.header_text.clone())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_playlist(f, chunks[1], app, player);
    draw_now_playing(f, chunks[2], player, ui);

    let footer = Paragraph::new(controls_text(controls.seek_seconds))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[3]);

    if let InputMode::AddPath(buf) = &app.mode {
        draw_add_prompt(f, buf);
    }
}

fn draw_playlist<T: Transport>(
    f: &mut Frame,
    area: Rect,
    app: &App,
    player: &PlaylistController<T, NoticeLog>,
) {
    let current = player.current_index();
    let items: Vec<ListItem> = player
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if Some(i) == current {
                if player.is_loading() { "… " } else { "▸ " }
            } else {
                "  "
            };
            let mut item = ListItem::new(format!("{marker}{}", track.display));
            if Some(i) == current {
                item = item.style(Style::default().add_modifier(Modifier::BOLD));
            }
            item
        })
        .collect();

    let title = format!(" Playlist ({}) ", player.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().reversed());

    let mut state = ListState::default();
    if !player.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_now_playing<T: Transport>(
    f: &mut Frame,
    area: Rect,
    player: &PlaylistController<T, NoticeLog>,
    ui: &UiSettings,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .title(" Now playing ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let song_line = match (player.status(), player.current_track()) {
        (PlaybackStatus::Idle, _) | (_, None) => "Nothing playing".to_string(),
        (status, Some(track)) => {
            let icon = match status {
                PlaybackStatus::Playing => "▶",
                PlaybackStatus::Paused => "⏸",
                PlaybackStatus::Idle => "■",
            };
            let state = if player.is_loading() { "loading" } else { "" };
            if state.is_empty() {
                format!("{icon} {}", now_playing_track_text(track, ui))
            } else {
                format!("{icon} {} ({state})", now_playing_track_text(track, ui))
            }
        }
    };
    f.render_widget(Paragraph::new(song_line), rows[0]);

    let position = player.position();
    let duration = player.duration();
    let label = now_playing_time_text(position, duration, ui);
    let ratio = if duration.is_zero() {
        0.0
    } else {
        (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    };
    let gauge = Gauge::default().ratio(ratio).label(label);
    f.render_widget(gauge, rows[1]);

    let ttl = Duration::from_millis(ui.notice_ttl_ms);
    if let Some(notice) = player.notifier().latest_within(ttl, Instant::now()) {
        let style = match notice.level {
            NoticeLevel::Info => Style::default().add_modifier(Modifier::ITALIC),
            NoticeLevel::Warn => Style::default().add_modifier(Modifier::BOLD),
        };
        f.render_widget(
            Paragraph::new(notice.text.clone()).style(style),
            rows[2],
        );
    }
}

fn draw_add_prompt(f: &mut Frame, buf: &str) {
    let area = popup_area(f.area(), 60, 3);
    f.render_widget(Clear, area);
    let prompt = Paragraph::new(format!("> {buf}")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Add tracks (path, Enter to confirm, Esc to cancel) "),
    );
    f.render_widget(prompt, area);
}
