use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_from_fields;
use super::model::Track;

/// Check whether `path` has one of the configured audio extensions
/// (case-insensitive, without dot).
pub fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Build a `Track` from a single audio file, reading tags where available.
///
/// Tag reading is best-effort: unreadable tags fall back to the file stem,
/// the file still becomes a track. Whether the file can actually be decoded
/// is the transport's call, made at load time.
fn read_track(path: &Path, settings: &LibrarySettings) -> Track {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration: Option<Duration> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    album = Some(v.to_string());
                }
            }
        }
    }

    let display = display_from_fields(
        path,
        &title,
        artist.as_deref(),
        album.as_deref(),
        &settings.display_fields,
        &settings.display_separator,
    );

    Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        duration,
        display,
    }
}

/// Expand `path` into playable tracks.
///
/// A single audio file yields one track regardless of its extension match;
/// a directory is walked according to `settings` and yields its audio files
/// sorted by display name. Non-audio files and anything unreadable are
/// skipped silently.
pub fn collect_tracks(path: &Path, settings: &LibrarySettings) -> Vec<Track> {
    if path.is_file() {
        return vec![read_track(path, settings)];
    }

    let mut walker = WalkDir::new(path).follow_links(settings.follow_links);
    if !settings.recursive {
        walker = walker.max_depth(1);
    } else if let Some(depth) = settings.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut tracks: Vec<Track> = Vec::new();
    for entry in walker.into_iter().filter_map(Result::ok) {
        let entry_path = entry.path();
        if !settings.include_hidden && is_hidden(entry_path) {
            continue;
        }
        if entry_path.is_file() && is_audio_file(entry_path, &settings.extensions) {
            tracks.push(read_track(entry_path, settings));
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    debug!(count = tracks.len(), path = %path.display(), "collected tracks");
    tracks
}
