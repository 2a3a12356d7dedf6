use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::config::{LibrarySettings, TrackDisplayField};

#[test]
fn is_audio_file_matches_configured_extensions_case_insensitive() {
    let exts = vec!["mp3".to_string(), "ogg".to_string()];
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &exts));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &exts));
    assert!(is_audio_file(Path::new("/tmp/a.ogg"), &exts));
    assert!(!is_audio_file(Path::new("/tmp/a.flac"), &exts));
    assert!(!is_audio_file(Path::new("/tmp/a.txt"), &exts));
    assert!(!is_audio_file(Path::new("/tmp/a"), &exts));
}

#[test]
fn collect_tracks_filters_non_audio_and_sorts_by_display() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let tracks = collect_tracks(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "A");
    assert_eq!(tracks[1].title, "b");
}

#[test]
fn collect_tracks_accepts_a_single_file_path() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("song.mp3");
    fs::write(&file, b"not a real mp3").unwrap();

    let tracks = collect_tracks(&file, &LibrarySettings::default());
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "song");
    assert_eq!(tracks[0].path, file);
}

#[test]
fn collect_tracks_skips_hidden_files_when_configured() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let tracks = collect_tracks(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "visible");
}

#[test]
fn collect_tracks_honors_non_recursive_setting() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("top.mp3"), b"x").unwrap();
    fs::write(sub.join("nested.mp3"), b"x").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let tracks = collect_tracks(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "top");
}

#[test]
fn display_from_fields_can_format_artist_title() {
    let p = Path::new("/tmp/Song.mp3");
    assert_eq!(
        display_from_fields(
            p,
            "Song",
            Some("Artist"),
            None,
            &[TrackDisplayField::Artist, TrackDisplayField::Title],
            " - ",
        ),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(
            p,
            "Song",
            Some("  Artist  "),
            None,
            &[TrackDisplayField::Artist, TrackDisplayField::Title],
            " - ",
        ),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(
            p,
            "Song",
            None,
            None,
            &[TrackDisplayField::Artist, TrackDisplayField::Title],
            " - ",
        ),
        "Song"
    );
}

#[test]
fn display_from_fields_falls_back_to_title_when_no_parts() {
    let p = Path::new("/tmp/x.mp3");
    assert_eq!(
        display_from_fields(p, "Only Title", None, None, &[TrackDisplayField::Artist], " - "),
        "Only Title"
    );
}
