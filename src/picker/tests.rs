use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::config::LibrarySettings;

#[test]
fn pick_expands_a_directory_into_sorted_tracks() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("zz.mp3"), b"x").unwrap();
    fs::write(dir.path().join("aa.ogg"), b"x").unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let source = FsFileSource::new(LibrarySettings::default());
    let tracks = source.pick(dir.path());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "aa");
    assert_eq!(tracks[1].title, "zz");
}

#[test]
fn pick_of_missing_path_is_a_cancellation() {
    let source = FsFileSource::new(LibrarySettings::default());
    let tracks = source.pick(Path::new("/does/not/exist"));
    assert!(tracks.is_empty());
}

#[test]
fn pick_of_single_file_yields_one_track() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("one.mp3");
    fs::write(&file, b"x").unwrap();

    let source = FsFileSource::new(LibrarySettings::default());
    let tracks = source.pick(&file);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].path, file);
}

#[test]
fn gate_grants_readable_paths() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("ok.mp3");
    fs::write(&file, b"x").unwrap();

    let gate = FsPermissionGate;
    assert!(gate.check(dir.path()).is_ok());
    assert!(gate.check(&file).is_ok());
}

#[test]
fn gate_passes_missing_paths_through_to_the_picker() {
    let gate = FsPermissionGate;
    assert!(gate.check(Path::new("/does/not/exist")).is_ok());
}
