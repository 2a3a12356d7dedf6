use std::path::Path;

use crate::config::LibrarySettings;
use crate::library::{collect_tracks, Track};

use super::FileSource;

/// Filesystem-backed file source: expands a file or directory path into
/// audio tracks according to the library settings.
pub struct FsFileSource {
    settings: LibrarySettings,
}

impl FsFileSource {
    pub fn new(settings: LibrarySettings) -> Self {
        Self { settings }
    }
}

impl FileSource for FsFileSource {
    fn pick(&self, path: &Path) -> Vec<Track> {
        if !path.exists() {
            return Vec::new();
        }
        collect_tracks(path, &self.settings)
    }
}
