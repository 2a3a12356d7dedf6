use std::path::PathBuf;
use std::time::Duration;

/// One playable audio file.
///
/// Identity is the path value; the same file may appear in a playlist more
/// than once, in which case positional index distinguishes the entries.
#[derive(Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Duration read from tags; the transport's own report wins once known.
    pub duration: Option<Duration>,
    pub display: String,
}
