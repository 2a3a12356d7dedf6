//! Error taxonomy for quaver.
//!
//! A single [`Error`] type covers the ways playlist edits and audio loads
//! can fail, plus a [`Result`] alias. No failure is fatal: the runtime
//! recovers from load and permission errors and reports them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the player, transport, and file picker.
#[derive(Debug, Error)]
pub enum Error {
    /// An index addressed a track outside the playlist bounds.
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// The audio file could not be opened.
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The audio file opened but could not be decoded.
    #[error("failed to decode {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// The OS denied access to the requested path.
    #[error("permission denied for {path}")]
    PermissionDenied { path: PathBuf },
}

/// Convenience alias for fallible quaver operations.
pub type Result<T> = std::result::Result<T, Error>;
