//! Host collaborators for adding tracks: the file source and the
//! permission gate.
//!
//! Both are traits so the add-tracks flow can be exercised without a real
//! filesystem; the shipped implementations are plain-filesystem ones.

mod fs_source;
mod permission;

pub use fs_source::FsFileSource;
pub use permission::FsPermissionGate;

use std::path::Path;

use crate::error::Result;
use crate::library::Track;

/// Turns a user-chosen path into playable tracks.
///
/// An empty result means "nothing selected" (a cancellation), not an error.
pub trait FileSource {
    fn pick(&self, path: &Path) -> Vec<Track>;
}

/// Decides whether the host grants access to a path before the picker is
/// allowed to touch it.
pub trait PermissionGate {
    fn check(&self, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests;
