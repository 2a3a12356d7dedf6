use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

use super::PermissionGate;

/// Permission gate backed by ordinary filesystem access checks.
///
/// Only an actual `PermissionDenied` from the OS counts as denial; a
/// missing path is left for the picker, which treats it as an empty pick.
pub struct FsPermissionGate;

fn denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

impl PermissionGate for FsPermissionGate {
    fn check(&self, path: &Path) -> Result<()> {
        let deny = || Error::PermissionDenied {
            path: path.to_path_buf(),
        };

        match fs::metadata(path) {
            Ok(meta) => {
                if meta.is_dir() {
                    if let Err(e) = fs::read_dir(path) {
                        if denied(&e) {
                            return Err(deny());
                        }
                    }
                } else if let Err(e) = fs::File::open(path) {
                    if denied(&e) {
                        return Err(deny());
                    }
                }
                Ok(())
            }
            Err(e) if denied(&e) => Err(deny()),
            Err(_) => Ok(()),
        }
    }
}
