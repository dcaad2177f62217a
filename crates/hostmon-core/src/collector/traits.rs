//! Filesystem capability used by every metric source.
//!
//! Sources never touch `std::fs` directly. Production code passes `RealFs`,
//! tests pass `MockFs` with a canned `/proc` layout.

use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of the filesystem that metric sources depend on.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the direct children of a directory as full paths.
    ///
    /// Entries that vanish while the listing is in progress (a process
    /// exiting under `/proc`) may or may not be included.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Filesystem backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(path)? {
            // A PID directory disappearing mid-scan is not an error for the listing.
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(paths)
    }
}
