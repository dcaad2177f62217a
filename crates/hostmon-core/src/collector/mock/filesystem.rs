//! In-memory mock filesystem.
//!
//! `MockFs` stores files and directories in hash maps so tests can describe a
//! `/proc` layout as plain strings, including broken layouts (missing files,
//! truncated counters) that are hard to reproduce on a live host.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file. Parent directories are created implicitly.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory and its parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Adds one `/proc/<pid>` directory per PID under `proc_root`.
    pub fn add_pids(&mut self, proc_root: impl AsRef<Path>, pids: &[u32]) {
        let root = proc_root.as_ref();
        for pid in pids {
            self.add_dir(root.join(pid.to_string()));
        }
    }

    /// Removes a file or a directory together with everything beneath it.
    pub fn remove(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.files.retain(|p, _| !p.starts_with(path));
        self.directories.retain(|p| !p.starts_with(path));
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let is_child = |p: &PathBuf| p.parent().is_some_and(|parent| parent == path);

        let entries: HashSet<PathBuf> = self
            .files
            .keys()
            .chain(self.directories.iter())
            .filter(|p| is_child(p) && p.as_path() != path)
            .cloned()
            .collect();

        Ok(entries.into_iter().collect())
    }
}
