// file access behind a trait so tests can swap in an in-memory tree

use camino::Utf8Path;
use std::io;

/// Read-only file access used by the merge engine. The orchestrator receives
/// this explicitly instead of reaching for a process-wide filesystem handle.
pub trait FileAccess {
    fn exists(&self, path: &Utf8Path) -> bool;
    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl FileAccess for OsFs {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    fn read_to_string(&self, path: &Utf8Path) -> io::Result<String> {
        std::fs::read_to_string(path.as_std_path())
    }
}
