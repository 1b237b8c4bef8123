//! File-system removal backends

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

/// Removes files and directory trees
pub trait Remover {
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// Deletes from the real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        trace!(path = %path.display(), "removing file");
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        trace!(path = %path.display(), "removing directory");
        fs::remove_dir_all(path)
    }
}

/// Deletes nothing; every removal succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRemover;

impl Remover for DryRunRemover {
    fn remove_file(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn remove_dir(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}
