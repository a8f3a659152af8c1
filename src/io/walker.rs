use crate::errors::{Error, Result};
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};

/// Lazily enumerates every file under a root directory.
///
/// No filtering is applied: hidden files, ignore files and special files
/// are yielded exactly as the traversal finds them. Symbolic links are not
/// followed: a link to a file is yielded like a file, and a link to a
/// directory is skipped.
pub struct FileWalker {
    root: PathBuf,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every non-directory entry below the root.
    ///
    /// Entries the traversal cannot read (an unreadable subdirectory, for
    /// example) are logged and skipped.
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> {
        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| !is_directory(entry))
            .map(|entry| entry.into_path())
    }
}

/// Whether `entry` is a directory, or a symbolic link resolving to one.
fn is_directory(entry: &DirEntry) -> bool {
    if entry.file_type().is_some_and(|t| t.is_dir()) {
        return true;
    }
    if !entry.path_is_symlink() {
        return false;
    }
    let target_is_dir = std::fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
    if target_is_dir {
        log::debug!("Not following directory link {}", entry.path().display());
    }
    target_is_dir
}

/// Check that `path` exists and is a directory.
pub fn validate_root(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(Error::invalid_directory(path)),
    }
}
