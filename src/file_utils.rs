use crate::errors::{FileOpsError, FileOpsResult};
use log::{debug, trace};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

/// One immediate entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,  // File name, lossily converted when not valid Unicode
    pub path: PathBuf, // Full path of the entry
    pub size: u64,     // Byte length, only used as a buffer capacity hint
}

/// Order in which listed entries are handed to an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Whatever the file system enumeration yields
    #[default]
    FileSystem,
    /// Sorted by file name
    Name,
}

// Define a struct for file utility functions
pub struct FileUtils;

impl FileUtils {
    /// List the immediate entries of `dir`.
    ///
    /// Subdirectories are returned like any other entry; nothing is recursed
    /// into and nothing is filtered.
    pub fn list_dir(dir: &Path, order: ListOrder) -> FileOpsResult<Vec<DirectoryEntry>> {
        Self::require_dir(dir)?;

        let reader = fs::read_dir(dir).map_err(|e| FileOpsError::io(dir, e))?;
        let mut entries = Vec::new();

        for entry in reader {
            let entry = entry.map_err(|e| FileOpsError::io(dir, e))?;
            let size = Self::size_hint(&entry.path(), entry.metadata());
            let listed = DirectoryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                size,
            };
            trace!("Listed {} ({} bytes)", listed.path.display(), listed.size);
            entries.push(listed);
        }

        if order == ListOrder::Name {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }

        debug!("Found {} entries in {}", entries.len(), dir.display());
        Ok(entries)
    }

    // Size is only a capacity hint, so an unreadable one becomes 0
    fn size_hint(path: &Path, metadata: io::Result<fs::Metadata>) -> u64 {
        match metadata {
            Ok(meta) => meta.len(),
            Err(e) => {
                trace!("No size for {}, using 0: {}", path.display(), e);
                0
            }
        }
    }

    /// Keep the entries whose name ends with `suffix`, preserving order.
    ///
    /// Exact, case-sensitive tail match. Pass the dot yourself (".txt").
    pub fn filter_suffix(entries: Vec<DirectoryEntry>, suffix: &str) -> Vec<DirectoryEntry> {
        entries
            .into_iter()
            .filter(|entry| entry.name.ends_with(suffix))
            .collect()
    }

    /// Fail with `NotFound` or `NotADirectory` unless `dir` is a directory
    pub fn require_dir(dir: &Path) -> FileOpsResult<()> {
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(FileOpsError::NotADirectory(dir.to_path_buf())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FileOpsError::NotFound(dir.to_path_buf()))
            }
            Err(e) => Err(FileOpsError::io(dir, e)),
        }
    }

    // Ensure a directory exists, creating it if necessary
    pub fn ensure_dir(path: &Path) -> FileOpsResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| FileOpsError::io(path, e))?;
            debug!("Created directory {}", path.display());
        }
        Self::require_dir(path)
    }
}
