use crate::errors::{FileOpsError, FileOpsResult};
use crate::file_utils::DirectoryEntry;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Width that short numeric suffixes are zero-padded to
const PAD_WIDTH: usize = 3;

/// Moves entries into a destination directory under their padded suffix
pub struct BatchRenamer;

impl BatchRenamer {
    /// Compute the new name for `name`.
    ///
    /// The part after the last `_` (or the whole name when there is none) is
    /// left-padded with zeros to three characters. Longer suffixes are kept
    /// as they are.
    pub fn target_name(name: &str) -> String {
        let suffix = match name.rfind('_') {
            Some(idx) => &name[idx + 1..],
            None => name,
        };

        let len = suffix.chars().count();
        if len == 0 || len >= PAD_WIDTH {
            suffix.to_string()
        } else {
            format!("{}{}", "0".repeat(PAD_WIDTH - len), suffix)
        }
    }

    /// Move `entry` into `dest_dir` under its target name, exactly once.
    ///
    /// Never overwrites: an existing target is a `MoveFailed` error.
    /// Returns the new path.
    pub fn relocate(entry: &DirectoryEntry, dest_dir: &Path) -> FileOpsResult<PathBuf> {
        let target = Self::target_name(&entry.name);
        let to = dest_dir.join(&target);

        if target.is_empty() {
            return Err(FileOpsError::MoveFailed {
                from: entry.path.clone(),
                to,
                reason: "nothing follows the last underscore".to_string(),
            });
        }

        // Already in place (renaming inside the same directory)
        if to == entry.path {
            debug!("{} already has its target name", entry.path.display());
            return Ok(to);
        }

        // symlink_metadata so a dangling link still counts as occupied
        if fs::symlink_metadata(&to).is_ok() {
            return Err(FileOpsError::MoveFailed {
                from: entry.path.clone(),
                to,
                reason: "destination already exists".to_string(),
            });
        }

        fs::rename(&entry.path, &to).map_err(|e| FileOpsError::MoveFailed {
            from: entry.path.clone(),
            to: to.clone(),
            reason: e.to_string(),
        })?;

        debug!("Moved {} -> {}", entry.path.display(), to.display());
        Ok(to)
    }
}
