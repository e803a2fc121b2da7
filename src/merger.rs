use crate::encoding::{resolve_encoding, EncodingConverter, TextEncoding, MERGE_ENCODING};
use crate::errors::{FileOpsError, FileOpsResult};
use crate::file_utils::{DirectoryEntry, FileUtils};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// 1MB output buffer
const OUTPUT_BUFFER_SIZE: usize = 1024 * 1024;

/// Concatenates decoded entries into one UTF-8 destination file.
///
/// The destination is truncated when the merger is created and the handle is
/// released when the merger is dropped, whether or not `finish` was reached.
pub struct FileMerger {
    dest: PathBuf,
    dest_identity: Option<PathBuf>,
    writer: BufWriter<File>,
    encoding: TextEncoding,
}

impl FileMerger {
    /// Open `dest` for overwrite. Its parent directory must already exist.
    pub fn create(dest: &Path) -> FileOpsResult<Self> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            FileUtils::require_dir(parent)?;
        }

        let encoding = resolve_encoding(MERGE_ENCODING)?;
        let file = File::create(dest).map_err(|e| FileOpsError::io(dest, e))?;

        Ok(Self {
            dest: dest.to_path_buf(),
            dest_identity: fs::canonicalize(dest).ok(),
            writer: BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file),
            encoding,
        })
    }

    /// True when `path` names the file this merger is writing
    pub fn is_destination(&self, path: &Path) -> bool {
        match &self.dest_identity {
            Some(identity) => fs::canonicalize(path).ok().as_ref() == Some(identity),
            None => path == self.dest,
        }
    }

    /// Append one entry's trimmed content with no separator.
    ///
    /// Returns the number of bytes appended.
    pub fn append(&mut self, entry: &DirectoryEntry) -> FileOpsResult<u64> {
        let content = EncodingConverter::read_with(&entry.path, entry.size, self.encoding)?;
        self.writer
            .write_all(content.as_bytes())
            .map_err(|e| FileOpsError::io(&self.dest, e))?;
        Ok(content.len() as u64)
    }

    /// Flush buffered output and close the destination
    pub fn finish(mut self) -> FileOpsResult<()> {
        self.writer
            .flush()
            .map_err(|e| FileOpsError::io(&self.dest, e))
    }
}
