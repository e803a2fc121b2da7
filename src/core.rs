use crate::encoding::{resolve_encoding, resolve_target_encoding, EncodingConverter};
use crate::errors::FileOpsResult;
use crate::file_utils::{DirectoryEntry, FileUtils, ListOrder};
use crate::merger::FileMerger;
use crate::progress::ProgressTracker;
use crate::renamer::BatchRenamer;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

/// Entry point for the three batch operations.
///
/// Holds options only; every call lists the file system afresh and nothing
/// is carried over between calls. Each batch stops at the first failing
/// entry and returns that error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOps {
    order: ListOrder,
    show_progress: bool,
}

impl FileOps {
    /// File-system listing order, no progress bar
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: ListOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Re-encode every file in `dir` whose name ends with `suffix`.
    ///
    /// Both encoding names are checked before anything is read, so a bad
    /// name leaves the directory untouched. Files are rewritten in place.
    pub fn recode(&self, dir: &Path, suffix: &str, from: &str, to: &str) -> FileOpsResult<()> {
        let from_encoding = resolve_encoding(from)?;
        let to_encoding = resolve_target_encoding(to)?;
        info!(
            "Recoding *{} in {} from {} to {}",
            suffix,
            dir.display(),
            from_encoding.name(),
            to_encoding.name()
        );

        let entries = FileUtils::filter_suffix(FileUtils::list_dir(dir, self.order)?, suffix);
        self.run_batch("recode", &entries, |entry| {
            let content = EncodingConverter::read_with(&entry.path, entry.size, from_encoding)?;
            let written = EncodingConverter::write_with(&entry.path, to_encoding, &content)?;
            debug!("Recoded {} ({} bytes)", entry.path.display(), written);
            Ok(written)
        })
    }

    /// Move every entry of `src` into `dest` under its zero-padded suffix.
    ///
    /// `dest` is created when missing.
    pub fn rename(&self, src: &Path, dest: &Path) -> FileOpsResult<()> {
        info!("Renaming entries of {} into {}", src.display(), dest.display());

        let mut entries = FileUtils::list_dir(src, self.order)?;
        FileUtils::ensure_dir(dest)?;

        // dest may live inside src; never try to move it into itself
        if let Ok(dest_identity) = fs::canonicalize(dest) {
            entries.retain(|entry| {
                let is_dest = fs::canonicalize(&entry.path).ok().as_ref() == Some(&dest_identity);
                if is_dest {
                    warn!("Skipping destination directory {}", entry.path.display());
                }
                !is_dest
            });
        }

        self.run_batch("rename", &entries, |entry| {
            BatchRenamer::relocate(entry, dest)?;
            Ok(entry.size)
        })
    }

    /// Concatenate the entries of `src` into `dest` as UTF-8, overwriting it.
    ///
    /// The listing is taken before `dest` is opened, and `dest` is skipped if
    /// it happens to be one of the entries.
    pub fn merge(&self, src: &Path, dest: &Path) -> FileOpsResult<()> {
        info!("Merging entries of {} into {}", src.display(), dest.display());

        let mut entries = FileUtils::list_dir(src, self.order)?;
        let mut merger = FileMerger::create(dest)?;

        entries.retain(|entry| {
            let is_dest = merger.is_destination(&entry.path);
            if is_dest {
                warn!("Skipping merge destination {}", entry.path.display());
            }
            !is_dest
        });

        self.run_batch("merge", &entries, |entry| merger.append(entry))?;
        merger.finish()
    }

    // Apply `step` to each entry in order, aborting on the first error
    fn run_batch<F>(
        &self,
        operation: &'static str,
        entries: &[DirectoryEntry],
        mut step: F,
    ) -> FileOpsResult<()>
    where
        F: FnMut(&DirectoryEntry) -> FileOpsResult<u64>,
    {
        let mut tracker = ProgressTracker::new(operation, entries.len(), self.show_progress);

        for entry in entries {
            match step(entry) {
                Ok(bytes) => tracker.file_done(&entry.name, bytes),
                Err(e) => {
                    tracker.abandon();
                    return Err(e);
                }
            }
        }

        tracker.finish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FileOpsError;
    use tempfile::tempdir;

    fn sorted_ops() -> FileOps {
        FileOps::new().with_order(ListOrder::Name)
    }

    #[test]
    fn test_recode_latin1_to_utf8_only_matching_suffix() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), b"h\xE9llo")?;
        fs::write(dir.path().join("b.csv"), b"caf\xE9")?;

        sorted_ops().recode(dir.path(), ".txt", "ISO-8859-1", "UTF-8")?;

        assert_eq!(fs::read(dir.path().join("a.txt"))?, "héllo".as_bytes());
        assert_eq!(fs::read(dir.path().join("b.csv"))?, b"caf\xE9");
        Ok(())
    }

    #[test]
    fn test_recode_latin1_keeps_c1_bytes_as_code_points() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("c1.txt"), b"x\x80y")?;

        sorted_ops().recode(dir.path(), ".txt", "ISO-8859-1", "UTF-8")?;
        assert_eq!(fs::read_to_string(dir.path().join("c1.txt"))?, "x\u{80}y");

        // Euro sign has no Latin-1 byte
        fs::write(dir.path().join("euro.txt"), "\u{20AC}")?;
        fs::remove_file(dir.path().join("c1.txt"))?;
        let err = sorted_ops()
            .recode(dir.path(), ".txt", "UTF-8", "ISO-8859-1")
            .unwrap_err();
        assert!(matches!(err, FileOpsError::Unmappable { .. }));
        assert_eq!(fs::read_to_string(dir.path().join("euro.txt"))?, "\u{20AC}");
        Ok(())
    }

    #[test]
    fn test_recode_unsupported_encoding_modifies_nothing() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), b"  keep me  ")?;

        let err = sorted_ops()
            .recode(dir.path(), ".txt", "NOT-A-REAL-ENCODING", "UTF-8")
            .unwrap_err();
        assert!(matches!(err, FileOpsError::UnsupportedEncoding(_)));

        let err = sorted_ops()
            .recode(dir.path(), ".txt", "UTF-8", "NOT-A-REAL-ENCODING")
            .unwrap_err();
        assert!(matches!(err, FileOpsError::UnsupportedEncoding(_)));

        assert_eq!(fs::read(dir.path().join("a.txt"))?, b"  keep me  ");
        Ok(())
    }

    #[test]
    fn test_recode_utf8_gbk_and_back() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("zh.txt");
        fs::write(&path, "你好，世界")?;

        sorted_ops().recode(dir.path(), ".txt", "UTF-8", "GBK")?;
        assert_ne!(fs::read(&path)?, "你好，世界".as_bytes());

        sorted_ops().recode(dir.path(), ".txt", "GBK", "UTF-8")?;
        assert_eq!(fs::read_to_string(&path)?, "你好，世界");
        Ok(())
    }

    #[test]
    fn test_recode_aborts_on_first_failure() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("1.txt"), b"ok")?;
        fs::write(dir.path().join("2.txt"), b"bad \xFF")?;
        fs::write(dir.path().join("3.txt"), b" untouched ")?;

        let err = sorted_ops()
            .recode(dir.path(), ".txt", "UTF-8", "UTF-8")
            .unwrap_err();

        assert!(matches!(err, FileOpsError::Decode { path, .. } if path == dir.path().join("2.txt")));
        assert_eq!(fs::read(dir.path().join("3.txt"))?, b" untouched ");
        Ok(())
    }

    #[test]
    fn test_recode_missing_directory() {
        let err = sorted_ops()
            .recode(Path::new("/no/such/dir"), ".txt", "UTF-8", "GBK")
            .unwrap_err();
        assert!(matches!(err, FileOpsError::NotFound(_)));
    }

    #[test]
    fn test_rename_pads_and_moves_once() -> anyhow::Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        for name in ["x_1", "x_22", "x_333"] {
            fs::write(src.path().join(name), name)?;
        }

        sorted_ops().rename(src.path(), out.path())?;

        assert_eq!(fs::read_to_string(out.path().join("001"))?, "x_1");
        assert_eq!(fs::read_to_string(out.path().join("022"))?, "x_22");
        assert_eq!(fs::read_to_string(out.path().join("333"))?, "x_333");
        assert!(!out.path().join("1").exists());
        assert!(!out.path().join("22").exists());
        assert_eq!(fs::read_dir(src.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_rename_creates_destination() -> anyhow::Result<()> {
        let src = tempdir()?;
        let root = tempdir()?;
        let dest = root.path().join("out");
        fs::write(src.path().join("page_7"), "")?;

        sorted_ops().rename(src.path(), &dest)?;
        assert!(dest.join("007").exists());
        Ok(())
    }

    #[test]
    fn test_rename_collision_aborts() -> anyhow::Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("a_1"), "a")?;
        fs::write(src.path().join("b_1"), "b")?;

        let err = sorted_ops().rename(src.path(), out.path()).unwrap_err();

        assert!(matches!(err, FileOpsError::MoveFailed { .. }));
        assert_eq!(fs::read_to_string(out.path().join("001"))?, "a");
        assert!(src.path().join("b_1").exists());
        Ok(())
    }

    #[test]
    fn test_rename_skips_destination_inside_source() -> anyhow::Result<()> {
        let src = tempdir()?;
        let dest = src.path().join("out");
        fs::create_dir(&dest)?;
        fs::write(src.path().join("x_5"), "five")?;

        sorted_ops().rename(src.path(), &dest)?;
        assert_eq!(fs::read_to_string(dest.join("005"))?, "five");
        Ok(())
    }

    #[test]
    fn test_merge_concatenates_in_listing_order() -> anyhow::Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("p.txt"), "foo")?;
        fs::write(src.path().join("q.txt"), "bar")?;
        let dest = out.path().join("all.txt");

        sorted_ops().merge(src.path(), &dest)?;
        assert_eq!(fs::read_to_string(&dest)?, "foobar");
        Ok(())
    }

    #[test]
    fn test_merge_is_idempotent() -> anyhow::Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("1.txt"), "alpha\n")?;
        fs::write(src.path().join("2.txt"), "beta\n")?;
        let dest = out.path().join("all.txt");

        sorted_ops().merge(src.path(), &dest)?;
        let first = fs::read_to_string(&dest)?;
        sorted_ops().merge(src.path(), &dest)?;
        let second = fs::read_to_string(&dest)?;

        assert_eq!(first, "alphabeta");
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_merge_into_source_directory_skips_itself() -> anyhow::Result<()> {
        let src = tempdir()?;
        fs::write(src.path().join("a.txt"), "a")?;
        fs::write(src.path().join("b.txt"), "b")?;
        let dest = src.path().join("merged.txt");
        fs::write(&dest, "previous run")?;

        sorted_ops().merge(src.path(), &dest)?;
        assert_eq!(fs::read_to_string(&dest)?, "ab");
        Ok(())
    }

    #[test]
    fn test_merge_aborts_on_non_utf8_source() -> anyhow::Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("a.txt"), b"\xFE\xFE")?;

        let err = sorted_ops()
            .merge(src.path(), &out.path().join("all.txt"))
            .unwrap_err();
        assert!(matches!(err, FileOpsError::Decode { .. }));
        Ok(())
    }

    #[test]
    fn test_merge_missing_source_creates_no_output() -> anyhow::Result<()> {
        let out = tempdir()?;
        let dest = out.path().join("all.txt");

        let err = sorted_ops()
            .merge(&out.path().join("missing"), &dest)
            .unwrap_err();
        assert!(matches!(err, FileOpsError::NotFound(_)));
        assert!(!dest.exists());
        Ok(())
    }
}
