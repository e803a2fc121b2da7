// ============================================================================
// Encoding Conversion Module
//
// Reads a whole file through a named source encoding and writes text back
// through a named target encoding. Decoding and encoding are strict: malformed
// input or characters the target cannot represent are errors rather than
// replacement characters or numeric character references.
// ============================================================================

use crate::encoding::{resolve_encoding, resolve_target_encoding, TextEncoding};
use crate::errors::{FileOpsError, FileOpsResult};
use crate::file_utils::DirectoryEntry;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub struct EncodingConverter;

impl EncodingConverter {
    /// Read `entry` decoded from the encoding named `from`, trimmed.
    pub fn read_file(entry: &DirectoryEntry, from: &str) -> FileOpsResult<String> {
        let encoding = resolve_encoding(from)?;
        Self::read_with(&entry.path, entry.size, encoding)
    }

    /// Encode `content` with the encoding named `to` and overwrite `path`.
    ///
    /// Returns the number of bytes written.
    pub fn write_file(path: &Path, to: &str, content: &str) -> FileOpsResult<u64> {
        let encoding = resolve_target_encoding(to)?;
        Self::write_with(path, encoding, content)
    }

    /// Read and decode a file with an already resolved encoding.
    ///
    /// `size_hint` only pre-sizes the byte buffer; the decoded string grows
    /// as needed, so multi-byte and wide encodings are handled alike.
    pub fn read_with(
        path: &Path,
        size_hint: u64,
        encoding: TextEncoding,
    ) -> FileOpsResult<String> {
        let mut bytes = Vec::with_capacity(size_hint as usize);
        File::open(path)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .map_err(|e| FileOpsError::io(path, e))?;

        let text =
            Self::decode_bytes(&bytes, encoding).ok_or_else(|| FileOpsError::Decode {
                path: path.to_path_buf(),
                encoding: encoding.name().to_string(),
            })?;

        Ok(Self::trim_text(&text).to_string())
    }

    /// Encode and write with an already resolved target encoding.
    ///
    /// The text is encoded before the file is opened, so an unmappable
    /// character leaves the existing file untouched. A failure during the
    /// write itself leaves the file truncated.
    pub fn write_with(
        path: &Path,
        encoding: TextEncoding,
        content: &str,
    ) -> FileOpsResult<u64> {
        let bytes =
            Self::encode_text(content, encoding).ok_or_else(|| FileOpsError::Unmappable {
                path: path.to_path_buf(),
                encoding: encoding.name().to_string(),
            })?;

        let mut file = File::create(path).map_err(|e| FileOpsError::io(path, e))?;
        file.write_all(&bytes)
            .and_then(|_| file.flush())
            .map_err(|e| FileOpsError::io(path, e))?;

        Ok(bytes.len() as u64)
    }

    /// Decode bytes, dropping a byte order mark that matches `encoding`.
    ///
    /// Returns None when the input is malformed for `encoding`.
    pub fn decode_bytes(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
        match encoding.decode(bytes) {
            Some(decoded) => Some(decoded.into_owned()),
            None => {
                log::debug!("Malformed {} input ({} bytes)", encoding.name(), bytes.len());
                None
            }
        }
    }

    /// Encode text, returning None if any character is unmappable.
    pub fn encode_text(text: &str, encoding: TextEncoding) -> Option<Vec<u8>> {
        encoding.encode(text).map(|encoded| encoded.into_owned())
    }

    /// Strip leading and trailing spaces and ASCII control characters
    pub fn trim_text(text: &str) -> &str {
        text.trim_matches(|c: char| c <= ' ')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{GBK, UTF_8, WINDOWS_1252};
    use crate::encoding::TextEncoding::Standard;
    use std::fs;
    use tempfile::tempdir;

    fn entry_for(path: &Path) -> DirectoryEntry {
        DirectoryEntry {
            name: path.file_name().unwrap().to_string_lossy().into_owned(),
            path: path.to_path_buf(),
            size: fs::metadata(path).map(|m| m.len()).unwrap_or(0),
        }
    }

    #[test]
    fn test_gbk_round_trip() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("chinese.txt");
        let original = "中文编码测试 mixed with ASCII";

        EncodingConverter::write_file(&path, "GBK", original)?;
        let raw = fs::read(&path)?;
        assert_ne!(raw, original.as_bytes());

        let back = EncodingConverter::read_file(&entry_for(&path), "GBK")?;
        assert_eq!(back, original);
        Ok(())
    }

    #[test]
    fn test_read_latin1_and_trim() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("latin.txt");
        fs::write(&path, b"  h\xE9llo\r\n")?;

        let text = EncodingConverter::read_file(&entry_for(&path), "ISO-8859-1")?;
        assert_eq!(text, "héllo");
        Ok(())
    }

    #[test]
    fn test_read_utf16le_with_bom() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("wide.txt");
        // UTF-16LE with BOM: "hi"
        fs::write(&path, [0xFF, 0xFE, b'h', 0x00, b'i', 0x00])?;

        let text = EncodingConverter::read_file(&entry_for(&path), "UTF-16LE")?;
        assert_eq!(text, "hi");
        Ok(())
    }

    #[test]
    fn test_malformed_utf8_is_an_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.txt");
        fs::write(&path, b"caf\xE9")?;

        let err = EncodingConverter::read_file(&entry_for(&path), "UTF-8").unwrap_err();
        assert!(matches!(err, FileOpsError::Decode { path: p, .. } if p == path));
        Ok(())
    }

    #[test]
    fn test_latin1_read_and_write_are_byte_for_byte() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("c1.txt");
        fs::write(&path, b"\x80\x9Fcaf\xE9")?;

        let text = EncodingConverter::read_file(&entry_for(&path), "ISO-8859-1")?;
        assert_eq!(text, "\u{80}\u{9F}caf\u{E9}");

        let written = EncodingConverter::write_file(&path, "latin1", &text)?;
        assert_eq!(written, 6);
        assert_eq!(fs::read(&path)?, b"\x80\x9Fcaf\xE9");

        let err = EncodingConverter::write_file(&path, "ISO-8859-1", "\u{20AC}").unwrap_err();
        assert!(matches!(err, FileOpsError::Unmappable { encoding, .. } if encoding == "ISO-8859-1"));
        assert_eq!(fs::read(&path)?, b"\x80\x9Fcaf\xE9");
        Ok(())
    }

    #[test]
    fn test_unmappable_leaves_file_untouched() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("keep.txt");
        fs::write(&path, "before")?;

        let err = EncodingConverter::write_file(&path, "ISO-8859-1", "中").unwrap_err();
        assert!(matches!(err, FileOpsError::Unmappable { .. }));
        assert_eq!(fs::read_to_string(&path)?, "before");
        Ok(())
    }

    #[test]
    fn test_unsupported_names() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("x.txt");
        fs::write(&path, "x")?;

        assert!(matches!(
            EncodingConverter::read_file(&entry_for(&path), "NOT-A-REAL-ENCODING"),
            Err(FileOpsError::UnsupportedEncoding(_))
        ));
        assert!(matches!(
            EncodingConverter::write_file(&path, "NOT-A-REAL-ENCODING", "y"),
            Err(FileOpsError::UnsupportedEncoding(_))
        ));
        assert_eq!(fs::read_to_string(&path)?, "x");
        Ok(())
    }

    #[test]
    fn test_missing_file_reports_path() {
        let missing = Path::new("/definitely/not/here.txt");
        let err = EncodingConverter::read_with(missing, 0, Standard(UTF_8)).unwrap_err();
        assert!(matches!(err, FileOpsError::Io { path, .. } if path == missing));
    }

    #[test]
    fn test_byte_helpers() {
        assert_eq!(
            EncodingConverter::decode_bytes(b"\xEF\xBB\xBFabc", Standard(UTF_8)).as_deref(),
            Some("abc")
        );
        assert_eq!(
            EncodingConverter::decode_bytes(b"caf\xE9", Standard(WINDOWS_1252)).as_deref(),
            Some("café")
        );
        assert_eq!(
            EncodingConverter::encode_text("é", Standard(WINDOWS_1252)),
            Some(vec![0xE9])
        );
        assert!(EncodingConverter::encode_text("中", Standard(GBK)).is_some());
        assert!(EncodingConverter::encode_text("中", Standard(WINDOWS_1252)).is_none());
    }

    #[test]
    fn test_trim_text_only_strips_ascii_blanks() {
        assert_eq!(EncodingConverter::trim_text(" \t\r\n x y \0"), "x y");
        // U+3000 IDEOGRAPHIC SPACE is above U+0020 and is kept
        assert_eq!(EncodingConverter::trim_text("\u{3000}x"), "\u{3000}x");
        assert_eq!(EncodingConverter::trim_text("   "), "");
    }
}
