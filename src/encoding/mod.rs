// ============================================================================
// Encoding Module - Public API
//
// Resolves user-supplied encoding names against the encoding_rs registry and
// exposes the converter that reads and writes whole files in a named
// encoding. Names are never guessed: an unknown label is a hard error.
// ============================================================================

use crate::errors::{FileOpsError, FileOpsResult};
use encoding_rs::{mem, Encoding};
use std::borrow::Cow;

pub mod converter;

pub use converter::EncodingConverter;

/// Encoding used by the merge operation for both its inputs and its output
pub const MERGE_ENCODING: &str = "UTF-8";

// Labels that mean ISO-8859-1 proper. WHATWG folds them into windows-1252.
const LATIN1_LABELS: &[&str] = &[
    "cp819",
    "csisolatin1",
    "ibm819",
    "iso-8859-1",
    "iso-ir-100",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "l1",
    "latin1",
];

/// A resolved character encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value
    Latin1,
    /// Any other encoding from the encoding_rs registry
    Standard(&'static Encoding),
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "ISO-8859-1",
            TextEncoding::Standard(encoding) => encoding.name(),
        }
    }

    /// Decode bytes, dropping a matching byte order mark.
    ///
    /// Returns None when the input is malformed. Latin-1 input never is.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Latin1 => Some(mem::decode_latin1(bytes)),
            TextEncoding::Standard(encoding) => {
                let (decoded, had_errors) = encoding.decode_with_bom_removal(bytes);
                (!had_errors).then_some(decoded)
            }
        }
    }

    /// Encode text, returning None if any character is unmappable.
    pub fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        match self {
            TextEncoding::Latin1 => mem::is_str_latin1(text).then(|| mem::encode_latin1_lossy(text)),
            TextEncoding::Standard(encoding) => {
                let (encoded, _, had_unmappable) = encoding.encode(text);
                (!had_unmappable).then_some(encoded)
            }
        }
    }

    // encoding_rs has no encoder for UTF-16 or "replacement"
    fn can_encode(&self) -> bool {
        match self {
            TextEncoding::Latin1 => true,
            TextEncoding::Standard(encoding) => encoding.output_encoding() == *encoding,
        }
    }
}

/// Look up an encoding by label, for reading.
///
/// Labels follow the WHATWG Encoding Standard, so matching is
/// case-insensitive and ignores surrounding whitespace ("utf8", "GBK" are
/// accepted). The ISO-8859-1 labels are the exception and resolve to real
/// Latin-1 rather than windows-1252.
pub fn resolve_encoding(name: &str) -> FileOpsResult<TextEncoding> {
    let label = name.trim();
    if LATIN1_LABELS
        .iter()
        .any(|latin1| latin1.eq_ignore_ascii_case(label))
    {
        return Ok(TextEncoding::Latin1);
    }

    Encoding::for_label(label.as_bytes())
        .map(TextEncoding::Standard)
        .ok_or_else(|| FileOpsError::UnsupportedEncoding(name.to_string()))
}

/// Look up an encoding by label, for writing.
///
/// encoding_rs would silently emit UTF-8 for UTF-16 or the "replacement"
/// encoding, so those are rejected here.
pub fn resolve_target_encoding(name: &str) -> FileOpsResult<TextEncoding> {
    let encoding = resolve_encoding(name)?;
    if !encoding.can_encode() {
        return Err(FileOpsError::UnsupportedEncoding(format!(
            "{} (cannot be used as a target encoding)",
            name
        )));
    }
    Ok(encoding)
}
