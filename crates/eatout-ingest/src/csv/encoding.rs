//! Byte-level decoding of listing exports.
//!
//! Exports are expected to be UTF-8, but spreadsheet round-trips regularly
//! produce Windows-1252 files with accented city and restaurant names. Those
//! are decoded instead of rejected. UTF-16 is refused outright.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encoding the text was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
}

/// Reject UTF-16 byte order marks.
pub fn validate_encoding(bytes: &[u8], path: &Path) -> Result<()> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Decode listing bytes to text, stripping a UTF-8 BOM.
pub fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> Result<(Cow<'a, str>, SourceEncoding)> {
    validate_encoding(bytes, path)?;
    let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok((Cow::Borrowed(text), SourceEncoding::Utf8)),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
            tracing::warn!(
                path = %path.display(),
                "listing file is not valid UTF-8, decoded as Windows-1252"
            );
            Ok((text, SourceEncoding::Windows1252))
        }
    }
}
