//! Permissive text reading
//!
//! Source files are read as UTF-8. Invalid byte sequences are dropped rather
//! than replaced, so one malformed file never fails a run and never injects
//! replacement characters into the output. Line endings are normalized to
//! `\n`.

use std::fs;
use std::io;
use std::path::Path;

/// Result of decoding a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// The decoded content
    pub content: String,

    /// Number of bytes discarded because they were not valid UTF-8
    pub dropped_bytes: usize,
}

impl DecodedText {
    /// Whether any bytes were discarded during decoding
    pub fn is_lossy(&self) -> bool {
        self.dropped_bytes > 0
    }
}

/// Decode bytes as UTF-8, dropping any invalid sequences
pub fn decode_dropping_invalid(bytes: &[u8]) -> DecodedText {
    let mut content = String::with_capacity(bytes.len());
    let mut dropped_bytes = 0;

    for chunk in bytes.utf8_chunks() {
        content.push_str(chunk.valid());
        dropped_bytes += chunk.invalid().len();
    }

    DecodedText {
        content: normalize_newlines(content),
        dropped_bytes,
    }
}

/// Convert `\r\n` and lone `\r` to `\n`
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read a file with permissive decoding
pub fn read_text_lossy(path: &Path) -> io::Result<DecodedText> {
    let bytes = fs::read(path)?;
    Ok(decode_dropping_invalid(&bytes))
}
