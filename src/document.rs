//! Read-only document access for completion requests
//!
//! LSP positions count UTF-16 code units; the completion core slices lines
//! by byte offset. The helpers here convert between the two.

use std::path::PathBuf;

use ropey::{Rope, RopeSlice};
use tower_lsp::lsp_types::{Position, Url};

/// Immutable view of a document taken at request start
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub uri: Url,
    pub text: Rope,
}

impl DocumentSnapshot {
    pub fn new(uri: Url, text: impl Into<Rope>) -> Self {
        Self { uri, text: text.into() }
    }

    /// Filesystem path of the document, if it is a `file:` URI
    pub fn path(&self) -> Option<PathBuf> {
        self.uri.to_file_path().ok()
    }

    /// Full document text
    pub fn full_text(&self) -> String {
        self.text.to_string()
    }

    /// Text of a single line without its line terminator
    pub fn line_text(&self, line: u32) -> Option<String> {
        let line = self.text.get_line(line as usize)?;
        let mut text: String = line.chars().collect();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Character offset into the rope for an LSP position, clamped to the line
    pub fn position_to_char(&self, position: Position) -> Option<usize> {
        let line_idx = position.line as usize;
        if line_idx >= self.text.len_lines() {
            return None;
        }
        let line = self.text.line(line_idx);
        let utf16_len = line.len_utf16_cu() - line_terminator_len(line);
        let char_in_line = line.utf16_cu_to_char((position.character as usize).min(utf16_len));
        Some(self.text.line_to_char(line_idx) + char_in_line)
    }
}

/// Number of trailing `\n`/`\r` chars on a rope line
///
/// Each is a single UTF-16 code unit, so the count is also their UTF-16 length.
pub fn line_terminator_len(line: RopeSlice<'_>) -> usize {
    let mut chars = line.chars_at(line.len_chars());
    let mut count = 0;
    while let Some(c) = chars.prev() {
        if c != '\n' && c != '\r' {
            break;
        }
        count += 1;
    }
    count
}

/// Byte offset of a UTF-16 column within a line, clamped to the line length
pub fn utf16_to_byte_offset(line: &str, utf16_col: usize) -> usize {
    let mut units = 0;
    for (byte_idx, ch) in line.char_indices() {
        if units >= utf16_col {
            return byte_idx;
        }
        units += ch.len_utf16();
    }
    line.len()
}

/// UTF-16 column of a byte offset within a line
pub fn byte_to_utf16_offset(line: &str, byte_offset: usize) -> u32 {
    let end = byte_offset.min(line.len());
    line[..end].chars().map(|c| c.len_utf16() as u32).sum()
}
