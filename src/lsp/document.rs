use ropey::Rope;

use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

use crate::document::{line_terminator_len, DocumentSnapshot};

pub use crate::lsp::models::{LspDocument, LspDocumentState};

/// Converts an LSP position (UTF-16 column) to a char index in the Rope,
/// clamped to the end of the line and of the document.
fn position_to_char_index(position: &Position, text: &Rope) -> usize {
    let line = position.line as usize;
    if line >= text.len_lines() {
        return text.len_chars();
    }
    let line_slice = text.line(line);
    let max_units = line_slice.len_utf16_cu() - line_terminator_len(line_slice);
    let units = (position.character as usize).min(max_units);
    text.line_to_char(line) + line_slice.utf16_cu_to_char(units)
}

impl LspDocumentState {
    /// Applies a list of content changes to the document state in order.
    /// Fails without touching the text when the version is not newer.
    pub fn apply(&mut self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) -> Result<(), String> {
        if version <= self.version {
            return Err(format!("Version {} not newer than {}", version, self.version));
        }
        for change in changes {
            if let Some(range) = change.range {
                let start = position_to_char_index(&range.start, &self.text);
                let end = position_to_char_index(&range.end, &self.text).max(start);
                self.text.remove(start..end);
                self.text.insert(start, &change.text);
            } else {
                self.text = Rope::from_str(&change.text);
            }
        }
        self.version = version;
        Ok(())
    }
}

impl LspDocument {
    pub fn new(id: u32, uri: Url, text: &str, version: i32) -> Self {
        Self {
            id,
            state: tokio::sync::RwLock::new(LspDocumentState {
                uri,
                text: Rope::from_str(text),
                version,
            }),
        }
    }

    /// Returns the URI of the document.
    pub async fn uri(&self) -> Url {
        self.state.read().await.uri.clone()
    }

    /// Returns the current text of the document as a string.
    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    /// Returns the current version of the document.
    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    /// Immutable copy for a completion request. Rope clones share chunks.
    pub async fn snapshot(&self) -> DocumentSnapshot {
        let state = self.state.read().await;
        DocumentSnapshot::new(state.uri.clone(), state.text.clone())
    }

    /// Applies changes to the document; `false` if the version was stale.
    pub async fn apply(&self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) -> bool {
        let mut state = self.state.write().await;
        state.apply(changes, version).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn create_test_document(text: &str) -> LspDocument {
        LspDocument::new(1, Url::parse("file:///test.md").unwrap(), text, 0)
    }

    fn edit(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position { line: start.0, character: start.1 },
                end: Position { line: end.0, character: end.1 },
            }),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_apply_full_change() {
        let doc = create_test_document("initial text");
        let changes = vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new text".to_string(),
        }];

        assert!(doc.apply(changes, 1).await);
        assert_eq!(doc.text().await, "new text");
        assert_eq!(doc.version().await, 1);
    }

    #[tokio::test]
    async fn test_apply_incremental_changes_in_order() {
        let doc = create_test_document("hello world");
        let changes = vec![edit((0, 6), (0, 11), "rust"), edit((0, 0), (0, 5), "hi")];

        assert!(doc.apply(changes, 1).await);
        assert_eq!(doc.text().await, "hi rust");
    }

    #[tokio::test]
    async fn test_apply_uses_utf16_columns() {
        // `😀` is two UTF-16 code units
        let doc = create_test_document("a😀b\nsecond");
        assert!(doc.apply(vec![edit((0, 3), (0, 4), "c")], 1).await);
        assert_eq!(doc.text().await, "a😀c\nsecond");

        assert!(doc.apply(vec![edit((0, 4), (1, 0), "")], 2).await);
        assert_eq!(doc.text().await, "a😀csecond");
    }

    #[tokio::test]
    async fn test_apply_ignores_unicode_line_separators() {
        let doc = create_test_document("Intro\u{2028}text\npage\x0Cbreak\nSee ");
        assert!(doc.apply(vec![edit((2, 4), (2, 4), "[")], 1).await);
        assert_eq!(doc.text().await, "Intro\u{2028}text\npage\x0Cbreak\nSee [");
    }

    #[tokio::test]
    async fn test_apply_outdated_version() {
        let doc = create_test_document("initial text");
        let full = |text: &str| {
            vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: text.to_string(),
            }]
        };

        assert!(doc.apply(full("new text"), 1).await);
        assert!(!doc.apply(full("stale"), 1).await);
        assert_eq!(doc.text().await, "new text");
        assert_eq!(doc.version().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let doc = create_test_document("# Title\n");
        let snapshot = doc.snapshot().await;
        assert!(doc.apply(vec![edit((0, 2), (0, 7), "Other")], 1).await);

        assert_eq!(snapshot.full_text(), "# Title\n");
        assert_eq!(doc.text().await, "# Other\n");
        assert_eq!(doc.uri().await, snapshot.uri);
    }
}
