//! Completion candidates produced by the resolvers

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, InsertTextFormat,
    MarkupContent, MarkupKind, Position, Range, TextEdit,
};

/// Candidate category shown by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Function,
    Snippet,
    Reference,
    File,
}

impl From<CandidateKind> for CompletionItemKind {
    fn from(kind: CandidateKind) -> Self {
        match kind {
            CandidateKind::Function => CompletionItemKind::FUNCTION,
            CandidateKind::Snippet => CompletionItemKind::SNIPPET,
            CandidateKind::Reference => CompletionItemKind::REFERENCE,
            CandidateKind::File => CompletionItemKind::FILE,
        }
    }
}

/// What gets inserted when a candidate is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertTemplate {
    /// Insert the label itself
    Label,
    /// Literal text
    Text(String),
    /// Snippet with `$1`, `${1:default}` or `${1|a,b|}` placeholders
    Snippet(String),
}

/// Candidate documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateDoc {
    Plain(String),
    Markdown(String),
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    pub label: String,
    pub kind: CandidateKind,
    pub insert: InsertTemplate,
    pub detail: Option<String>,
    pub documentation: Option<CandidateDoc>,
    pub sort_key: String,
    /// Range on the cursor line replaced by the insertion
    pub replacement: Option<Range>,
}

impl CandidateItem {
    pub fn new(label: impl Into<String>, kind: CandidateKind) -> Self {
        let label = label.into();
        Self {
            sort_key: label.clone(),
            label,
            kind,
            insert: InsertTemplate::Label,
            detail: None,
            documentation: None,
            replacement: None,
        }
    }

    pub fn with_insert(mut self, insert: InsertTemplate) -> Self {
        self.insert = insert;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, documentation: CandidateDoc) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = sort_key.into();
        self
    }

    pub fn with_replacement(mut self, range: Range) -> Self {
        self.replacement = Some(range);
        self
    }

    /// The text the client should insert
    pub fn insert_text(&self) -> &str {
        match &self.insert {
            InsertTemplate::Label => &self.label,
            InsertTemplate::Text(text) | InsertTemplate::Snippet(text) => text,
        }
    }
}

/// Range on one line between two UTF-16 columns
pub fn line_range(line: u32, start: u32, end: u32) -> Range {
    Range::new(Position::new(line, start), Position::new(line, end))
}

impl From<CandidateItem> for CompletionItem {
    fn from(item: CandidateItem) -> Self {
        let new_text = item.insert_text().to_string();
        let insert_text_format = match item.insert {
            InsertTemplate::Snippet(_) => Some(InsertTextFormat::SNIPPET),
            _ => Some(InsertTextFormat::PLAIN_TEXT),
        };

        let (insert_text, text_edit) = match item.replacement {
            Some(range) => (None, Some(CompletionTextEdit::Edit(TextEdit { range, new_text }))),
            None => (Some(new_text), None),
        };

        let documentation = item.documentation.map(|doc| match doc {
            CandidateDoc::Plain(value) => Documentation::String(value),
            CandidateDoc::Markdown(value) => Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
        });

        CompletionItem {
            label: item.label,
            kind: Some(item.kind.into()),
            detail: item.detail,
            documentation,
            sort_text: Some(item.sort_key),
            insert_text,
            insert_text_format,
            text_edit,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_with_range_uses_text_edit() {
        let item = CandidateItem::new("#intro", CandidateKind::Reference)
            .with_insert(InsertTemplate::Text("#intro)".to_string()))
            .with_replacement(line_range(0, 3, 4));
        let lsp: CompletionItem = item.into();

        assert_eq!(lsp.insert_text, None);
        match lsp.text_edit {
            Some(CompletionTextEdit::Edit(edit)) => {
                assert_eq!(edit.new_text, "#intro)");
                assert_eq!(edit.range, line_range(0, 3, 4));
            }
            other => panic!("Expected text edit, got {:?}", other),
        }
        assert_eq!(lsp.insert_text_format, Some(InsertTextFormat::PLAIN_TEXT));
        assert_eq!(lsp.sort_text.as_deref(), Some("#intro"));
    }

    #[test]
    fn test_conversion_snippet_without_range() {
        let item = CandidateItem::new("\\frac", CandidateKind::Function)
            .with_insert(InsertTemplate::Snippet("frac{$1}{$2}".to_string()))
            .with_sort_key("\\0f0r0a0c");
        let lsp: CompletionItem = item.into();

        assert_eq!(lsp.insert_text.as_deref(), Some("frac{$1}{$2}"));
        assert_eq!(lsp.insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert_eq!(lsp.kind, Some(CompletionItemKind::FUNCTION));
        assert!(lsp.text_edit.is_none());
    }
}
