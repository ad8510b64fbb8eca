//! Completion of `#anchor` link targets
//!
//! The same trigger either completes a fresh link (`[text](#intr|`) or
//! retargets an existing one (`[text](#intr|o)`). The edit computed here
//! covers both without leaving a stray or duplicated `)`.

use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::Range;

use crate::lsp::features::traits::TocHeading;
use crate::pattern::compile;

use super::item::{CandidateDoc, CandidateItem, CandidateKind, InsertTemplate};

/// Text after the cursor that already closes the link, optionally after a
/// run of target characters
static CLOSING_PAREN_AHEAD: Lazy<Regex> = Lazy::new(|| compile(r"^(?:[^) ]+\s*|\s*)\)"));

/// Where heading candidates go on the cursor line
///
/// Offsets are bytes into the full line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingEdit {
    /// Offset of the `#` that starts the target
    pub start: usize,
    /// End of the replaced text
    pub end: usize,
    /// Append `)` to each inserted label
    pub append_paren: bool,
    /// The line is a `[label]: #target` definition
    pub is_definition: bool,
}

/// Compute the edit for a heading-link completion
///
/// `before`/`after` are the line text on either side of the cursor.
pub fn heading_link_edit(before: &str, after: &str, is_definition: bool) -> Option<HeadingEdit> {
    let start = before.rfind('#')?;
    let cursor = before.len();

    if CLOSING_PAREN_AHEAD.is_match(after) {
        // Editing an existing target: replace up to the `)` and keep it
        let paren = after.find(')')?;
        return Some(HeadingEdit {
            start,
            end: cursor + paren,
            append_paren: false,
            is_definition,
        });
    }

    // Swallow the rest of the word under the cursor
    let word = after.find(char::is_whitespace).unwrap_or(after.len());
    Some(HeadingEdit {
        start,
        end: cursor + word,
        append_paren: !is_definition,
        is_definition,
    })
}

/// One candidate per outline heading, in outline order
///
/// `range` is `edit` converted to the client's columns.
pub fn heading_candidates(headings: &[TocHeading], edit: &HeadingEdit, range: Range) -> Vec<CandidateItem> {
    headings
        .iter()
        .map(|heading| {
            let label = format!("#{}", heading.slug);
            let mut item = CandidateItem::new(label.clone(), CandidateKind::Reference)
                .with_documentation(CandidateDoc::Plain(heading.raw_content.clone()))
                .with_replacement(range);
            if edit.append_paren {
                item = item.with_insert(InsertTemplate::Text(format!("{label})")));
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsp::features::completion::item::line_range;

    fn heading(slug: &str, raw: &str) -> TocHeading {
        TocHeading {
            slug: slug.to_string(),
            raw_content: raw.to_string(),
        }
    }

    #[test]
    fn test_cursor_before_existing_paren() {
        let edit = heading_link_edit("[a](#in", ")", false).unwrap();
        assert_eq!(edit.start, 4);
        assert_eq!(edit.end, 7);
        assert!(!edit.append_paren);
    }

    #[test]
    fn test_cursor_inside_existing_target() {
        // `[a](#in|tro) rest`
        let edit = heading_link_edit("[a](#in", "tro) rest", false).unwrap();
        assert_eq!(edit.end, 7 + 3);
        assert!(!edit.append_paren);

        let spaced = heading_link_edit("[a](#in", "  )", false).unwrap();
        assert_eq!(spaced.end, 7 + 2);
        assert!(!spaced.append_paren);
    }

    #[test]
    fn test_unterminated_target_appends_one_paren() {
        let edit = heading_link_edit("[a](#in", "", false).unwrap();
        assert_eq!(edit.end, 7);
        assert!(edit.append_paren);

        let word = heading_link_edit("[a](#in", "tro and more", false).unwrap();
        assert_eq!(word.end, 7 + 3);
        assert!(word.append_paren);
    }

    #[test]
    fn test_paren_after_space_separated_text_is_not_ours() {
        // `)` belongs to later prose, not to this link target
        let edit = heading_link_edit("[a](#in", "tro (see) x", false).unwrap();
        assert_eq!(edit.end, 7 + 3);
        assert!(edit.append_paren);
    }

    #[test]
    fn test_definition_never_appends_paren() {
        let edit = heading_link_edit("[a]: #in", "", true).unwrap();
        assert_eq!(edit.start, 5);
        assert!(!edit.append_paren);
        assert!(edit.is_definition);
    }

    #[test]
    fn test_candidates_follow_outline() {
        let headings = vec![heading("intro", "Intro"), heading("usage-notes", "Usage *notes*")];

        let edit = heading_link_edit("[a](#", "", false).unwrap();
        let items = heading_candidates(&headings, &edit, line_range(0, 4, 5));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "#intro");
        assert_eq!(items[0].insert_text(), "#intro)");
        assert_eq!(items[1].documentation, Some(CandidateDoc::Plain("Usage *notes*".to_string())));
        assert_eq!(items[1].replacement, Some(line_range(0, 4, 5)));

        let existing = heading_link_edit("[a](#", ")", false).unwrap();
        let items = heading_candidates(&headings, &existing, line_range(0, 4, 5));
        assert_eq!(items[0].insert_text(), "#intro");
    }
}
