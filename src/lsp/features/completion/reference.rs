//! Reference-style link label completion
//!
//! Typing `[` offers the labels of every `[label]: destination "title"`
//! definition in the document. Labels are matched case-insensitively, the
//! first definition of a label decides its displayed case, and labels nobody
//! references yet are listed first.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::Range;
use tracing::{debug, trace};

use crate::pattern::compile;

use super::item::{CandidateDoc, CandidateItem, CandidateKind};
use super::ranking::{sort_candidates, usage_sort_key};

/// Whitespace recognised around labels and destinations
const LABEL_WHITESPACE: &[char] = &[' ', '\t', '\r', '\n', '\u{0C}', '\u{0B}'];

/// A link reference definition line.
///
/// The label may span lines and may contain `\]`. The destination is either
/// `<...>` or a run without whitespace, optionally followed by a quoted title,
/// and must end the line.
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r"(?mR)^>? {0,3}\[[ \t\r\n\f\v]*",
        r"(?P<label>(?:[^\]]|\\\])*)",
        r"\]:[ \t\r\n\f\v]*",
        r"(?P<link><[^>]*>|[^< \t\r\n\f\v]+)",
        r#"(?P<title>[ \t\r\n\f\v]+(?:"(?:[^"]|\\")*"|'(?:[^']|\\')*'))?$"#,
    ))
});

/// A bracketed span on one line; callers reject spans followed by `(`, `:` or `[`
static BRACKETED: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\[\]]+?)\]"));

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| compile(r"\r?\n"));

/// A defined label and how often the document references it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    /// Label as written in its first definition
    pub label: String,
    pub usage_count: usize,
}

/// Definitions of one document keyed by uppercased label
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    records: HashMap<String, ReferenceDefinition>,
}

impl ReferenceIndex {
    /// Collect every definition in `text`. Usage counts start at zero.
    pub fn build(text: &str) -> Self {
        let mut records = HashMap::new();
        let mut pos = 0;

        while let Some(caps) = DEFINITION.captures_at(text, pos) {
            let Some(raw) = caps.name("label") else {
                break;
            };
            // Resume right after the label so a definition's tail can't hide the next one
            pos = raw.end();

            let label = raw.as_str().trim_matches(LABEL_WHITESPACE);
            records
                .entry(normalize(label))
                .or_insert_with(|| ReferenceDefinition {
                    label: label.to_string(),
                    usage_count: 0,
                });
        }

        trace!("Indexed {} reference definitions", records.len());
        Self { records }
    }

    /// Count bracketed usages of indexed labels, line by line
    pub fn count_usages(&mut self, text: &str) {
        for line in LINE_BREAK.split(text) {
            for caps in BRACKETED.captures_iter(line) {
                let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if matches!(line[whole.end()..].chars().next(), Some('(' | ':' | '[')) {
                    continue;
                }
                if let Some(record) = self.records.get_mut(&normalize(label.as_str())) {
                    record.usage_count += 1;
                }
            }
        }
    }

    /// Look up a label case-insensitively
    pub fn get(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.records.get(&normalize(label))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ReferenceDefinition> {
        self.records.values()
    }
}

fn normalize(label: &str) -> String {
    label.to_uppercase()
}

/// Candidates for the label being typed after `[`
///
/// Returns `None` when the document defines no labels or the request was
/// cancelled. `range` covers the typed label text.
pub fn reference_candidates(
    text: &str,
    range: Range,
    cancel: &CancellationToken,
) -> Option<Vec<CandidateItem>> {
    let mut index = ReferenceIndex::build(text);
    if index.is_empty() || cancel.is_cancelled() {
        return None;
    }

    index.count_usages(text);
    if cancel.is_cancelled() {
        debug!("Reference completion cancelled after usage scan");
        return None;
    }

    let mut items: Vec<CandidateItem> = index
        .definitions()
        .map(|def| {
            let detail = if def.usage_count == 1 {
                "1 usage".to_string()
            } else {
                format!("{} usages", def.usage_count)
            };
            CandidateItem::new(def.label.clone(), CandidateKind::Reference)
                .with_documentation(CandidateDoc::Markdown(def.label.clone()))
                .with_detail(detail)
                .with_sort_key(usage_sort_key(&def.label, def.usage_count))
                .with_replacement(range)
        })
        .collect();

    sort_candidates(&mut items);
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsp::features::completion::item::line_range;
    use indoc::indoc;
    use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

    #[test]
    fn test_first_definition_wins() {
        let text = "[a]: /x \"t\"\n\nSee [a] and [A].\n";
        let mut index = ReferenceIndex::build(text);
        index.count_usages(text);

        assert_eq!(index.len(), 1);
        let record = index.get("A").unwrap();
        assert_eq!(record.label, "a");
        assert_eq!(record.usage_count, 2);
    }

    #[test]
    fn test_definition_forms() {
        let text = indoc! {r#"
            [plain]: https://example.com
            > [quoted]: <has space.md>
               [indented]: ./x.md 'single title'
                [too-deep]: ./four-spaces.md
            [ padded ]: /y "escaped \" title"
            [esc\]aped]: /z
            [no-dest]:
            [trailing]: /a junk
        "#};
        let index = ReferenceIndex::build(text);

        assert!(index.get("plain").is_some());
        assert!(index.get("quoted").is_some());
        assert!(index.get("indented").is_some());
        assert_eq!(index.get("padded").map(|d| d.label.as_str()), Some("padded"));
        assert!(index.get("esc\\]aped").is_some());
        assert!(index.get("too-deep").is_none());
        assert!(index.get("no-dest").is_none());
        assert!(index.get("trailing").is_none());
    }

    #[test]
    fn test_crlf_definitions() {
        let text = "[one]: /1\r\n[two]: /2 \"t\"\r\n";
        let index = ReferenceIndex::build(text);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_usage_scan_skips_links_and_definitions() {
        let text = indoc! {"
            [ref]: /target
            [ref](inline) [ref][other] [ref]: x
            [ref] and [REF] and [undefined]
        "};
        let mut index = ReferenceIndex::build(text);
        index.count_usages(text);
        assert_eq!(index.get("ref").unwrap().usage_count, 2);
    }

    #[test]
    fn test_candidates_prefer_unused_labels() {
        let text = indoc! {"
            [used]: /u
            [Zeta]: /z
            [alpha]: /a

            See [used] twice [used].
        "};
        let range = line_range(5, 1, 1);
        let items = reference_candidates(text, range, &CancellationToken::new()).unwrap();
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "alpha", "used"]);

        assert_eq!(items[0].sort_key, "0-Zeta");
        assert_eq!(items[0].detail.as_deref(), Some("0 usages"));
        assert_eq!(items[2].sort_key, "1-used");
        assert_eq!(items[2].detail.as_deref(), Some("2 usages"));
        assert_eq!(items[2].documentation, Some(CandidateDoc::Markdown("used".to_string())));
        assert_eq!(items[2].replacement, Some(range));
    }

    #[test]
    fn test_single_usage_detail() {
        let text = "[x]: /x\n[x]\n";
        let items = reference_candidates(text, line_range(0, 0, 0), &CancellationToken::new()).unwrap();
        assert_eq!(items[0].detail.as_deref(), Some("1 usage"));
    }

    #[test]
    fn test_no_definitions_or_cancelled() {
        let token = CancellationToken::new();
        assert!(reference_candidates("no refs [here]", line_range(0, 0, 0), &token).is_none());

        token.cancel();
        assert!(reference_candidates("[a]: /a", line_range(0, 0, 0), &token).is_none());
    }

    const POOL: &[&str] = &["alpha", "Beta", "gamma-1", "delta two"];

    #[derive(Clone, Debug)]
    enum DocLine {
        Definition { label: usize, upper: bool },
        Usage { label: usize, upper: bool },
        Prose,
    }

    impl DocLine {
        fn label(index: usize, upper: bool) -> String {
            let base = POOL[index % POOL.len()];
            if upper { base.to_uppercase() } else { base.to_string() }
        }

        fn render(&self) -> String {
            match self {
                DocLine::Definition { label, upper } => format!("[{}]: /target", Self::label(*label, *upper)),
                DocLine::Usage { label, upper } => format!("See [{}] here.", Self::label(*label, *upper)),
                DocLine::Prose => "Plain text.".to_string(),
            }
        }
    }

    impl Arbitrary for DocLine {
        fn arbitrary(g: &mut Gen) -> Self {
            let label = usize::arbitrary(g) % POOL.len();
            let upper = bool::arbitrary(g);
            match u8::arbitrary(g) % 3 {
                0 => DocLine::Definition { label, upper },
                1 => DocLine::Usage { label, upper },
                _ => DocLine::Prose,
            }
        }
    }

    fn render(lines: &[DocLine]) -> String {
        lines.iter().map(DocLine::render).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_prop_one_record_per_label_with_first_case() {
        fn prop(lines: Vec<DocLine>) -> TestResult {
            let text = render(&lines);
            let index = ReferenceIndex::build(&text);

            let mut expected: HashMap<String, String> = HashMap::new();
            for line in &lines {
                if let DocLine::Definition { label, upper } = line {
                    let label = DocLine::label(*label, *upper);
                    expected.entry(label.to_uppercase()).or_insert(label);
                }
            }

            assert_eq!(index.len(), expected.len());
            for (key, first) in &expected {
                assert_eq!(&index.get(key).unwrap().label, first);
            }
            TestResult::passed()
        }
        QuickCheck::new().tests(200).quickcheck(prop as fn(Vec<DocLine>) -> TestResult);
    }

    #[test]
    fn test_prop_usage_counts_and_ordering() {
        fn prop(lines: Vec<DocLine>) -> TestResult {
            let text = render(&lines);
            let Some(items) = reference_candidates(&text, line_range(0, 0, 0), &CancellationToken::new()) else {
                let has_definition = lines.iter().any(|l| matches!(l, DocLine::Definition { .. }));
                return TestResult::from_bool(!has_definition);
            };

            for item in &items {
                let uses = lines
                    .iter()
                    .filter(|l| match l {
                        DocLine::Usage { label, .. } => POOL[*label].eq_ignore_ascii_case(&item.label),
                        _ => false,
                    })
                    .count();
                let expected = if uses == 1 { "1 usage".to_string() } else { format!("{uses} usages") };
                assert_eq!(item.detail.as_deref(), Some(expected.as_str()));
            }

            let first_used = items.iter().position(|i| i.sort_key.starts_with("1-"));
            if let Some(first_used) = first_used {
                assert!(items[first_used..].iter().all(|i| i.sort_key.starts_with("1-")));
            }
            TestResult::passed()
        }
        QuickCheck::new().tests(200).quickcheck(prop as fn(Vec<DocLine>) -> TestResult);
    }
}
