//! Static completion catalogs
//!
//! MyST directives and roles are filtered by the identifier typed after `{`.
//! The math catalog is built once per configuration from the KaTeX tables
//! plus user macros and offered whole after a backslash.

use std::collections::HashSet;

use crate::config::MacroSpec;

use super::item::{CandidateDoc, CandidateItem, CandidateKind, InsertTemplate};
use super::katex;
use super::ranking::{math_sort_key, sort_candidates};

/// A directive or role: name, one-line description, snippet typed after `{`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub snippet: &'static str,
}

const fn entry(name: &'static str, description: &'static str, snippet: &'static str) -> CatalogEntry {
    CatalogEntry { name, description, snippet }
}

pub const DIRECTIVES: &[CatalogEntry] = &[
    entry("note", "Create a note admonition", "note}\n$1\n```"),
    entry("tip", "Create a tip admonition", "tip}\n$1\n```"),
    entry("warning", "Create a warning admonition", "warning}\n$1\n```"),
    entry("important", "Create an important admonition", "important}\n$1\n```"),
    entry("danger", "Create a danger admonition", "danger}\n$1\n```"),
    entry("error", "Create an error admonition", "error}\n$1\n```"),
    entry(
        "admonition",
        "Create an admonition with a custom title",
        "admonition} ${1:Title}\n:class: ${2:note}\n\n${3:Your content here}\n```",
    ),
    entry(
        "figure",
        "Create a figure",
        "figure} ${1:image.png}\n:name: ${2:fig-label}\n:width: ${3:300px}\n\n${4:Caption text}\n```",
    ),
    entry(
        "code-block",
        "Create a code block",
        "code-block} ${1:python}\n:linenos:\n:caption: ${2:Code caption}\n\n${3:# Your code here}\n```",
    ),
    entry(
        "code-cell",
        "Create an executable code cell",
        "code-cell}\n:tags: [${1:tag1, tag2}]\n\n${2:# Your code here}\n```",
    ),
    entry("math", "Create a math block", "math}\n:label: ${1:eq-label}\n\n${2:E = mc^2}\n```"),
    entry(
        "table",
        "Create a table",
        "table} ${1:Table title}\n:name: ${2:tbl-label}\n\n| ${3:Column 1} | ${4:Column 2} |\n| --- | --- |\n| ${5:Data 1} | ${6:Data 2} |\n```",
    ),
    entry("bibliography", "Create a bibliography", "bibliography}\n```"),
    entry(
        "glossary",
        "Create a glossary",
        "glossary}\n\n${1:term}\n  ${2:Definition of the term}\n```",
    ),
    entry("contents", "Create a table of contents", "contents}\n:depth: ${1:2}\n:local:\n```"),
    entry("include", "Include another file", "include} ${1:path/to/file.md}\n```"),
    entry(
        "literalinclude",
        "Include a code file",
        "literalinclude} ${1:path/to/file.py}\n:language: ${2:python}\n:lines: ${3:1-10}\n```",
    ),
    entry("card", "Create a card layout", "card} ${1:Card title}\n\n${2:Card content}\n```"),
    entry("grid", "Create a grid layout", "grid} ${1:2}\n\n${2:Grid content}\n```"),
    entry(
        "tab-set",
        "Create tabbed content",
        "tab-set}\n\n:::{tab-item} ${1:Tab 1}\n${2:Content for tab 1}\n:::\n\n:::{tab-item} ${3:Tab 2}\n${4:Content for tab 2}\n:::\n```",
    ),
];

pub const ROLES: &[CatalogEntry] = &[
    entry("ref", "Cross-reference to a label", "ref}`${1:label-name}`"),
    entry("doc", "Link to another document", "doc}`${1:path/to/document}`"),
    entry("download", "Download link", "download}`${1:path/to/file}`"),
    entry("cite", "Citation reference", "cite}`${1:citation-key}`"),
    entry("math", "Inline math", "math}`${1:x^2 + y^2}`"),
    entry("eq", "Reference to equation", "eq}`${1:equation-label}`"),
    entry("numref", "Numbered reference", "numref}`${1:figure-label}`"),
    entry("code", "Inline code with language", "code}`${1:python} ${2:print(\"hello\")}`"),
    entry("kbd", "Keyboard input", "kbd}`${1:Ctrl+C}`"),
    entry("guilabel", "GUI label", "guilabel}`${1:File > Open}`"),
    entry("menuselection", "Menu selection", "menuselection}`${1:File --> Open}`"),
    entry("file", "File path", "file}`${1:path/to/file}`"),
    entry("term", "Glossary term", "term}`${1:terminology}`"),
    entry("abbr", "Abbreviation", "abbr}`${1:abbreviation (full form)}`"),
    entry("sup", "Superscript", "sup}`${1:text}`"),
    entry("sub", "Subscript", "sub}`${1:text}`"),
];

/// Directives whose name starts with `prefix`, in catalog order
pub fn directive_candidates(prefix: &str) -> Vec<CandidateItem> {
    entries_with_prefix(DIRECTIVES, prefix, CandidateKind::Snippet, "MyST Directive")
}

/// Roles whose name starts with `prefix`, in catalog order
pub fn role_candidates(prefix: &str) -> Vec<CandidateItem> {
    entries_with_prefix(ROLES, prefix, CandidateKind::Function, "MyST Role")
}

fn entries_with_prefix(
    catalog: &[CatalogEntry],
    prefix: &str,
    kind: CandidateKind,
    detail_prefix: &str,
) -> Vec<CandidateItem> {
    catalog
        .iter()
        .filter(|entry| entry.name.starts_with(prefix))
        .map(|entry| {
            CandidateItem::new(entry.name, kind)
                .with_insert(InsertTemplate::Snippet(entry.snippet.to_string()))
                .with_documentation(CandidateDoc::Markdown(entry.description.to_string()))
                .with_detail(format!("{}: {}", detail_prefix, entry.name))
        })
        .collect()
}

/// Math commands offered after a backslash
#[derive(Debug, Clone, Default)]
pub struct MathCatalog {
    items: Vec<CandidateItem>,
}

impl MathCatalog {
    pub fn new(macros: &[MacroSpec]) -> Self {
        let mut items = Vec::new();

        for cmd in unique(katex::ARITY_0_GROUPS) {
            items.push(
                CandidateItem::new(format!("\\{cmd}"), CandidateKind::Function)
                    .with_insert(InsertTemplate::Text(cmd.to_string())),
            );
        }
        for cmd in unique(katex::ARITY_1_GROUPS) {
            items.push(
                CandidateItem::new(format!("\\{cmd}"), CandidateKind::Function)
                    .with_insert(InsertTemplate::Snippet(format!("{cmd}{{$1}}"))),
            );
        }
        for cmd in unique(katex::ARITY_2_GROUPS) {
            items.push(
                CandidateItem::new(format!("\\{cmd}"), CandidateKind::Function)
                    .with_insert(InsertTemplate::Snippet(format!("{cmd}{{$1}}{{$2}}"))),
            );
        }

        items.push(
            CandidateItem::new("\\begin", CandidateKind::Snippet).with_insert(InsertTemplate::Snippet(format!(
                "begin{{${{1|{}|}}}}\n\t$2\n\\end{{$1}}",
                katex::ENVS.join(",")
            ))),
        );

        for spec in macros {
            items.push(macro_candidate(spec));
        }

        for item in &mut items {
            item.sort_key = math_sort_key(&item.label);
        }
        sort_candidates(&mut items);

        Self { items }
    }

    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn macro_candidate(spec: &MacroSpec) -> CandidateItem {
    let name = spec.command_name.strip_prefix('\\').unwrap_or(&spec.command_name);
    let args: String = (1..=spec.arg_count).map(|i| format!("{{${i}}}")).collect();
    CandidateItem::new(spec.command_name.clone(), CandidateKind::Function)
        .with_insert(InsertTemplate::Snippet(format!("{name}{args}")))
}

/// Names of a group list with duplicates removed, first occurrence kept
fn unique(groups: &[&[&'static str]]) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(|group| group.iter().copied())
        .filter(|name| seen.insert(*name))
        .collect()
}
