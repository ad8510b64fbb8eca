//! Document outline from pulldown-cmark heading events

use std::collections::HashMap;
use std::ops::Range;

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use tracing::trace;

use crate::document::DocumentSnapshot;
use crate::pattern::compile;
use crate::lsp::features::traits::{OutlineOptions, OutlineProvider, TocHeading};

static OMIT_COMMENT: Lazy<Regex> = Lazy::new(|| compile(r"(?i)<!--\s*omit\s+(?:in|from)\s+toc\s*-->"));

/// Outline provider parsing ATX and setext headings
#[derive(Debug, Clone, Default)]
pub struct PulldownOutline {
    /// Heading lines such as `## Changelog` left out on request
    omitted: Vec<String>,
}

/// A heading as parsed, before omission rules and slug numbering
#[derive(Debug, Clone)]
struct ParsedHeading {
    level: usize,
    text: String,
    raw_content: String,
    magic_omit: bool,
}

impl PulldownOutline {
    pub fn new(omitted_from_toc: Vec<String>) -> Self {
        Self {
            omitted: omitted_from_toc.into_iter().map(|line| line.trim().to_string()).collect(),
        }
    }

    fn parse(text: &str) -> Vec<ParsedHeading> {
        let mut headings = Vec::new();
        let mut current: Option<(usize, Range<usize>, String)> = None;

        let parser = Parser::new_ext(text, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS).into_offset_iter();
        for (event, range) in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((heading_level(level), range, String::new()));
                }
                Event::Text(t) | Event::Code(t) => {
                    if let Some((_, _, plain)) = current.as_mut() {
                        plain.push_str(&t);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    let Some((level, range, plain)) = current.take() else {
                        continue;
                    };
                    let source = &text[range.clone()];
                    let raw = raw_content(source);
                    let magic_omit = OMIT_COMMENT.is_match(source) || preceded_by_omit_comment(text, range.start);
                    headings.push(ParsedHeading {
                        level,
                        text: plain.trim().to_string(),
                        raw_content: OMIT_COMMENT.replace_all(&raw, "").trim().to_string(),
                        magic_omit,
                    });
                }
                _ => {}
            }
        }

        headings
    }
}

impl OutlineProvider for PulldownOutline {
    fn headings(&self, document: &DocumentSnapshot, options: OutlineOptions) -> Vec<TocHeading> {
        let text = document.full_text();
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut outline = Vec::new();

        for heading in Self::parse(&text) {
            // Slugs are numbered across every heading so anchors stay stable
            let slug = unique_slug(&slugify(&heading.text), &mut seen);

            if options.respect_magic_comment_omit && heading.magic_omit {
                continue;
            }
            if options.respect_project_level_omit {
                let line = format!("{} {}", "#".repeat(heading.level), heading.raw_content);
                if self.omitted.contains(&line) {
                    continue;
                }
            }

            outline.push(TocHeading {
                slug,
                raw_content: heading.raw_content,
            });
        }

        trace!("Outline of {} has {} headings", document.uri, outline.len());
        outline
    }
}

fn heading_level(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Heading source without its markers
fn raw_content(source: &str) -> String {
    let trimmed = source.trim_start_matches(' ');
    if trimmed.starts_with('#') {
        let line = trimmed.lines().next().unwrap_or_default();
        let body = line.trim_start_matches('#').trim();
        return strip_closing_sequence(body).to_string();
    }

    // Setext: every line but the underline
    let lines: Vec<&str> = source.trim_end().lines().collect();
    let content = lines.split_last().map(|(_, rest)| rest).unwrap_or_default();
    content.iter().map(|line| line.trim()).collect::<Vec<_>>().join(" ")
}

fn strip_closing_sequence(body: &str) -> &str {
    let without = body.trim_end_matches('#');
    if without.len() == body.len() {
        return body;
    }
    if without.is_empty() || without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        body
    }
}

fn preceded_by_omit_comment(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end_matches(['\r', '\n']);
    let previous = before.rsplit('\n').next().unwrap_or_default().trim();
    OMIT_COMMENT.find(previous).is_some_and(|m| m.as_str().len() == previous.len())
}

/// GitHub-style anchor slug
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

fn unique_slug(base: &str, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(base.to_string()).or_insert(0);
    let slug = if *count == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    slug
}
