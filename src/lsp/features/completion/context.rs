//! Context detection for code completion
//!
//! This module decides which kind of completion the user is asking for by
//! looking only at the cursor line. The decision is an ordered chain of
//! regex predicates: the first predicate that matches commits the request to
//! its resolver, even if a later predicate would also match.
//!
//! Order of evaluation:
//! 1. Odd run of trailing backslashes → math command (only inside math)
//! 2. Fence opener with `{` → MyST directive
//! 3. Trailing `{ident` → MyST role
//! 4. Unterminated `[` → reference link label
//! 5. Barrier: path-style completion must be enabled in the settings
//! 6. `![..](` or `<img src="` → image path
//! 7. `](#` or `]: #` → link to heading
//! 8. `](` or `]:` → file path

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::pattern::compile;

use super::heading::{HeadingEdit, heading_link_edit};

static TRAILING_BACKSLASHES: Lazy<Regex> = Lazy::new(|| compile(r"\\+$"));
static DIRECTIVE_OPENER: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*`{3,}\{([a-zA-Z\-]*)$"));
static ROLE_OPENER: Lazy<Regex> = Lazy::new(|| compile(r"\{([a-zA-Z\-]*)$"));
static OPEN_LINK_LABEL: Lazy<Regex> = Lazy::new(|| compile(r"\[[^\[\]]*$"));
static IMAGE_MARKDOWN: Lazy<Regex> = Lazy::new(|| compile(r"!\[[^\]]*?\]\([^\)]*$"));
static IMAGE_HTML: Lazy<Regex> = Lazy::new(|| compile(r#"<img [^>]*src="[^"]*$"#));
static HEADING_INLINE_LINK: Lazy<Regex> = Lazy::new(|| compile(r"\[[^\[\]]*?\]\(#[^#\)]*$"));
static HEADING_DEFINITION: Lazy<Regex> =
    Lazy::new(|| compile(r"^>? {0,3}\[[^\[\]]+?\]:[ \t\f\v]*#[^#]*$"));
static FILE_LINK: Lazy<Regex> =
    Lazy::new(|| compile(r"\[[^\[\]]*?\](?:\([^\)]*|:[ \t\f\v]*\S*)$"));
static FILE_LINK_TARGET: Lazy<Regex> = Lazy::new(|| compile(r"(?:\]\(|\]:)[ \t\f\v]*(\S*)$"));

/// Result of classifying the cursor line
///
/// Byte offsets refer to the text before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextResult {
    /// Nothing to complete
    None,

    /// After an odd run of backslashes, inside math
    MathCommand,

    /// ```` ```{name ```` on a fence line
    Directive {
        /// Identifier typed after `{`
        prefix: String,
        /// Offset just after `{`
        prefix_start: usize,
    },

    /// `{name` anywhere else
    Role {
        prefix: String,
        prefix_start: usize,
    },

    /// Inside an unterminated `[`
    ReferenceLabel {
        /// Offset just after the last `[`
        label_start: usize,
    },

    /// Image source being typed
    ImagePath {
        /// Path text after `](` or `="`
        typed: String,
    },

    /// `#anchor` link target
    HeadingLink(HeadingEdit),

    /// Generic link target
    FilePath {
        /// Path text after `](` or `]:`
        typed: String,
    },
}

impl ContextResult {
    pub fn name(&self) -> &'static str {
        match self {
            ContextResult::None => "none",
            ContextResult::MathCommand => "math-command",
            ContextResult::Directive { .. } => "directive",
            ContextResult::Role { .. } => "role",
            ContextResult::ReferenceLabel { .. } => "reference-label",
            ContextResult::ImagePath { .. } => "image-path",
            ContextResult::HeadingLink(_) => "heading-link",
            ContextResult::FilePath { .. } => "file-path",
        }
    }
}

/// Conditions some steps depend on besides the line text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The cursor sits inside a math environment
    MathEnvironment,
    /// Path-style completion is enabled in the settings
    CompletionEnabled,
}

/// Answers guard checks for one request
pub trait ContextGates {
    fn allows(&self, guard: Guard) -> bool;
}

/// Gates that allow everything; used by [`classify_context`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGates;

impl ContextGates for OpenGates {
    fn allows(&self, _guard: Guard) -> bool {
        true
    }
}

type Matcher = fn(&str, &str) -> Option<ContextResult>;

enum Step {
    /// Commit to `matcher`'s result when it matches; a failed guard turns
    /// the committed result into `None`
    Rule {
        name: &'static str,
        guard: Option<Guard>,
        matcher: Matcher,
    },
    /// Stop with `None` unless the guard passes
    Barrier(Guard),
}

const STEPS: &[Step] = &[
    Step::Rule { name: "math-command", guard: Some(Guard::MathEnvironment), matcher: match_math_command },
    Step::Rule { name: "directive", guard: None, matcher: match_directive },
    Step::Rule { name: "role", guard: None, matcher: match_role },
    Step::Rule { name: "reference-label", guard: None, matcher: match_reference_label },
    Step::Barrier(Guard::CompletionEnabled),
    Step::Rule { name: "image-path", guard: None, matcher: match_image_path },
    Step::Rule { name: "heading-link", guard: None, matcher: match_heading_link },
    Step::Rule { name: "file-path", guard: None, matcher: match_file_path },
];

/// Classify the cursor line with every guard open
///
/// Pure and total: any input yields exactly one category.
pub fn classify_context(before: &str, after: &str) -> ContextResult {
    classify_with_gates(before, after, &OpenGates)
}

/// Classify the cursor line, consulting `gates` for guarded steps
pub fn classify_with_gates(before: &str, after: &str, gates: &dyn ContextGates) -> ContextResult {
    for step in STEPS {
        match step {
            Step::Barrier(guard) => {
                if !gates.allows(*guard) {
                    trace!("Completion barrier {:?} closed", guard);
                    return ContextResult::None;
                }
            }
            Step::Rule { name, guard, matcher } => {
                let Some(result) = matcher(before, after) else {
                    continue;
                };
                if let Some(guard) = guard {
                    if !gates.allows(*guard) {
                        debug!("Context '{}' matched but guard {:?} failed", name, guard);
                        return ContextResult::None;
                    }
                }
                debug!("Completion context detected: {}", name);
                return result;
            }
        }
    }

    ContextResult::None
}

fn match_math_command(before: &str, _after: &str) -> Option<ContextResult> {
    let run = TRAILING_BACKSLASHES.find(before)?;
    (run.as_str().len() % 2 != 0).then_some(ContextResult::MathCommand)
}

fn match_directive(before: &str, _after: &str) -> Option<ContextResult> {
    let caps = DIRECTIVE_OPENER.captures(before)?;
    let prefix = caps.get(1)?;
    Some(ContextResult::Directive {
        prefix: prefix.as_str().to_string(),
        prefix_start: prefix.start(),
    })
}

fn match_role(before: &str, _after: &str) -> Option<ContextResult> {
    if DIRECTIVE_OPENER.is_match(before) {
        return None;
    }
    let caps = ROLE_OPENER.captures(before)?;
    let prefix = caps.get(1)?;
    Some(ContextResult::Role {
        prefix: prefix.as_str().to_string(),
        prefix_start: prefix.start(),
    })
}

fn match_reference_label(before: &str, _after: &str) -> Option<ContextResult> {
    if !OPEN_LINK_LABEL.is_match(before) {
        return None;
    }
    let open = before.rfind('[')?;
    Some(ContextResult::ReferenceLabel { label_start: open + 1 })
}

fn match_image_path(before: &str, _after: &str) -> Option<ContextResult> {
    let typed_start = if IMAGE_MARKDOWN.is_match(before) {
        before.rfind("](")? + 2
    } else if IMAGE_HTML.is_match(before) {
        before.rfind("=\"")? + 2
    } else {
        return None;
    };
    Some(ContextResult::ImagePath {
        typed: before[typed_start..].to_string(),
    })
}

fn match_heading_link(before: &str, after: &str) -> Option<ContextResult> {
    let is_definition = HEADING_DEFINITION.is_match(before);
    if !is_definition && !HEADING_INLINE_LINK.is_match(before) {
        return None;
    }
    heading_link_edit(before, after, is_definition).map(ContextResult::HeadingLink)
}

fn match_file_path(before: &str, _after: &str) -> Option<ContextResult> {
    if !FILE_LINK.is_match(before) {
        return None;
    }
    // A target with inner whitespace has no path token to complete
    let caps = FILE_LINK_TARGET.captures(before)?;
    Some(ContextResult::FilePath {
        typed: caps.get(1)?.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gates {
        math: bool,
        enabled: bool,
    }

    impl ContextGates for Gates {
        fn allows(&self, guard: Guard) -> bool {
            match guard {
                Guard::MathEnvironment => self.math,
                Guard::CompletionEnabled => self.enabled,
            }
        }
    }

    #[test]
    fn test_math_command_needs_odd_backslashes() {
        assert_eq!(classify_context("$x + \\", ""), ContextResult::MathCommand);
        assert_eq!(classify_context("$x + \\\\\\", ""), ContextResult::MathCommand);
        assert_eq!(classify_context("line break \\\\", ""), ContextResult::None);
    }

    #[test]
    fn test_math_command_outside_math_is_none() {
        let gates = Gates { math: false, enabled: true };
        assert_eq!(classify_with_gates("text \\", "", &gates), ContextResult::None);
    }

    #[test]
    fn test_math_guard_does_not_fall_through() {
        // `[\` would be a reference label, but the math rule commits first
        let gates = Gates { math: false, enabled: true };
        assert_eq!(classify_with_gates("[\\", "", &gates), ContextResult::None);
    }

    #[test]
    fn test_directive_wins_over_role() {
        assert_eq!(
            classify_context("```{no", ""),
            ContextResult::Directive { prefix: "no".to_string(), prefix_start: 4 }
        );
        assert_eq!(
            classify_context("  ````{code-", ""),
            ContextResult::Directive { prefix: "code-".to_string(), prefix_start: 7 }
        );
    }

    #[test]
    fn test_role_context() {
        assert_eq!(
            classify_context("See {re", ""),
            ContextResult::Role { prefix: "re".to_string(), prefix_start: 5 }
        );
        assert_eq!(
            classify_context("{", ""),
            ContextResult::Role { prefix: String::new(), prefix_start: 1 }
        );
        // Two backticks are not a fence
        assert!(matches!(classify_context("``{no", ""), ContextResult::Role { .. }));
    }

    #[test]
    fn test_reference_label_context() {
        assert_eq!(
            classify_context("See [fo", ""),
            ContextResult::ReferenceLabel { label_start: 5 }
        );
        assert_eq!(
            classify_context("[a] and [", ""),
            ContextResult::ReferenceLabel { label_start: 9 }
        );
        assert_eq!(classify_context("[done]", ""), ContextResult::None);
    }

    #[test]
    fn test_reference_label_ignores_enabled_flag() {
        let gates = Gates { math: true, enabled: false };
        assert_eq!(
            classify_with_gates("[fo", "", &gates),
            ContextResult::ReferenceLabel { label_start: 1 }
        );
    }

    #[test]
    fn test_disabled_completion_stops_path_contexts() {
        let gates = Gates { math: true, enabled: false };
        assert_eq!(classify_with_gates("![alt](img/", "", &gates), ContextResult::None);
        assert_eq!(classify_with_gates("[a](#intro", "", &gates), ContextResult::None);
        assert_eq!(classify_with_gates("[a](docs/", "", &gates), ContextResult::None);
    }

    #[test]
    fn test_image_contexts() {
        assert_eq!(
            classify_context("![alt](images/fi", ""),
            ContextResult::ImagePath { typed: "images/fi".to_string() }
        );
        assert_eq!(
            classify_context(r#"<img alt="x" src="/assets/lo"#, ""),
            ContextResult::ImagePath { typed: "/assets/lo".to_string() }
        );
        assert_eq!(
            classify_context("![alt](", ""),
            ContextResult::ImagePath { typed: String::new() }
        );
    }

    #[test]
    fn test_heading_link_before_file_path() {
        match classify_context("see [intro](#get", "") {
            ContextResult::HeadingLink(edit) => {
                assert_eq!(edit.start, 12);
                assert!(!edit.is_definition);
            }
            other => panic!("Expected heading link, got {:?}", other),
        }

        match classify_context("[intro]: #get", "") {
            ContextResult::HeadingLink(edit) => {
                assert_eq!(edit.start, 9);
                assert!(edit.is_definition);
                assert!(!edit.append_paren);
            }
            other => panic!("Expected heading link, got {:?}", other),
        }
    }

    #[test]
    fn test_file_path_contexts() {
        assert_eq!(
            classify_context("[guide](docs/gu", ""),
            ContextResult::FilePath { typed: "docs/gu".to_string() }
        );
        assert_eq!(
            classify_context("[guide]: ../other", ""),
            ContextResult::FilePath { typed: "../other".to_string() }
        );
        assert_eq!(
            classify_context("[guide](", ""),
            ContextResult::FilePath { typed: String::new() }
        );
    }

    #[test]
    fn test_file_target_with_inner_space_is_none() {
        assert_eq!(classify_context("[guide](docs gu", ""), ContextResult::None);
    }

    #[test]
    fn test_plain_text_is_none() {
        assert_eq!(classify_context("Just some prose", ""), ContextResult::None);
        assert_eq!(classify_context("", ""), ContextResult::None);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let inputs = ["```{no", "{ro", "[x", "![a](b", "[a](#c", "[a](d", "\\", "plain"];
        for input in inputs {
            assert_eq!(classify_context(input, ""), classify_context(input, ""));
        }
    }
}
