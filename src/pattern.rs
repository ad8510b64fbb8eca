//! Compilation of the crate's literal regex patterns

use regex::Regex;

/// Compiles a literal pattern held in a `Lazy` static
///
/// Every caller passes a string literal, so a failure is a programming error
/// caught by the unit tests of the module that owns the pattern.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {pattern}: {e}"))
}
