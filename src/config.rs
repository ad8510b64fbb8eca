//! Server settings
//!
//! Settings arrive as JSON through LSP `initializationOptions` and
//! `workspace/didChangeConfiguration`. Every field has a default so a client
//! that sends nothing (or only part of the tree) still gets a working server.
//!
//! ```json
//! {
//!   "completion": { "enabled": true, "root": "site", "respectSearchExclude": true },
//!   "searchExclude": { "**/dist": true },
//!   "katex": { "macros": { "\\RR": "\\mathbb{R}" } },
//!   "toc": { "omittedFromToc": ["# Changelog"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Patterns excluded from every workspace enumeration.
pub const ALWAYS_EXCLUDE: [&str; 4] = [
    "**/node_modules",
    "**/bower_components",
    "**/*.code-search",
    "**/.git",
];

/// Highest numbered placeholder a TeX macro can take.
const MAX_MACRO_ARGS: usize = 9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// Top-level settings tree
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub completion: CompletionSettings,
    /// Client search-exclude map (`pattern -> enabled`)
    pub search_exclude: BTreeMap<String, bool>,
    pub katex: KatexSettings,
    pub toc: TocSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionSettings {
    /// Enables image, heading-link and file path completion
    pub enabled: bool,
    /// Project root override, relative to the workspace root
    pub root: String,
    /// Honour `searchExclude` when enumerating workspace files
    pub respect_search_exclude: bool,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            root: String::new(),
            respect_search_exclude: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct KatexSettings {
    /// User macros: command name (with leading backslash) to expansion
    pub macros: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TocSettings {
    /// Raw heading lines (e.g. `## Changelog`) left out of the outline
    pub omitted_from_toc: Vec<String>,
}

impl Settings {
    /// Parse settings from a JSON value.
    ///
    /// Accepts both the bare tree and one nested under a `"myst"` key.
    /// `null` yields the defaults.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let tree = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map.get("myst").unwrap_or(value),
            other => other,
        };
        Ok(Settings::deserialize(tree)?)
    }

    /// Macros from `katex.macros`, in command-name order
    pub fn macro_specs(&self) -> Vec<MacroSpec> {
        self.katex
            .macros
            .iter()
            .map(|(name, expansion)| MacroSpec::new(name, expansion))
            .collect()
    }

    /// Compile the exclude set used by workspace file enumeration
    pub fn exclude_globs(&self) -> ExcludeGlobs {
        let mut patterns: Vec<String> = ALWAYS_EXCLUDE.iter().map(|p| p.to_string()).collect();

        if self.completion.respect_search_exclude {
            for (pattern, enabled) in &self.search_exclude {
                if *enabled && !patterns.contains(pattern) {
                    patterns.push(pattern.clone());
                }
            }
        }

        ExcludeGlobs::new(patterns)
    }
}

/// User-defined math macro with its inferred argument count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroSpec {
    pub command_name: String,
    pub expansion: String,
    pub arg_count: usize,
}

impl MacroSpec {
    pub fn new(command_name: &str, expansion: &str) -> Self {
        Self {
            command_name: command_name.to_string(),
            expansion: expansion.to_string(),
            arg_count: infer_arg_count(expansion),
        }
    }
}

/// Number of leading consecutive `#1`, `#2`, ... placeholders.
///
/// Stops at the first missing index, so `"#1 ... #3"` takes one argument.
pub fn infer_arg_count(expansion: &str) -> usize {
    (1..=MAX_MACRO_ARGS)
        .take_while(|i| expansion.contains(&format!("#{i}")))
        .count()
}

/// Compiled exclude patterns
#[derive(Debug, Clone)]
pub struct ExcludeGlobs {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ExcludeGlobs {
    pub fn new(patterns: Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut accepted = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            match Glob::new(&pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    accepted.push(pattern);
                }
                Err(e) => warn!("Skipping invalid exclude pattern '{}': {}", pattern, e),
            }
        }

        let set = builder.build().unwrap_or_else(|e| {
            warn!("Failed to compile exclude globs, excluding nothing: {}", e);
            GlobSet::empty()
        });

        debug!("Compiled {} exclude patterns", accepted.len());
        Self { patterns: accepted, set }
    }

    /// Patterns that compiled successfully
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a workspace-relative path is excluded
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.set.is_match(relative)
    }
}

impl Default for ExcludeGlobs {
    fn default() -> Self {
        Settings::default().exclude_globs()
    }
}
