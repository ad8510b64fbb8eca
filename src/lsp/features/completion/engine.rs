//! Completion request entry point
//!
//! A `CompletionEngine` is an immutable snapshot of everything built from
//! configuration: the math catalog, compiled exclude globs, the collaborator
//! services and the workspace root. Each request classifies the cursor line
//! and runs exactly one resolver. Nothing is shared between requests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::Position;
use tracing::{debug, warn};

use crate::config::{ExcludeGlobs, Settings};
use crate::document::{byte_to_utf16_offset, utf16_to_byte_offset, DocumentSnapshot};
use crate::lsp::features::traits::{CompletionServices, OutlineOptions, ServiceError};

use super::catalog::{directive_candidates, role_candidates, MathCatalog};
use super::context::{classify_with_gates, ContextGates, ContextResult, Guard};
use super::heading::heading_candidates;
use super::item::{line_range, CandidateItem};
use super::math_env::math_environment;
use super::paths::{file_candidates, image_candidate, project_root, PathQuery};
use super::ranking::sort_candidates;
use super::reference::reference_candidates;

/// Files offered for image sources
pub const IMAGE_GLOB: &str = "**/*.{png,jpg,jpeg,svg,gif,webp}";

/// Files offered for link targets
pub const FILE_GLOB: &str = "**/*";

pub struct CompletionEngine {
    settings: Settings,
    math: MathCatalog,
    exclude: ExcludeGlobs,
    services: CompletionServices,
    workspace_root: Option<PathBuf>,
}

impl std::fmt::Debug for CompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEngine")
            .field("workspace_root", &self.workspace_root)
            .field("math_commands", &self.math.len())
            .field("exclude", &self.exclude.patterns())
            .finish()
    }
}

/// The cursor line split at the cursor
struct CursorLine {
    line: u32,
    text: String,
    cursor: usize,
}

impl CursorLine {
    fn before(&self) -> &str {
        &self.text[..self.cursor]
    }

    fn after(&self) -> &str {
        &self.text[self.cursor..]
    }

    fn column(&self, byte: usize) -> u32 {
        byte_to_utf16_offset(&self.text, byte)
    }
}

/// Guard answers for one request; the math check scans the document only
/// when asked
struct RequestGates<'a> {
    document: &'a DocumentSnapshot,
    cursor: &'a CursorLine,
    enabled: bool,
}

impl ContextGates for RequestGates<'_> {
    fn allows(&self, guard: Guard) -> bool {
        match guard {
            Guard::CompletionEnabled => self.enabled,
            Guard::MathEnvironment => {
                let preceding: Vec<String> = (0..self.cursor.line)
                    .filter_map(|line| self.document.line_text(line))
                    .collect();
                math_environment(preceding.iter().map(String::as_str), self.cursor.before()).is_math()
            }
        }
    }
}

impl CompletionEngine {
    pub fn new(settings: Settings, services: CompletionServices, workspace_root: Option<PathBuf>) -> Self {
        let math = MathCatalog::new(&settings.macro_specs());
        let exclude = settings.exclude_globs();
        debug!(
            "Built completion engine: {} math commands, {} exclude patterns, root {:?}",
            math.len(),
            exclude.patterns().len(),
            workspace_root
        );
        Self {
            settings,
            math,
            exclude,
            services,
            workspace_root,
        }
    }

    /// Engine backed by the default filesystem and markdown services
    pub fn with_default_services(settings: Settings, workspace_root: Option<PathBuf>) -> Self {
        let services = crate::services::default_services(&settings);
        Self::new(settings, services, workspace_root)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    pub fn math_catalog(&self) -> &MathCatalog {
        &self.math
    }

    /// Candidates for the cursor position.
    ///
    /// `None` means completion does not apply here or the request was
    /// cancelled; an empty list means it applies but nothing matched.
    pub async fn provide_completions(
        &self,
        document: &DocumentSnapshot,
        position: Position,
        cancel: &CancellationToken,
    ) -> Option<Vec<CandidateItem>> {
        let text = document.line_text(position.line)?;
        let cursor = utf16_to_byte_offset(&text, position.character as usize);
        let line = CursorLine {
            line: position.line,
            text,
            cursor,
        };

        let gates = RequestGates {
            document,
            cursor: &line,
            enabled: self.settings.completion.enabled,
        };
        let context = classify_with_gates(line.before(), line.after(), &gates);
        debug!(
            "Completion at {}:{} in {}: {}",
            position.line,
            position.character,
            document.uri,
            context.name()
        );

        let cursor_column = line.column(line.cursor);
        match context {
            ContextResult::None => None,
            ContextResult::MathCommand => Some(self.math.items().to_vec()),
            ContextResult::Directive { prefix, prefix_start } => {
                let range = line_range(line.line, line.column(prefix_start), cursor_column);
                Some(
                    directive_candidates(&prefix)
                        .into_iter()
                        .map(|item| item.with_replacement(range))
                        .collect(),
                )
            }
            ContextResult::Role { prefix, prefix_start } => {
                let range = line_range(line.line, line.column(prefix_start), cursor_column);
                Some(
                    role_candidates(&prefix)
                        .into_iter()
                        .map(|item| item.with_replacement(range))
                        .collect(),
                )
            }
            ContextResult::ReferenceLabel { label_start } => {
                let range = line_range(line.line, line.column(label_start), cursor_column);
                reference_candidates(&document.full_text(), range, cancel)
            }
            ContextResult::ImagePath { typed } => self.image_paths(document, &typed, cancel).await,
            ContextResult::HeadingLink(edit) => {
                let range = line_range(line.line, line.column(edit.start), line.column(edit.end));
                let headings = self.services.outline.headings(document, OutlineOptions::default());
                Some(heading_candidates(&headings, &edit, range))
            }
            ContextResult::FilePath { typed } => self.file_paths(document, &typed, cancel).await,
        }
    }

    fn path_query(&self, document: &DocumentSnapshot, typed: &str, root: &Path) -> PathQuery {
        let project_root = project_root(root, &self.settings.completion.root);
        let document_dir = document
            .path()
            .and_then(|path| path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| project_root.clone());
        PathQuery::new(typed, &document_dir, &project_root)
    }

    /// Enumerate workspace files; `None` on cancellation, empty on failure
    async fn enumerate(&self, root: &Path, include: &str, cancel: &CancellationToken) -> Option<Vec<PathBuf>> {
        if cancel.is_cancelled() {
            return None;
        }
        let result = self
            .services
            .files
            .find_files(root, include, &self.exclude, cancel)
            .await;
        if cancel.is_cancelled() {
            return None;
        }

        match result {
            Ok(files) => Some(files),
            Err(ServiceError::Cancelled) => None,
            Err(e) => {
                warn!("File enumeration for '{}' failed: {}", include, e);
                Some(Vec::new())
            }
        }
    }

    async fn image_paths(
        &self,
        document: &DocumentSnapshot,
        typed: &str,
        cancel: &CancellationToken,
    ) -> Option<Vec<CandidateItem>> {
        let Some(root) = self.workspace_root.as_deref() else {
            debug!("Image completion needs a workspace root");
            return Some(Vec::new());
        };
        let query = self.path_query(document, typed, root);
        let files = self.enumerate(root, IMAGE_GLOB, cancel).await?;

        let labelled: Vec<(String, PathBuf)> = files
            .into_iter()
            .filter_map(|file| query.label_for(&file).map(|label| (label, file)))
            .collect();

        let images = Arc::clone(&self.services.images);
        let probe_cancel = cancel.clone();
        let probed = tokio::task::spawn_blocking(move || {
            let mut items = Vec::with_capacity(labelled.len());
            for (label, file) in labelled {
                if probe_cancel.is_cancelled() {
                    break;
                }
                match images.probe(&file) {
                    Ok(dimensions) => items.push(image_candidate(&label, &file, dimensions)),
                    Err(e) => warn!("Skipping image {}: {}", file.display(), e),
                }
            }
            items
        })
        .await;

        if cancel.is_cancelled() {
            return None;
        }
        let mut items = match probed {
            Ok(items) => items,
            Err(e) => {
                warn!("Image probing task failed: {}", e);
                Vec::new()
            }
        };
        sort_candidates(&mut items);
        Some(items)
    }

    async fn file_paths(
        &self,
        document: &DocumentSnapshot,
        typed: &str,
        cancel: &CancellationToken,
    ) -> Option<Vec<CandidateItem>> {
        let Some(root) = self.workspace_root.as_deref() else {
            debug!("File completion needs a workspace root");
            return None;
        };
        let query = self.path_query(document, typed, root);
        let files = self.enumerate(root, FILE_GLOB, cancel).await?;

        let mut items = file_candidates(&files, &query);
        sort_candidates(&mut items);
        Some(items)
    }
}
