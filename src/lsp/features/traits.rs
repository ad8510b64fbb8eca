//! Collaborator contracts consumed by the completion engine
//!
//! The engine never walks the filesystem, decodes images or parses headings
//! itself. It talks to these traits, which keeps every resolver testable with
//! in-memory fakes and lets a host swap in its own services.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  CompletionEngine                   │
//! │  (classifier + resolvers)           │
//! └──────────────┬──────────────────────┘
//!                │ uses
//! ┌──────────────▼──────────────────────┐
//! │  CompletionServices                 │
//! │  + OutlineProvider                  │
//! │  + FileFinder (async)               │
//! │  + ImageMetadataProvider            │
//! └──────────────┬──────────────────────┘
//!                │ implements
//! ┌──────────────▼──────────────────────┐
//! │  crate::services defaults           │
//! │  (pulldown-cmark, walkdir, header)  │
//! └─────────────────────────────────────┘
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::ExcludeGlobs;
use crate::document::DocumentSnapshot;

/// Failure inside a collaborator service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to enumerate {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("failed to read image metadata for {path}: {message}")]
    ImageProbe { path: PathBuf, message: String },

    #[error("enumeration task failed: {0}")]
    Task(String),

    #[error("request cancelled")]
    Cancelled,
}

/// A heading from the document outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocHeading {
    /// Anchor slug, without the leading `#`
    pub slug: String,
    /// Heading source text without its markers
    pub raw_content: String,
}

/// Which omission rules the outline should honour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Drop headings carrying an `<!-- omit in toc -->` comment
    pub respect_magic_comment_omit: bool,
    /// Drop headings listed in the project settings
    pub respect_project_level_omit: bool,
}

/// Supplies the ordered heading list of a document
pub trait OutlineProvider: Send + Sync {
    fn headings(&self, document: &DocumentSnapshot, options: OutlineOptions) -> Vec<TocHeading>;
}

/// Enumerates workspace files
#[async_trait]
pub trait FileFinder: Send + Sync {
    /// Find files under `root` matching `include`, skipping anything matched
    /// by `exclude`. Implementations should stop early once `cancel` fires.
    async fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: &ExcludeGlobs,
        cancel: &CancellationToken,
    ) -> Result<Vec<PathBuf>, ServiceError>;
}

/// Pixel dimensions of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Reads image dimensions; failures are per file
pub trait ImageMetadataProvider: Send + Sync {
    fn probe(&self, path: &Path) -> Result<ImageDimensions, ServiceError>;
}

/// The collaborator bundle handed to the completion engine
#[derive(Clone)]
pub struct CompletionServices {
    pub outline: Arc<dyn OutlineProvider>,
    pub files: Arc<dyn FileFinder>,
    pub images: Arc<dyn ImageMetadataProvider>,
}

impl fmt::Debug for CompletionServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionServices").finish_non_exhaustive()
    }
}
