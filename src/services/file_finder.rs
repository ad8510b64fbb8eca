//! Workspace file enumeration with walkdir and globset

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use globset::{Glob, GlobMatcher};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::ExcludeGlobs;
use crate::lsp::features::traits::{FileFinder, ServiceError};

/// Walks the workspace on the blocking pool
///
/// Excluded directories are pruned before descending, so a large
/// `node_modules` costs one match instead of a full walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirFileFinder;

impl WalkdirFileFinder {
    pub fn new() -> Self {
        Self
    }

    fn walk(
        root: &Path,
        include: &GlobMatcher,
        exclude: &ExcludeGlobs,
        cancel: &CancellationToken,
    ) -> Result<Vec<PathBuf>, ServiceError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| match entry.path().strip_prefix(root) {
                Ok(relative) if relative.as_os_str().is_empty() => true,
                Ok(relative) => !exclude.is_excluded(relative),
                Err(_) => false,
            });

        for entry in walker {
            if cancel.is_cancelled() {
                return Err(ServiceError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                // The root itself is unreadable: nothing to offer
                Err(e) if e.depth() == 0 => {
                    return Err(ServiceError::Walk {
                        path: root.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    trace!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if include.is_match(relative) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl FileFinder for WalkdirFileFinder {
    async fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: &ExcludeGlobs,
        cancel: &CancellationToken,
    ) -> Result<Vec<PathBuf>, ServiceError> {
        let matcher = Glob::new(include)
            .map_err(|source| ServiceError::Glob {
                pattern: include.to_string(),
                source,
            })?
            .compile_matcher();

        let root = root.to_path_buf();
        let exclude = exclude.clone();
        let cancel = cancel.clone();

        let files = tokio::task::spawn_blocking(move || Self::walk(&root, &matcher, &exclude, &cancel))
            .await
            .map_err(|e| ServiceError::Task(e.to_string()))??;

        debug!("Found {} files matching '{}'", files.len(), include);
        Ok(files)
    }
}
