//! Path completion for image sources and link targets
//!
//! The typed token decides the base directory: a token starting with `/` is
//! rooted at the project root, anything else is relative to the document.
//! Every workspace file is then offered relative to that base.

use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::lsp::features::traits::ImageDimensions;

use super::item::{CandidateDoc, CandidateItem, CandidateKind};
use super::ranking::path_sort_key;

/// Widest image preview shown in candidate documentation
const MAX_PREVIEW_WIDTH: u32 = 318;

/// Base directory and rootedness of a typed path token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    pub base_dir: PathBuf,
    /// The token started with `/`
    pub rooted: bool,
}

impl PathQuery {
    pub fn new(typed: &str, document_dir: &Path, project_root: &Path) -> Self {
        Self {
            base_dir: base_directory(typed, document_dir, project_root),
            rooted: typed.starts_with('/'),
        }
    }

    /// Label for `file` relative to the base, or `None` when a rooted query
    /// would have to climb out of the project root
    pub fn label_for(&self, file: &Path) -> Option<String> {
        let relative = pathdiff::diff_paths(file, &self.base_dir)?;
        let label = relative.to_string_lossy().replace('\\', "/");
        if self.rooted && label.starts_with("..") {
            trace!("Skipping {} outside the project root", file.display());
            return None;
        }
        Some(label)
    }
}

/// Directory part of a typed token, including the trailing `/`
pub fn typed_directory(typed: &str) -> &str {
    match typed.rfind('/') {
        Some(slash) => &typed[..=slash],
        None => "",
    }
}

/// Project root: the workspace root, or the configured override below it
/// when that directory exists
pub fn project_root(workspace_root: &Path, root_override: &str) -> PathBuf {
    if !root_override.is_empty() {
        let candidate = workspace_root.join(root_override);
        if candidate.exists() {
            return candidate;
        }
        trace!("Project root override {} does not exist", candidate.display());
    }
    workspace_root.to_path_buf()
}

/// Directory the typed token's candidates are relative to
pub fn base_directory(typed: &str, document_dir: &Path, project_root: &Path) -> PathBuf {
    let dir = typed_directory(typed);
    let joined = match dir.strip_prefix('/') {
        Some(rooted) => project_root.join(rooted.trim_start_matches('/')),
        None => document_dir.join(dir),
    };
    normalize_lexically(&joined)
}

/// Resolve `.` and `..` components without touching the filesystem
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_))) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Link targets can't carry raw spaces
pub fn encode_spaces(label: &str) -> String {
    label.replace(' ', "%20")
}

/// Candidates for generic link targets
pub fn file_candidates(files: &[PathBuf], query: &PathQuery) -> Vec<CandidateItem> {
    files
        .iter()
        .filter_map(|file| query.label_for(file))
        .map(|label| {
            let label = encode_spaces(&label);
            let sort_key = path_sort_key(&label);
            CandidateItem::new(label, CandidateKind::File).with_sort_key(sort_key)
        })
        .collect()
}

/// Candidate for one image, with a sized preview as documentation
pub fn image_candidate(label: &str, file: &Path, dimensions: ImageDimensions) -> CandidateItem {
    CandidateItem::new(encode_spaces(label), CandidateKind::File)
        .with_documentation(CandidateDoc::Markdown(image_preview(label, file, dimensions)))
        .with_sort_key(path_sort_key(label))
}

/// Markdown preview of an image, scaled down to the preview width
pub fn image_preview(label: &str, file: &Path, dimensions: ImageDimensions) -> String {
    let (width, height) = if dimensions.width > MAX_PREVIEW_WIDTH {
        let scaled = f64::from(dimensions.height) * f64::from(MAX_PREVIEW_WIDTH) / f64::from(dimensions.width);
        (MAX_PREVIEW_WIDTH, scaled)
    } else {
        (dimensions.width, f64::from(dimensions.height))
    };

    format!(
        "![{}]({}|width={},height={})",
        label,
        encode_spaces(&file.to_string_lossy()),
        width,
        height
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_directory() {
        assert_eq!(typed_directory("images/fig.png"), "images/");
        assert_eq!(typed_directory("/images/fi"), "/images/");
        assert_eq!(typed_directory("fig"), "");
        assert_eq!(typed_directory(""), "");
        assert_eq!(typed_directory("a/b/"), "a/b/");
    }

    #[test]
    fn test_relative_base_follows_document() {
        let query = PathQuery::new("images/fig.png", Path::new("/proj/docs"), Path::new("/proj"));
        assert_eq!(query.base_dir, PathBuf::from("/proj/docs/images"));
        assert!(!query.rooted);

        let up = PathQuery::new("../shared/x", Path::new("/proj/docs"), Path::new("/proj"));
        assert_eq!(up.base_dir, PathBuf::from("/proj/shared"));
    }

    #[test]
    fn test_rooted_base_uses_project_root() {
        let query = PathQuery::new("/images/fig.png", Path::new("/proj/docs"), Path::new("/proj/site"));
        assert_eq!(query.base_dir, PathBuf::from("/proj/site/images"));
        assert!(query.rooted);

        let bare = PathQuery::new("/fig", Path::new("/proj/docs"), Path::new("/proj/site"));
        assert_eq!(bare.base_dir, PathBuf::from("/proj/site"));
    }

    #[test]
    fn test_rooted_query_excludes_files_outside_root() {
        let query = PathQuery::new("/images/", Path::new("/proj/docs"), Path::new("/proj/site"));
        assert_eq!(
            query.label_for(Path::new("/proj/site/images/logo.png")).as_deref(),
            Some("logo.png")
        );
        assert_eq!(query.label_for(Path::new("/proj/site/other.png")), None);
        assert_eq!(query.label_for(Path::new("/proj/docs/fig.png")), None);

        let relative = PathQuery::new("images/", Path::new("/proj/docs"), Path::new("/proj"));
        assert_eq!(
            relative.label_for(Path::new("/proj/assets/a.png")).as_deref(),
            Some("../../assets/a.png")
        );
    }

    #[test]
    fn test_project_root_override_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("site")).unwrap();

        assert_eq!(project_root(dir.path(), "site"), dir.path().join("site"));
        assert_eq!(project_root(dir.path(), "missing"), dir.path());
        assert_eq!(project_root(dir.path(), ""), dir.path());
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(normalize_lexically(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize_lexically(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_lexically(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_file_candidates_encode_spaces() {
        let query = PathQuery::new("", Path::new("/proj/docs"), Path::new("/proj"));
        let files = vec![
            PathBuf::from("/proj/docs/my notes.md"),
            PathBuf::from("/proj/docs/guide/index.md"),
        ];
        let items = file_candidates(&files, &query);

        assert_eq!(items[0].label, "my%20notes.md");
        assert_eq!(items[0].sort_key, "my%20notes!md");
        assert_eq!(items[0].kind, CandidateKind::File);
        assert_eq!(items[1].label, "guide/index.md");
    }

    #[test]
    fn test_image_preview_scales_wide_images() {
        let wide = ImageDimensions { width: 636, height: 400 };
        assert_eq!(
            image_preview("img/a b.png", Path::new("/proj/img/a b.png"), wide),
            "![img/a b.png](/proj/img/a%20b.png|width=318,height=200)"
        );

        let small = ImageDimensions { width: 32, height: 16 };
        let item = image_candidate("icon.png", Path::new("/p/icon.png"), small);
        assert_eq!(item.label, "icon.png");
        assert_eq!(item.sort_key, "icon!png");
        assert_eq!(
            item.documentation,
            Some(CandidateDoc::Markdown("![icon.png](/p/icon.png|width=32,height=16)".to_string()))
        );
    }
}
