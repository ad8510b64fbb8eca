//! Default collaborator services backing the completion engine

pub mod file_finder;
pub mod image_probe;
pub mod outline;

use std::sync::Arc;

use crate::config::Settings;
use crate::lsp::features::traits::CompletionServices;

pub use file_finder::WalkdirFileFinder;
pub use image_probe::HeaderImageProbe;
pub use outline::{slugify, PulldownOutline};

/// Filesystem-backed services configured from `settings`
pub fn default_services(settings: &Settings) -> CompletionServices {
    CompletionServices {
        outline: Arc::new(PulldownOutline::new(settings.toc.omitted_from_toc.clone())),
        files: Arc::new(WalkdirFileFinder::new()),
        images: Arc::new(HeaderImageProbe::new()),
    }
}
