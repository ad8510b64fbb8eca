//! Backend state management
//!
//! This module defines the MystBackend struct, which holds the open documents,
//! the workspace root and the current completion engine.

use std::path::PathBuf;
use std::sync::atomic::AtomicU32;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;
use tower_lsp::Client;

use crate::config::Settings;
use crate::lsp::features::completion::CompletionEngine;
use crate::lsp::features::traits::CompletionServices;
use crate::lsp::models::LspDocument;

/// Builds the collaborator services for a settings snapshot
pub type ServicesFactory = Arc<dyn Fn(&Settings) -> CompletionServices + Send + Sync>;

/// The MyST language server backend, managing state and handling LSP requests.
#[derive(Clone)]
pub struct MystBackend {
    pub(super) client: Client,
    /// DashMap provides lock-free concurrent access to open documents
    pub(super) documents_by_uri: Arc<DashMap<Url, Arc<LspDocument>>>,
    pub(super) serial_document_id: Arc<AtomicU32>,
    pub(super) root_dir: Arc<RwLock<Option<PathBuf>>>,
    /// Rebuilt and swapped whole on configuration change; requests clone the Arc
    pub(super) engine: Arc<RwLock<Arc<CompletionEngine>>>,
    pub(super) services: ServicesFactory,
}

impl std::fmt::Debug for MystBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MystBackend")
            .field("documents_count", &self.documents_by_uri.len())
            .finish_non_exhaustive()
    }
}
