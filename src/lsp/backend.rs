use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::{Position, Url};
use tower_lsp::Client;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::document::DocumentSnapshot;
use crate::lsp::features::completion::{CandidateItem, CompletionEngine};
use crate::services::default_services;

mod handlers;
mod state;

pub use state::{MystBackend, ServicesFactory};

impl MystBackend {
    /// Creates a backend using the default filesystem and markdown services.
    pub fn new(client: Client) -> Self {
        Self::with_services(client, Arc::new(default_services))
    }

    /// Creates a backend whose engines get their collaborators from `services`.
    pub fn with_services(client: Client, services: ServicesFactory) -> Self {
        let settings = Settings::default();
        let engine = CompletionEngine::new(settings.clone(), services(&settings), None);
        Self {
            client,
            documents_by_uri: Arc::new(DashMap::new()),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            root_dir: Arc::new(RwLock::new(None)),
            engine: Arc::new(RwLock::new(Arc::new(engine))),
            services,
        }
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    /// The engine current at call time; later swaps do not affect it.
    pub async fn engine(&self) -> Arc<CompletionEngine> {
        Arc::clone(&*self.engine.read().await)
    }

    /// Rebuild the engine from `settings` and the recorded workspace root.
    async fn install_settings(&self, settings: Settings) {
        let root = self.root_dir.read().await.clone();
        let services = (self.services)(&settings);
        let engine = Arc::new(CompletionEngine::new(settings, services, root));
        *self.engine.write().await = engine;
        info!("Completion engine rebuilt");
    }

    /// Parse client settings and rebuild the engine. Invalid or absent
    /// settings keep the current engine.
    async fn apply_settings_value(&self, value: &Value) {
        if value.is_null() {
            debug!("Configuration change carried no settings");
            return;
        }
        match Settings::from_json(value) {
            Ok(settings) => self.install_settings(settings).await,
            Err(e) => warn!("Ignoring settings update: {}", e),
        }
    }

    async fn set_root_dir(&self, root: Option<PathBuf>) {
        info!("Workspace root: {:?}", root);
        *self.root_dir.write().await = root;
    }

    async fn snapshot(&self, uri: &Url) -> Option<DocumentSnapshot> {
        let document = self.documents_by_uri.get(uri).map(|r| Arc::clone(r.value()))?;
        Some(document.snapshot().await)
    }

    /// Run the completion engine for an open document.
    ///
    /// `cancel` is fired by the caller when the request goes away.
    pub async fn complete(
        &self,
        uri: &Url,
        position: Position,
        cancel: &CancellationToken,
    ) -> Option<Vec<CandidateItem>> {
        let Some(snapshot) = self.snapshot(uri).await else {
            debug!("Document not found: {}", uri);
            return None;
        };
        let engine = self.engine().await;
        engine.provide_completions(&snapshot, position, cancel).await
    }
}
