//! LSP protocol handler implementations
//!
//! This module contains the `tower_lsp::LanguageServer` trait implementation
//! for the MyST backend:
//! - Lifecycle handlers (initialize, initialized, shutdown)
//! - Document lifecycle (did_open, did_change, did_close)
//! - Configuration changes (did_change_configuration)
//! - Completion

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, InitializeParams, InitializeResult, InitializedParams,
    MessageType, ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tower_lsp::{jsonrpc, LanguageServer};
use tracing::{debug, info, warn};

use super::state::MystBackend;
use crate::config::Settings;
use crate::lsp::models::LspDocument;

/// Characters that open a completion context
pub const TRIGGER_CHARACTERS: [&str; 6] = ["(", "\\", "/", "[", "#", "{"];

#[tower_lsp::async_trait]
impl LanguageServer for MystBackend {
    /// Handles the LSP initialize request: records the workspace root and
    /// builds the completion engine from `initializationOptions`.
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize from {:?}", params.client_info.as_ref().map(|c| &c.name));

        #[allow(deprecated)]
        let root_uri = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| folder.uri.clone())
            .or(params.root_uri);

        let root = match root_uri {
            Some(uri) => match uri.to_file_path() {
                Ok(path) => Some(path),
                Err(()) => {
                    warn!("Failed to convert root URI to path: {}. Path completion is disabled.", uri);
                    None
                }
            },
            None => None,
        };
        self.set_root_dir(root).await;

        let options = params.initialization_options.unwrap_or(serde_json::Value::Null);
        let settings = Settings::from_json(&options).unwrap_or_else(|e| {
            warn!("Ignoring initializationOptions: {}", e);
            Settings::default()
        });
        self.install_settings(settings).await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect()),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    /// Handles the LSP initialized notification.
    async fn initialized(&self, _params: InitializedParams) {
        info!("Initialized");
        self.client
            .log_message(MessageType::INFO, "MyST language server ready")
            .await;
    }

    /// Handles the LSP shutdown request.
    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        self.documents_by_uri.clear();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        info!("Opening document: URI={}, version={}", uri, version);

        let document = Arc::new(LspDocument::new(
            self.next_document_id(),
            uri.clone(),
            &params.text_document.text,
            version,
        ));
        self.documents_by_uri.insert(uri, document);
    }

    /// Applies incremental edits in order.
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);

        let Some(document) = self.documents_by_uri.get(&uri).map(|r| Arc::clone(r.value())) else {
            warn!("Failed to find document with URI={}", uri);
            return;
        };
        if !document.apply(params.content_changes, version).await {
            warn!("Failed to apply changes to document with URI={}", uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        match self.documents_by_uri.remove(&uri) {
            Some((_, document)) => info!("Closed document: {}, id: {}", uri, document.id),
            None => warn!("Failed to find document with URI={}", uri),
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        debug!("workspace/didChangeConfiguration");
        self.apply_settings_value(&params.settings).await;
    }

    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        debug!("Completion request at {}:{:?}", uri, position);

        // tower-lsp drops this future on `$/cancelRequest`; the guard then
        // stops any enumeration still running on the blocking pool
        let cancel = CancellationToken::new();
        let _cancel_on_drop = cancel.clone().drop_guard();

        let Some(items) = self.complete(&uri, position, &cancel).await else {
            return Ok(None);
        };

        debug!("Returning {} completion items", items.len());
        Ok(Some(CompletionResponse::Array(
            items.into_iter().map(CompletionItem::from).collect(),
        )))
    }
}
