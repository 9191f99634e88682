//! SD Language Server — diagnostics, hover, document symbols, formatting.
//!
//! A `tower-lsp` based LSP server that wraps `sd-core` so any
//! LSP-compatible editor gets per-line feedback on `.sd` shape files.

mod cli;
mod diagnostics;
mod formatting;
mod hover;
mod position;
mod symbols;

use sd_core::{ColorResolver, EditorConfig};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

/// Cached state for a single document.
struct DocumentState {
    text: String,
}

/// The SD language server backend.
struct SdLanguageServer {
    client: Client,
    /// Resolver built from the client's initialization options.
    resolver: Mutex<ColorResolver>,
    /// Open documents by URI.
    documents: Mutex<HashMap<Url, DocumentState>>,
}

impl SdLanguageServer {
    fn new(client: Client) -> Self {
        Self {
            client,
            resolver: Mutex::new(ColorResolver::default()),
            documents: Mutex::new(HashMap::new()),
        }
    }

    fn documents(&self) -> MutexGuard<'_, HashMap<Url, DocumentState>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolver(&self) -> ColorResolver {
        *self.resolver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store the new text and publish diagnostics.
    async fn on_change(&self, uri: Url, text: String) {
        let diags = diagnostics::compute_diagnostics(&text, &self.resolver());
        log::debug!("{uri}: {} diagnostics", diags.len());
        self.documents().insert(uri.clone(), DocumentState { text });
        self.client.publish_diagnostics(uri, diags, None).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for SdLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options {
            match EditorConfig::from_value(options) {
                Ok(config) => {
                    *self.resolver.lock().unwrap_or_else(PoisonError::into_inner) =
                        config.resolver();
                }
                Err(e) => log::warn!("ignoring initialization options: {e}"),
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                document_formatting_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "sd-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        self.on_change(uri, text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().next_back() {
            self.on_change(uri, change.text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents().remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        let resolver = self.resolver();

        let docs = self.documents();
        Ok(docs
            .get(uri)
            .and_then(|doc| hover::compute_hover(&doc.text, pos, &resolver)))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = &params.text_document.uri;

        let docs = self.documents();
        let syms = docs
            .get(uri)
            .map(|doc| symbols::compute_symbols(uri, &doc.text))
            .unwrap_or_default();
        Ok(Some(DocumentSymbolResponse::Flat(syms)))
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let docs = self.documents();
        Ok(docs
            .get(&params.text_document.uri)
            .map(|doc| formatting::compute_formatting(&doc.text)))
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // ── `sd-lsp --format` / `sd-lsp --check` modes ──────────────────────
    // Read a document from stdin, print the result on stdout, then exit.
    let args: Vec<String> = std::env::args().collect();
    if let Some(mode) = cli::Mode::from_arg(args.get(1).map(String::as_str)) {
        std::process::exit(cli::run(mode));
    }

    // ── Standard LSP server mode ─────────────────────────────────────────
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(SdLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
