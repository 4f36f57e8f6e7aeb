//! pagegrade LSP server: publishes SEO diagnostics on open and save.

use pagegrade::analyzer::AnalysisEngine;
use pagegrade::parser::DocumentKind;
use pagegrade::{DocumentReport, Finding, Status};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

#[derive(Debug)]
struct Backend {
    client: Client,
    root_uri: RwLock<Option<Url>>,
}

fn status_to_severity(status: Status) -> DiagnosticSeverity {
    match status {
        Status::Bad => DiagnosticSeverity::ERROR,
        Status::Warning => DiagnosticSeverity::WARNING,
        Status::Good => DiagnosticSeverity::HINT,
    }
}

/// Findings are document-wide, so every diagnostic sits on the first line
fn finding_to_diagnostic(finding: &Finding) -> Diagnostic {
    Diagnostic {
        range: Range::new(Position::new(0, 0), Position::new(0, 0)),
        severity: Some(status_to_severity(finding.status)),
        code: Some(NumberOrString::String(finding.rule.to_string())),
        code_description: None,
        source: Some("pagegrade".to_string()),
        message: format!("{} {}", finding.issue, finding.recommendation),
        related_information: None,
        tags: None,
        data: None,
    }
}

fn report_to_diagnostics(report: &DocumentReport) -> Vec<Diagnostic> {
    report
        .result
        .details
        .findings()
        .iter()
        .map(finding_to_diagnostic)
        .collect()
}

impl Backend {
    fn work_dir_for(&self, path: &Path) -> PathBuf {
        let fallback = || path.parent().unwrap_or(path).to_path_buf();
        match self.root_uri.read() {
            Ok(guard) => guard
                .as_ref()
                .and_then(|u| u.to_file_path().ok())
                .unwrap_or_else(fallback),
            Err(_) => fallback(),
        }
    }

    /// Analyze the buffer text when the client sent it, otherwise the file on disk
    async fn publish(&self, uri: Url, text: Option<String>) {
        let path = match uri.to_file_path() {
            Ok(p) => p,
            Err(_) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Could not resolve file path for {}", uri),
                    )
                    .await;
                return;
            }
        };

        if DocumentKind::from_path(&path).is_none() {
            return;
        }

        let work_dir = self.work_dir_for(&path);
        let outcome = match text {
            Some(source) => {
                let config = pagegrade::config::load_config(&work_dir, None).ok();
                AnalysisEngine::new().analyze_source(&source, &path, config.as_ref())
            }
            None => pagegrade::analyze_file(&path, &work_dir, None),
        };

        match outcome {
            Ok(report) => {
                log::debug!("{} scored {}", path.display(), report.score());
                let diagnostics = report_to_diagnostics(&report);
                self.client.publish_diagnostics(uri, diagnostics, None).await;
            }
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("pagegrade analysis failed: {:#}", e),
                    )
                    .await;
                self.client.publish_diagnostics(uri, vec![], None).await;
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> LspResult<InitializeResult> {
        if let Some(ref uri) = params.root_uri {
            if let Ok(mut guard) = self.root_uri.write() {
                *guard = Some(uri.clone());
            }
        }
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::NONE),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "pagegrade-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "pagegrade LSP initialized")
            .await;
    }

    async fn shutdown(&self) -> LspResult<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.publish(params.text_document.uri, Some(params.text_document.text))
            .await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        self.publish(params.text_document.uri, params.text).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }
}

#[tokio::main]
async fn main() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| Backend {
        client,
        root_uri: RwLock::new(None),
    });
    Server::new(stdin, stdout, socket).serve(service).await;
}
