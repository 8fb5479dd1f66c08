use std::path::PathBuf;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::classifier::{classify, DocumentRef};
use crate::error::{ConsoleError, ConsoleResult};
use crate::render::{comparison_view, ComparisonView};
use crate::restore::{self, RestoreFormat};
use crate::types::SearchResponse;

pub const EMPTY_SEARCH_MESSAGE: &str = "Please enter a Quip Document ID or paste a Google Doc URL to search";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreStatus {
    Converting(RestoreFormat),
    Restored { filename: String, path: PathBuf, inline: Option<String> },
    Failed(String),
}

impl RestoreStatus {
    pub fn message(&self) -> String {
        match self {
            RestoreStatus::Converting(format) => {
                format!("Converting document to {}...", format.as_str().to_uppercase())
            }
            RestoreStatus::Restored { filename, .. } => format!("Document restored successfully as {}", filename),
            RestoreStatus::Failed(msg) => format!("Error: {}", msg),
        }
    }
}

/// Search page state. The selected reference is what restore acts on; it
/// only exists after a successful search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub last_query: Option<DocumentRef>,
    pub selected: Option<String>,
    pub view: Option<ComparisonView>,
    pub restore_status: Option<RestoreStatus>,
}

impl SearchState {
    pub fn restore_enabled(&self) -> bool {
        self.selected.is_some()
    }

    fn apply_search(&mut self, result: &ConsoleResult<SearchResponse>) {
        self.restore_status = None;
        match result {
            Ok(data) => {
                self.selected = if data.search_type.as_deref() == Some("quip") {
                    data.quip_document.as_ref().map(|d| d.quip_id.clone())
                } else {
                    data.google_drive_file.as_ref().map(|f| f.google_drive_file_id.clone())
                };
                self.view = Some(comparison_view(data));
            }
            Err(e) => {
                self.selected = None;
                self.view = Some(ComparisonView::error(&e.to_string()));
            }
        }
    }
}

pub struct SearchController {
    client: ApiClient,
    download_dir: PathBuf,
    state: SearchState,
}

impl SearchController {
    pub fn new(client: ApiClient, download_dir: PathBuf) -> Self {
        Self { client, download_dir, state: SearchState::default() }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Classifies `input` and runs one search. Returns whether the search
    /// succeeded; empty input is rejected without a request.
    pub async fn search(&mut self, input: &str) -> ConsoleResult<bool> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ConsoleError::InvalidInput(EMPTY_SEARCH_MESSAGE.to_string()));
        }
        let doc = classify(input);
        info!("{}", doc.describe());

        let result = self.client.search(&doc).await;
        if let Err(e) = &result {
            warn!("Search for {} failed: {}", doc.id(), e);
        }
        self.state.last_query = Some(doc);
        self.state.apply_search(&result);
        Ok(result.is_ok())
    }

    /// Restores the selected document in `format` and saves it into the
    /// download directory.
    pub async fn restore(&mut self, format: RestoreFormat) -> ConsoleResult<&RestoreStatus> {
        let document_id = self.state.selected.clone().ok_or(ConsoleError::NoSelection)?;
        self.state.restore_status = Some(RestoreStatus::Converting(format));
        info!("Restoring {} as {}", document_id, format);

        let status = match self.client.restore(&document_id, format).await {
            Ok(outcome) => match restore::materialize(&outcome, &self.download_dir) {
                Ok(path) => RestoreStatus::Restored {
                    filename: outcome.filename().to_string(),
                    path,
                    inline: outcome.inline_content().map(str::to_string),
                },
                Err(e) => RestoreStatus::Failed(e.to_string()),
            },
            Err(e) => {
                warn!("Restore of {} failed: {}", document_id, e);
                RestoreStatus::Failed(e.to_string())
            }
        };
        Ok(&*self.state.restore_status.insert(status))
    }
}
