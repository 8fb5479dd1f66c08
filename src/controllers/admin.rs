use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value as JsonValue;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use crate::panel::{ResponsePanel, ADMIN_PLACEHOLDER, ADMIN_SNAPSHOT};
use crate::render;
use crate::types::Statistics;

/// Calls whose raw JSON goes into the response panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Health,
    Documents,
    Document(String),
    MigrationLogs,
    ImportDump,
}

/// View model of the admin panel: raw API calls into the response panel
/// plus the statistics summary.
pub struct AdminController {
    client: ApiClient,
    panel: ResponsePanel,
    stats: Option<Statistics>,
}

impl AdminController {
    pub fn new(client: ApiClient) -> Self {
        Self { client, panel: ResponsePanel::new(ADMIN_PLACEHOLDER), stats: None }
    }

    pub fn panel(&self) -> &ResponsePanel {
        &self.panel
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.stats.as_ref()
    }

    fn show(&mut self, result: ConsoleResult<JsonValue>) -> bool {
        match result {
            Ok(value) => {
                self.panel.show_json(&value);
                true
            }
            Err(e) => {
                self.panel.show_error(&e);
                false
            }
        }
    }

    pub async fn perform(&mut self, action: &AdminAction) -> bool {
        match action {
            AdminAction::Health => self.health_check().await,
            AdminAction::Documents => self.list_documents().await,
            AdminAction::Document(id) => self.get_document(id).await,
            AdminAction::MigrationLogs => self.migration_logs().await,
            AdminAction::ImportDump => self.import_dump().await,
        }
    }

    pub async fn health_check(&mut self) -> bool {
        let result = self.client.health().await;
        self.show(result)
    }

    pub async fn list_documents(&mut self) -> bool {
        let result = self.client.documents().await;
        self.show(result)
    }

    pub async fn get_document(&mut self, id: &str) -> bool {
        let result = self.client.document(id).await;
        self.show(result)
    }

    pub async fn migration_logs(&mut self) -> bool {
        let result = self.client.migration_logs().await;
        self.show(result)
    }

    pub async fn import_dump(&mut self) -> bool {
        info!("Triggering dump import");
        let result = self.client.import_dump().await;
        self.show(result)
    }

    /// Reloads the statistics summary. A failed load keeps the last one.
    pub async fn load_statistics(&mut self) -> bool {
        match self.client.stats().await {
            Ok(stats) => {
                debug!(
                    "Stats: total={} migrated={} pending={}",
                    stats.documents.total, stats.documents.migrated, stats.documents.pending
                );
                self.stats = Some(stats);
                true
            }
            Err(e) => {
                error!("Failed to load statistics: {}", e);
                false
            }
        }
    }

    pub fn stats_summary(&self) -> Option<String> {
        self.stats
            .as_ref()
            .map(|s| render::stats_summary(&s.documents, s.logs.as_ref()))
    }

    /// One-shot statistics read, rendered as the quick-stats message.
    pub async fn quick_stats(&mut self) -> String {
        match self.client.stats().await {
            Ok(stats) => {
                let text = render::stats_summary(&stats.documents, stats.logs.as_ref());
                self.stats = Some(stats);
                text
            }
            Err(ConsoleError::Api { .. }) => "Failed to load statistics".to_string(),
            Err(e) => format!("Error loading statistics: {}", e),
        }
    }

    pub fn clear_response(&mut self) {
        self.panel.clear();
    }

    pub fn export_response(&self, dir: &Path) -> ConsoleResult<Option<PathBuf>> {
        self.panel.export(dir, ADMIN_SNAPSHOT)
    }
}

/// Periodic statistics refresh, stopped through its cancellation token.
pub struct StatsRefresher {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl StatsRefresher {
    /// Loads immediately, then once per `interval`. `on_update` sees every
    /// successful load. Ticks missed while a load is running are skipped.
    pub fn spawn<F>(admin: Arc<Mutex<AdminController>>, interval: Duration, cancel: CancellationToken, on_update: F) -> Self
    where
        F: Fn(&Statistics) + Send + 'static,
    {
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let mut guard = admin.lock().await;
                        if guard.load_statistics().await {
                            if let Some(stats) = guard.statistics() {
                                on_update(stats);
                            }
                        }
                    }
                }
            }
            debug!("Stats refresher stopped");
        });
        Self { cancel, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}
