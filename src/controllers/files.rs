use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::clipboard::{self, ButtonFeedback, ClipboardBackend};
use crate::csv_export::{generate_csv, CSV_FILENAME};
use crate::download;
use crate::error::ConsoleResult;
use crate::pagination::{PageEvent, PageRequest, Pagination};
use crate::panel::{ResponsePanel, FILES_PLACEHOLDER, FILES_SNAPSHOT};
use crate::render;
use crate::types::DriveFileRow;

pub const LOADING_MESSAGE: &str = "Loading Google Drive files...";
pub const TABLE_ERROR: &str = "Error loading files";

/// View model of the migrated file listing.
pub struct FilesController {
    client: ApiClient,
    pagination: Pagination,
    rows: Vec<DriveFileRow>,
    table_error: bool,
    loaded: bool,
    panel: ResponsePanel,
}

impl FilesController {
    pub fn new(client: ApiClient, per_page: u32) -> Self {
        Self {
            client,
            pagination: Pagination::new(per_page),
            rows: Vec::new(),
            table_error: false,
            loaded: false,
            panel: ResponsePanel::new(FILES_PLACEHOLDER),
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn rows(&self) -> &[DriveFileRow] {
        &self.rows
    }

    pub fn panel(&self) -> &ResponsePanel {
        &self.panel
    }

    /// Fetches the page the pagination state points at.
    pub async fn load(&mut self) -> bool {
        let req = self.pagination.current_request();
        self.panel.show_text(LOADING_MESSAGE);
        match self.client.drive_files(req).await {
            Ok((page, raw)) => {
                self.pagination.apply_listing(&page);
                self.rows = page.files;
                self.table_error = false;
                self.loaded = true;
                self.panel.show_json(&raw);
                true
            }
            Err(e) => {
                warn!("Loading page {} failed: {}", req.page, e);
                self.table_error = true;
                self.panel.show_error(&e);
                false
            }
        }
    }

    /// Applies a navigation event and loads the resulting page. Rejected
    /// events return an error and issue no request.
    pub async fn navigate(&mut self, event: PageEvent) -> ConsoleResult<bool> {
        self.pagination.update(event)?;
        Ok(self.load().await)
    }

    pub async fn next_page(&mut self) -> ConsoleResult<bool> {
        self.navigate(PageEvent::Next).await
    }

    pub async fn prev_page(&mut self) -> ConsoleResult<bool> {
        self.navigate(PageEvent::Prev).await
    }

    pub async fn go_to_page(&mut self, page: i64) -> ConsoleResult<bool> {
        self.navigate(PageEvent::Jump(page)).await
    }

    pub async fn set_per_page(&mut self, per_page: u32) -> ConsoleResult<bool> {
        self.navigate(PageEvent::PerPageChanged(per_page)).await
    }

    pub async fn refresh(&mut self) -> ConsoleResult<bool> {
        self.navigate(PageEvent::Refresh).await
    }

    /// Serializes the whole dataset, not only the current page, to CSV.
    ///
    /// Returns the CSV text and the number of data rows.
    pub async fn build_csv(&mut self) -> ConsoleResult<(String, usize)> {
        if !self.loaded {
            // The total is only known after one listing.
            let (page, _) = self.client.drive_files(self.pagination.current_request()).await?;
            self.pagination.apply_listing(&page);
        }
        let total = self.pagination.total_count();
        if total == 0 {
            return Ok((generate_csv(&[]), 0));
        }
        let req = PageRequest { page: 1, per_page: u32::try_from(total).unwrap_or(u32::MAX) };
        let (all, _) = self.client.drive_files(req).await?;
        info!("Exporting {} of {} files", all.files.len(), total);
        Ok((generate_csv(&all.files), all.files.len()))
    }

    pub async fn export_csv(&mut self, dir: &Path) -> ConsoleResult<(PathBuf, usize)> {
        let (csv, rows) = self.build_csv().await?;
        let path = download::save(dir, CSV_FILENAME, csv.as_bytes())?;
        Ok((path, rows))
    }

    pub async fn copy_id(&self, id: &str) -> ConsoleResult<ButtonFeedback> {
        let outcome = clipboard::copy_text(id).await?;
        Ok(ButtonFeedback::for_outcome(&outcome))
    }

    pub async fn copy_id_with(&self, backends: &[&dyn ClipboardBackend], id: &str) -> ConsoleResult<ButtonFeedback> {
        let outcome = clipboard::copy_with_fallback(backends, id).await?;
        Ok(ButtonFeedback::for_outcome(&outcome))
    }

    pub fn summary(&self) -> String {
        let p = &self.pagination;
        format!(
            "Total Files: {} | Current Page: {} | Per Page: {} | Total Pages: {}",
            p.total_count(),
            p.page(),
            p.per_page(),
            p.total_pages()
        )
    }

    pub fn render_table(&self) -> String {
        if self.table_error {
            TABLE_ERROR.to_string()
        } else {
            render::files_table(&self.rows)
        }
    }

    pub fn clear_response(&mut self) {
        self.panel.clear();
    }

    pub fn export_response(&self, dir: &Path) -> ConsoleResult<Option<PathBuf>> {
        self.panel.export(dir, FILES_SNAPSHOT)
    }
}
