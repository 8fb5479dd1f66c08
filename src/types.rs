//! Wire types of the migration API.
//!
//! Every response carries a top-level `status` field; `"success"` gates all
//! branching in the controllers. Fields the server may omit or null out are
//! `Option`s, unknown fields are ignored.

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";

/// The `status`/`message` pair shared by every response.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ApiMessage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiMessage {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DocumentStats {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub files: i64,
    #[serde(default)]
    pub folders: i64,
    #[serde(default)]
    pub migrated: i64,
    #[serde(default)]
    pub pending: i64,
    /// Not every server version reports failures; absent means zero.
    #[serde(default)]
    pub failed: Option<i64>,
}

impl DocumentStats {
    pub fn failed_or_zero(&self) -> i64 {
        self.failed.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LogStats {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub today: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Statistics {
    pub documents: DocumentStats,
    #[serde(default)]
    pub logs: Option<LogStats>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StatsResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// A document or folder record of the source platform.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct QuipDocument {
    pub quip_id: String,
    #[serde(default)]
    pub obfuscated_name: Option<String>,
    #[serde(default)]
    pub google_drive_id: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub when_quip_created: Option<String>,
    #[serde(default)]
    pub when_migration_completed: Option<String>,
    #[serde(default)]
    pub parent_folder: Option<String>,
    #[serde(default)]
    pub inherit_mode: Option<String>,
    #[serde(default)]
    pub member_count: Option<i64>,
}

/// The migrated counterpart stored in Google Drive.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DriveFile {
    #[serde(default)]
    pub id: Option<i64>,
    pub google_drive_file_id: String,
    #[serde(default)]
    pub google_drive_file_name: Option<String>,
    #[serde(default)]
    pub google_drive_file_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// `"quip"` or `"google"`: which side the lookup went through.
    #[serde(default)]
    pub search_type: Option<String>,
    /// `"file"` or `"folder"`.
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub quip_document: Option<QuipDocument>,
    #[serde(default)]
    pub google_drive_file: Option<DriveFile>,
}

/// One row of the migrated file listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DriveFileRow {
    pub id: i64,
    #[serde(default)]
    pub quip_document_id: Option<String>,
    #[serde(default)]
    pub google_drive_file_id: Option<String>,
    #[serde(default)]
    pub google_drive_file_name: Option<String>,
    #[serde(default)]
    pub google_drive_file_url: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub when_quip_created: Option<String>,
    #[serde(default)]
    pub when_migration_completed: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FilesPage {
    pub total_count: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub files: Vec<DriveFileRow>,
}

/// Body of `POST /api/restore-file`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RestoreRequest {
    pub document_id: String,
    pub format: String,
}

/// JSON body of a successful inline (HTML) restore.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RestoreJson {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
}
