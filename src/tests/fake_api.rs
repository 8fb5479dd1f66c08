//! In-process stand-in for the migration REST API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::ApiClient;

pub const FOLDER_DRIVE_ID: &str = "1FolderDriveIdAAAAAAAAAAAAAAAA";

/// Knobs for `/api/stats`, shared between the handler and the test.
#[derive(Default)]
pub struct StatsControl {
    failing: AtomicBool,
    delay_ms: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[derive(Clone)]
pub struct FakeApi {
    requests: Arc<Mutex<Vec<String>>>,
    rows: usize,
    stats: Arc<StatsControl>,
}

impl FakeApi {
    fn record(&self, uri: &Uri) {
        self.requests.lock().unwrap().push(uri.to_string());
    }
}

pub struct FakeServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    stats: Arc<StatsControl>,
}

impl FakeServer {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, None).unwrap()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<String> {
        self.requests().into_iter().filter(|r| r.starts_with(path)).collect()
    }

    /// Makes `/api/stats` answer 500 with an error body until switched back.
    pub fn fail_stats(&self, failing: bool) {
        self.stats.failing.store(failing, Ordering::SeqCst);
    }

    /// Holds every `/api/stats` response for `delay`.
    pub fn delay_stats(&self, delay: Duration) {
        self.stats.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Highest number of `/api/stats` requests served at the same time.
    pub fn max_concurrent_stats(&self) -> usize {
        self.stats.max_in_flight.load(Ordering::SeqCst)
    }
}

pub async fn spawn(rows: usize) -> FakeServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let stats = Arc::new(StatsControl::default());
    let state = FakeApi { requests: requests.clone(), rows, stats: stats.clone() };
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/documents", get(documents))
        .route("/api/migration-logs", get(logs))
        .route("/api/import-dump", post(import_dump))
        .route("/api/stats", get(self::stats))
        .route("/api/search", get(search))
        .route("/api/restore-file", post(restore))
        .route("/api/google-drive-files", get(drive_files))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    FakeServer { base_url: format!("http://{}", addr), requests, stats }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn health(State(s): State<FakeApi>, uri: Uri) -> Json<Value> {
    s.record(&uri);
    Json(json!({"status": "healthy", "message": "Flask app is running", "database": "connected"}))
}

async fn documents(State(s): State<FakeApi>, uri: Uri) -> Json<Value> {
    s.record(&uri);
    Json(json!({"status": "success", "files_count": 1, "folders_count": 0, "files": [{"quip_id": "abc123"}], "folders": []}))
}

async fn logs(State(s): State<FakeApi>, uri: Uri) -> Json<Value> {
    s.record(&uri);
    Json(json!({"status": "success", "count": 0, "logs": []}))
}

async fn import_dump(State(s): State<FakeApi>, uri: Uri) -> Response {
    s.record(&uri);
    (StatusCode::NOT_FOUND, Json(json!({"status": "error", "message": "Dump file not found"}))).into_response()
}

async fn stats(State(s): State<FakeApi>, uri: Uri) -> Response {
    s.record(&uri);
    let ctl = &s.stats;
    let now = ctl.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    ctl.max_in_flight.fetch_max(now, Ordering::SeqCst);

    let delay = ctl.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    ctl.in_flight.fetch_sub(1, Ordering::SeqCst);

    if ctl.failing.load(Ordering::SeqCst) {
        let body = json!({"status": "error", "message": "Database not available"});
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }
    Json(json!({
        "status": "success",
        "statistics": {
            "documents": {"total": 10, "files": 8, "folders": 2, "migrated": 7, "pending": 3},
            "logs": {"total": 4, "today": 1}
        }
    }))
    .into_response()
}

async fn search(State(s): State<FakeApi>, uri: Uri, Query(q): Query<HashMap<String, String>>) -> Response {
    s.record(&uri);
    let id = q.get("document_id").cloned().unwrap_or_default();
    let search_type = q.get("search_type").cloned().unwrap_or_default();

    if id == "missing" || id.is_empty() {
        let body = json!({"status": "error", "message": format!("Quip document with ID \"{}\" not found", id)});
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }

    if search_type == "quip" {
        return Json(json!({
            "status": "success",
            "search_type": "quip",
            "document_type": "file",
            "quip_document": {
                "quip_id": id,
                "obfuscated_name": "Quarterly Plan",
                "google_drive_id": "1DriveIdOfQuarterlyPlanXXXXXXXX",
                "document_type": "DOCUMENT",
                "author": "alex",
                "when_quip_created": "2023-04-01T10:00:00",
                "when_migration_completed": null
            },
            "google_drive_file": {
                "id": 1,
                "google_drive_file_id": "1DriveIdOfQuarterlyPlanXXXXXXXX",
                "google_drive_file_name": "Quarterly Plan",
                "google_drive_file_url": "https://docs.google.com/document/d/1DriveIdOfQuarterlyPlanXXXXXXXX/edit",
                "created_at": "2023-04-01T10:00:00"
            }
        }))
        .into_response();
    }

    let document_type = if id == FOLDER_DRIVE_ID { "folder" } else { "file" };
    Json(json!({
        "status": "success",
        "search_type": "google",
        "document_type": document_type,
        "google_drive_file": {
            "id": 2,
            "google_drive_file_id": id,
            "google_drive_file_name": "Team Folder",
            "google_drive_file_url": format!("https://docs.google.com/document/d/{}/edit", id),
            "created_at": null
        },
        "quip_document": {
            "quip_id": "QUIPFOLDER1",
            "obfuscated_name": "Team Folder",
            "google_drive_id": id,
            "document_type": "folder",
            "author": null,
            "when_quip_created": null,
            "when_migration_completed": null,
            "parent_folder": "ROOTFOLDER",
            "inherit_mode": "inherit"
        }
    }))
    .into_response()
}

async fn restore(State(s): State<FakeApi>, uri: Uri, Json(body): Json<Value>) -> Response {
    s.record(&uri);
    let id = body["document_id"].as_str().unwrap_or_default();
    let format = body["format"].as_str().unwrap_or_default();

    if id == "broken" {
        let body = json!({"status": "error", "message": "Failed to convert document to DOCX format"});
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    match format {
        "html" => Json(json!({
            "status": "success",
            "filename": "Quarterly Plan.html",
            "content": "<h1>Quarterly Plan</h1>",
            "title": "Quarterly Plan",
            "document_type": "file"
        }))
        .into_response(),
        "docx" => (
            [
                (header::CONTENT_TYPE, "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"Quarterly Plan.docx\""),
            ],
            b"PK\x03\x04docx".to_vec(),
        )
            .into_response(),
        // No Content-Disposition: the client falls back to document.pdf
        "pdf" => ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4".to_vec()).into_response(),
        other => {
            let body = json!({"status": "error", "message": format!("Unsupported output format: {}", other)});
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

async fn drive_files(State(s): State<FakeApi>, uri: Uri, Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    s.record(&uri);
    let page: usize = q.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let per_page: usize = q.get("per_page").and_then(|v| v.parse().ok()).unwrap_or(50);
    let pages = if per_page == 0 { 0 } else { s.rows.div_ceil(per_page) };
    let start = (page.saturating_sub(1)) * per_page;
    let files: Vec<Value> = (start..(start + per_page).min(s.rows))
        .map(|i| {
            json!({
                "id": i + 1,
                "quip_document_id": format!("QUIP{}", i + 1),
                "google_drive_file_id": format!("drive-{}", i + 1),
                "google_drive_file_name": format!("File \"{}\"", i + 1),
                "google_drive_file_url": format!("https://docs.google.com/document/d/drive-{}/edit", i + 1),
                "document_type": "DOCUMENT",
                "author": "alex",
                "when_quip_created": null,
                "when_migration_completed": null
            })
        })
        .collect();
    Json(json!({
        "status": "success",
        "total_count": s.rows,
        "page": page,
        "per_page": per_page,
        "pages": pages,
        "has_next": page < pages,
        "has_prev": page > 1,
        "files": files
    }))
}
