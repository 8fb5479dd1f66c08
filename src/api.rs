use std::time::Duration;

use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::classifier::DocumentRef;
use crate::error::{ConsoleError, ConsoleResult};
use crate::pagination::PageRequest;
use crate::restore::{self, RawRestoreResponse, RestoreFormat, RestoreOutcome};
use crate::types::*;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Client for the migration REST API.
///
/// Responses are read as JSON whatever their HTTP status; the `status` field
/// of the body decides between success and failure.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ConsoleResult<Self> {
        let mut builder = Client::builder().user_agent(concat!("migration-console/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().map_err(|e| ConsoleError::Config(e.to_string()))?;
        Ok(Self { http, base: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json(&self, path: &str) -> ConsoleResult<JsonValue> {
        debug!("GET {}", path);
        let resp = self.http.get(self.url(path)).send().await?;
        Ok(resp.json().await?)
    }

    async fn post_json(&self, path: &str) -> ConsoleResult<JsonValue> {
        debug!("POST {}", path);
        let resp = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn health(&self) -> ConsoleResult<JsonValue> {
        self.get_json("/api/health").await
    }

    pub async fn documents(&self) -> ConsoleResult<JsonValue> {
        self.get_json("/api/documents").await
    }

    pub async fn document(&self, id: &str) -> ConsoleResult<JsonValue> {
        self.get_json(&format!("/api/documents/{}", urlencoding::encode(id))).await
    }

    pub async fn migration_logs(&self) -> ConsoleResult<JsonValue> {
        self.get_json("/api/migration-logs").await
    }

    pub async fn import_dump(&self) -> ConsoleResult<JsonValue> {
        self.post_json("/api/import-dump").await
    }

    pub async fn stats(&self) -> ConsoleResult<Statistics> {
        let value = self.get_json("/api/stats").await?;
        let data: StatsResponse = expect_success(value)?;
        data.statistics
            .ok_or_else(|| ConsoleError::Decode("stats response without statistics".into()))
    }

    pub async fn search(&self, doc: &DocumentRef) -> ConsoleResult<SearchResponse> {
        let path = format!(
            "/api/search?document_id={}&search_type={}",
            urlencoding::encode(doc.id()),
            doc.search_type()
        );
        let value = self.get_json(&path).await?;
        expect_success(value)
    }

    /// One page of the migrated file listing, typed and raw.
    pub async fn drive_files(&self, req: PageRequest) -> ConsoleResult<(FilesPage, JsonValue)> {
        let value = self.get_json(&format!("/api/google-drive-files?{}", req.query())).await?;
        let page: FilesPage = expect_success(value.clone())?;
        Ok((page, value))
    }

    pub async fn restore(&self, document_id: &str, format: RestoreFormat) -> ConsoleResult<RestoreOutcome> {
        let body = RestoreRequest { document_id: document_id.to_string(), format: format.as_str().to_string() };
        debug!("POST /api/restore-file ({})", format);
        let resp = self.http.post(self.url("/api/restore-file")).json(&body).send().await?;

        let header = |name: HeaderName| resp.headers().get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
        let raw = RawRestoreResponse {
            status: resp.status().as_u16(),
            content_type: header(CONTENT_TYPE),
            content_disposition: header(CONTENT_DISPOSITION),
            body: Vec::new(),
        };
        let bytes = resp.bytes().await?;
        restore::decode(format, RawRestoreResponse { body: bytes.to_vec(), ..raw })
    }
}

/// Checks the `status` field, then decodes the full payload.
pub fn expect_success<T: DeserializeOwned>(value: JsonValue) -> ConsoleResult<T> {
    let envelope: ApiMessage = serde_json::from_value(value.clone())?;
    if !envelope.is_success() {
        let message = envelope.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return Err(ConsoleError::api(None, message));
    }
    Ok(serde_json::from_value(value)?)
}
