use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use crate::download;
use crate::error::ConsoleResult;

pub const ADMIN_PLACEHOLDER: &str = "Ready to make API calls...";
pub const ADMIN_SNAPSHOT: &str = "api-response.json";
pub const FILES_PLACEHOLDER: &str = "Ready to load Google Drive files...";
pub const FILES_SNAPSHOT: &str = "google-drive-files-response.json";

/// The response buffer: last payload rendered by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePanel {
    placeholder: &'static str,
    content: String,
}

impl ResponsePanel {
    pub fn new(placeholder: &'static str) -> Self {
        Self { placeholder, content: placeholder.to_string() }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn show_json(&mut self, value: &JsonValue) {
        self.content = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    }

    pub fn show_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    pub fn show_error(&mut self, message: impl std::fmt::Display) {
        self.content = format!("Error: {}", message);
    }

    pub fn clear(&mut self) {
        self.content = self.placeholder.to_string();
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty() || self.content == self.placeholder
    }

    /// Writes the panel content to `dir/filename`. Nothing is written while the
    /// panel only shows its placeholder.
    pub fn export(&self, dir: &Path, filename: &str) -> ConsoleResult<Option<PathBuf>> {
        if self.is_blank() {
            return Ok(None);
        }
        download::save(dir, filename, self.content.as_bytes()).map(Some)
    }
}
