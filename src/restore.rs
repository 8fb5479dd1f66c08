//! Restore responses, decoded once into [`RestoreOutcome`].
//!
//! The server answers a restore either with a JSON body carrying the document
//! inline (HTML) or with the converted file itself (DOCX/PDF) plus a
//! `Content-Disposition` filename. Which one it is gets decided by the
//! response's content type, not by the format that was asked for.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value as JsonValue;

use crate::download;
use crate::error::{ConsoleError, ConsoleResult};
use crate::types::{RestoreJson, STATUS_SUCCESS};

pub const GENERIC_RESTORE_FAILURE: &str = "Failed to restore document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreFormat {
    Docx,
    Pdf,
    Html,
}

impl RestoreFormat {
    pub const ALL: [RestoreFormat; 3] = [RestoreFormat::Docx, RestoreFormat::Pdf, RestoreFormat::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            RestoreFormat::Docx => "docx",
            RestoreFormat::Pdf => "pdf",
            RestoreFormat::Html => "html",
        }
    }

    pub fn default_filename(&self) -> String {
        format!("document.{}", self.as_str())
    }
}

impl fmt::Display for RestoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestoreFormat {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docx" => Ok(RestoreFormat::Docx),
            "pdf" => Ok(RestoreFormat::Pdf),
            "html" => Ok(RestoreFormat::Html),
            other => Err(ConsoleError::InvalidInput(format!("Unsupported output format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Inline { filename: String, content: String, title: Option<String> },
    Binary { filename: String, bytes: Vec<u8> },
}

impl RestoreOutcome {
    pub fn filename(&self) -> &str {
        match self {
            RestoreOutcome::Inline { filename, .. } => filename,
            RestoreOutcome::Binary { filename, .. } => filename,
        }
    }

    pub fn inline_content(&self) -> Option<&str> {
        match self {
            RestoreOutcome::Inline { content, .. } => Some(content),
            RestoreOutcome::Binary { .. } => None,
        }
    }
}

/// Raw pieces of a restore response, independent of the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct RawRestoreResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl RawRestoreResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }
}

pub fn decode(format: RestoreFormat, resp: RawRestoreResponse) -> ConsoleResult<RestoreOutcome> {
    if !resp.is_success() {
        let message = serde_json::from_slice::<JsonValue>(&resp.body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_RESTORE_FAILURE.to_string());
        return Err(ConsoleError::api(Some(resp.status), message));
    }

    if resp.is_json() {
        let data: RestoreJson = serde_json::from_slice(&resp.body)?;
        if data.status != STATUS_SUCCESS {
            let message = data.message.unwrap_or_else(|| GENERIC_RESTORE_FAILURE.to_string());
            return Err(ConsoleError::api(Some(resp.status), message));
        }
        let content = data
            .content
            .ok_or_else(|| ConsoleError::Decode("restore response without content".into()))?;
        let filename = data
            .filename
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| format.default_filename());
        return Ok(RestoreOutcome::Inline { filename, content, title: data.title });
    }

    let filename = resp
        .content_disposition
        .as_deref()
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| format.default_filename());
    Ok(RestoreOutcome::Binary { filename, bytes: resp.body })
}

/// Extracts the `filename=` value of a `Content-Disposition` header.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let value = rest.split(';').next().unwrap_or("").replace('"', "");
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Writes the restored document into `dir` and returns its path.
pub fn materialize(outcome: &RestoreOutcome, dir: &Path) -> ConsoleResult<PathBuf> {
    match outcome {
        RestoreOutcome::Inline { filename, content, .. } => download::save(dir, filename, content.as_bytes()),
        RestoreOutcome::Binary { filename, bytes } => download::save(dir, filename, bytes),
    }
}
