//! Decides whether a search input refers to a Quip document or a Google Drive file.
//!
//! The long-ID rule is a heuristic: short Drive IDs end up classified as Quip
//! IDs and long Quip IDs as Drive IDs. The server does not correct this, the
//! search simply comes back empty.

use lazy_static::lazy_static;
use regex::Regex;

/// Minimum length of a bare string to be taken for a Drive ID.
pub const DRIVE_ID_MIN_LEN: usize = 25;

lazy_static! {
    // Order matters: document, spreadsheet, presentation.
    static ref DRIVE_URL_PATTERNS: [Regex; 3] = [
        Regex::new(r"docs\.google\.com/document/d/([a-zA-Z0-9_-]+)").unwrap(),
        Regex::new(r"docs\.google\.com/spreadsheets/d/([a-zA-Z0-9_-]+)").unwrap(),
        Regex::new(r"docs\.google\.com/presentation/d/([a-zA-Z0-9_-]+)").unwrap(),
    ];
    static ref DRIVE_ID_PATTERN: Regex =
        Regex::new(&format!(r"^[a-zA-Z0-9_-]{{{},}}$", DRIVE_ID_MIN_LEN)).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    /// Native ID of the source platform, forwarded verbatim.
    Source(String),
    /// Google Drive ID, either taken verbatim or extracted from a Docs URL.
    Drive { id: String, from_url: bool },
}

impl DocumentRef {
    pub fn id(&self) -> &str {
        match self {
            DocumentRef::Source(id) => id,
            DocumentRef::Drive { id, .. } => id,
        }
    }

    /// Value of the `search_type` query parameter.
    pub fn search_type(&self) -> &'static str {
        match self {
            DocumentRef::Source(_) => "quip",
            DocumentRef::Drive { .. } => "google",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DocumentRef::Drive { id, from_url: true } => {
                format!("Extracted Google Drive ID: {} from URL", id)
            }
            DocumentRef::Drive { id, from_url: false } => {
                format!("Searching for Google Drive ID: {}", id)
            }
            DocumentRef::Source(id) => format!("Searching for Quip Document ID: {}", id),
        }
    }
}

pub fn classify(input: &str) -> DocumentRef {
    let input = input.trim();

    for pattern in DRIVE_URL_PATTERNS.iter() {
        if let Some(m) = pattern.captures(input).and_then(|c| c.get(1)) {
            return DocumentRef::Drive { id: m.as_str().to_string(), from_url: true };
        }
    }

    if DRIVE_ID_PATTERN.is_match(input) {
        return DocumentRef::Drive { id: input.to_string(), from_url: false };
    }

    DocumentRef::Source(input.to_string())
}
