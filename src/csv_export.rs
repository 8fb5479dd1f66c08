use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::types::DriveFileRow;

pub const CSV_FILENAME: &str = "google-drive-files.csv";

pub const CSV_HEADER: [&str; 9] = [
    "ID",
    "Quip Document ID",
    "Google Drive File ID",
    "File Name",
    "File URL",
    "Created At",
    "Document Type",
    "Author",
    "Migration Completed",
];

fn quote(cell: &str) -> String {
    format!("\"{}\"", escape_csv(cell))
}

fn escape_csv(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => vec!['"', '"'],
            '\n' | '\r' => vec![' '],
            c if c.is_control() => vec![' '],
            c => vec![c],
        })
        .collect()
}

/// Renders an ISO timestamp in local time. Naive timestamps are taken as UTC,
/// which is how the API stores them. Unparseable input is kept verbatim.
pub fn format_timestamp(raw: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M:%S";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(OUT).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local.from_utc_datetime(&naive).format(OUT).to_string();
        }
    }
    raw.to_string()
}

fn opt(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

fn opt_time(v: &Option<String>) -> String {
    v.as_deref().map(format_timestamp).unwrap_or_default()
}

fn row_cells(file: &DriveFileRow) -> [String; 9] {
    [
        file.id.to_string(),
        opt(&file.quip_document_id).to_string(),
        opt(&file.google_drive_file_id).to_string(),
        opt(&file.google_drive_file_name).to_string(),
        opt(&file.google_drive_file_url).to_string(),
        opt_time(&file.when_quip_created),
        opt(&file.document_type).to_string(),
        opt(&file.author).to_string(),
        opt_time(&file.when_migration_completed),
    ]
}

/// Serializes the full listing: header plus one line per file, every cell quoted.
pub fn generate_csv(files: &[DriveFileRow]) -> String {
    let mut lines = Vec::with_capacity(files.len() + 1);
    lines.push(CSV_HEADER.iter().map(|h| quote(h)).collect::<Vec<_>>().join(","));
    for file in files {
        lines.push(row_cells(file).iter().map(|c| quote(c)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}
