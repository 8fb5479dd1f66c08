//! Plain-text renderings of API payloads.

use crate::csv_export::format_timestamp;
use crate::types::{DocumentStats, DriveFile, DriveFileRow, LogStats, QuipDocument, SearchResponse};

pub const NA: &str = "N/A";

fn or_na(v: &Option<String>) -> &str {
    v.as_deref().filter(|s| !s.is_empty()).unwrap_or(NA)
}

/// Two panes of the search result: the source record and its Drive counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonView {
    pub source_pane: String,
    pub drive_pane: String,
    /// Drive pane first when the lookup went through the Drive ID.
    pub drive_first: bool,
}

impl ComparisonView {
    pub fn error(message: &str) -> Self {
        Self {
            source_pane: format!("Error: {}", message),
            drive_pane: "No data available due to error.".to_string(),
            drive_first: false,
        }
    }

    pub fn to_text(&self) -> String {
        let source = format!("== Quip Document ==\n{}", self.source_pane);
        let drive = format!("== Google Drive File ==\n{}", self.drive_pane);
        if self.drive_first {
            format!("{}\n\n{}", drive, source)
        } else {
            format!("{}\n\n{}", source, drive)
        }
    }
}

fn source_file_pane(document_type: &str, doc: &QuipDocument) -> String {
    format!(
        "Document Type: {}\nQuip ID: {}\nName: {}\nGoogle Drive ID: {}\nDocument Type: {}\nAuthor: {}\nCreated: {}\nMigration Completed: {}",
        document_type,
        doc.quip_id,
        or_na(&doc.obfuscated_name),
        or_na(&doc.google_drive_id),
        or_na(&doc.document_type),
        or_na(&doc.author),
        or_na(&doc.when_quip_created),
        or_na(&doc.when_migration_completed),
    )
}

fn source_folder_pane(document_type: &str, doc: &QuipDocument) -> String {
    let members = doc.member_count.filter(|n| *n != 0).map(|n| n.to_string());
    format!(
        "Document Type: {}\nQuip ID: {}\nName: {}\nGoogle Drive ID: {}\nParent Folder: {}\nInherit Mode: {}\nMember Count: {}",
        document_type,
        doc.quip_id,
        or_na(&doc.obfuscated_name),
        or_na(&doc.google_drive_id),
        or_na(&doc.parent_folder),
        or_na(&doc.inherit_mode),
        or_na(&members),
    )
}

fn drive_pane(file: &DriveFile) -> String {
    format!(
        "File ID: {}\nFile Name: {}\nFile URL: {}\nCreated: {}",
        file.google_drive_file_id,
        or_na(&file.google_drive_file_name),
        or_na(&file.google_drive_file_url),
        or_na(&file.created_at),
    )
}

pub fn comparison_view(data: &SearchResponse) -> ComparisonView {
    let document_type = data.document_type.as_deref().unwrap_or(NA);
    let by_drive = data.search_type.as_deref() == Some("google");

    let drive = data
        .google_drive_file
        .as_ref()
        .map(drive_pane)
        .unwrap_or_else(|| "No corresponding Google Drive file found for this Quip document.".to_string());

    let source = match &data.quip_document {
        // Folder attributes are only shown when the lookup went through the Drive ID.
        Some(doc) if by_drive && document_type != "file" => source_folder_pane(document_type, doc),
        Some(doc) => source_file_pane(document_type, doc),
        None => "No corresponding Quip document found for this Google Drive file.".to_string(),
    };

    ComparisonView { source_pane: source, drive_pane: drive, drive_first: by_drive }
}

pub fn stats_summary(stats: &DocumentStats, logs: Option<&LogStats>) -> String {
    let mut out = format!(
        "Migration Statistics:\n\nTotal Documents: {}\nMigrated: {}\nPending: {}\nFailed: {}",
        stats.total,
        stats.migrated,
        stats.pending,
        stats.failed_or_zero()
    );
    if let Some(logs) = logs {
        out.push_str(&format!("\nLog Entries: {} ({} today)", logs.total, logs.today));
    }
    out
}

const TABLE_HEADER: [&str; 7] =
    ["ID", "Quip Document ID", "Google Drive File ID", "File Name", "File URL", "Created", "Document Type"];

fn table_cells(file: &DriveFileRow) -> [String; 7] {
    [
        file.id.to_string(),
        or_na(&file.quip_document_id).to_string(),
        or_na(&file.google_drive_file_id).to_string(),
        or_na(&file.google_drive_file_name).to_string(),
        or_na(&file.google_drive_file_url).to_string(),
        file.when_quip_created.as_deref().map(format_timestamp).unwrap_or_else(|| NA.to_string()),
        or_na(&file.document_type).to_string(),
    ]
}

/// Renders the listing as an aligned text table.
pub fn files_table(files: &[DriveFileRow]) -> String {
    if files.is_empty() {
        return "No files found".to_string();
    }
    let rows: Vec<[String; 7]> = files.iter().map(table_cells).collect();
    let mut widths: Vec<usize> = TABLE_HEADER.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let fmt_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = TABLE_HEADER.iter().map(|h| h.to_string()).collect();
    let mut out = vec![fmt_row(&header)];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in &rows {
        out.push(fmt_row(row));
    }
    out.join("\n")
}
