#[cfg(test)]
mod tests {
    use crate::csv_export::{format_timestamp, generate_csv, CSV_HEADER};
    use crate::types::DriveFileRow;

    const HEADER_LINE: &str = "\"ID\",\"Quip Document ID\",\"Google Drive File ID\",\"File Name\",\"File URL\",\"Created At\",\"Document Type\",\"Author\",\"Migration Completed\"";

    fn row(id: i64, name: &str) -> DriveFileRow {
        DriveFileRow {
            id,
            quip_document_id: Some(format!("QUIP{}", id)),
            google_drive_file_id: Some(format!("drive-{}", id)),
            google_drive_file_name: Some(name.to_string()),
            google_drive_file_url: Some(format!("https://docs.google.com/document/d/drive-{}/edit", id)),
            document_type: Some("DOCUMENT".to_string()),
            author: Some("alex".to_string()),
            when_quip_created: None,
            when_migration_completed: None,
        }
    }

    #[test]
    fn test_header_only_for_empty_listing() {
        assert_eq!(generate_csv(&[]), HEADER_LINE);
        assert_eq!(CSV_HEADER.len(), 9);
    }

    #[test]
    fn test_one_line_per_file() {
        let csv = generate_csv(&[row(1, "Plan"), row(2, "Budget")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER_LINE);
        assert_eq!(
            lines[1],
            "\"1\",\"QUIP1\",\"drive-1\",\"Plan\",\"https://docs.google.com/document/d/drive-1/edit\",\"\",\"DOCUMENT\",\"alex\",\"\""
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = generate_csv(&[row(7, "The \"final\" draft")]);
        assert!(csv.contains("\"The \"\"final\"\" draft\""));
    }

    #[test]
    fn test_newlines_in_cells_are_flattened() {
        let csv = generate_csv(&[row(1, "line one\nline two\r")]);
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"line one line two \""));
    }

    #[test]
    fn test_missing_values_are_empty() {
        let csv = generate_csv(&[DriveFileRow { id: 3, ..Default::default() }]);
        let data = csv.lines().nth(1).unwrap();
        assert_eq!(data, "\"3\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\"");
    }

    #[test]
    fn test_timestamps_are_reformatted() {
        let mut file = row(1, "Plan");
        file.when_quip_created = Some("2023-04-01T10:00:00".to_string());
        let csv = generate_csv(&[file]);
        let expected = format_timestamp("2023-04-01T10:00:00");
        assert!(csv.contains(&format!("\"{}\"", expected)));
        assert!(!csv.contains("2023-04-01T10:00:00"));
    }

    #[test]
    fn test_format_timestamp_shapes() {
        let formatted = format_timestamp("2023-04-01T10:00:00.123456");
        assert_eq!(formatted.len(), "2023-04-01 10:00:00".len());
        assert!(formatted.starts_with("2023-0"));

        let with_offset = format_timestamp("2023-04-01T10:00:00+00:00");
        assert_eq!(with_offset, format_timestamp("2023-04-01T10:00:00"));

        assert_eq!(format_timestamp("last tuesday"), "last tuesday");
    }
}
