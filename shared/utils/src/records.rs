//! Record-file parsing.
//!
//! Catalog record files and structure files share one flat tabular text
//! format: an optional `# <title>` first line, a lowercased header row,
//! then comma-delimited data rows. Rows that fail to parse are reported
//! as warnings, never as errors; a file only fails to parse when its
//! header row is missing or the file cannot be read at all.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Header names that may carry the part identifier, probed in order.
pub const IDENTIFIER_COLUMNS: &[&str] = &["identifier", "part number", "part_number", "pn"];
/// Header names for the quantity cell of a structure row.
pub const QUANTITY_COLUMNS: &[&str] = &["quantity", "qty"];
/// Header names for the reference-designator cell of a structure row.
pub const REFERENCE_COLUMNS: &[&str] = &["reference", "ref", "ref des", "refdes"];
/// Header names for a description cell.
pub const DESCRIPTION_COLUMNS: &[&str] = &["description", "desc"];

/// One parsed data row: lowercased header name -> raw cell value.
#[derive(Debug, Clone)]
pub struct RecordRow {
    /// 1-based line number in the source file.
    pub line_number: usize,
    pub values: HashMap<String, String>,
}

impl RecordRow {
    /// First trimmed, non-empty value among the candidate column names.
    pub fn value(&self, candidates: &[&str]) -> Option<&str> {
        for candidate in candidates {
            if let Some(value) = self.values.get(*candidate) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed);
                }
            }
        }
        None
    }
}

/// A fully parsed record file.
#[derive(Debug, Clone)]
pub struct RecordFile {
    /// Title directive from the first line, if one was present.
    pub title: Option<String>,
    /// Lowercased, trimmed header cells in file order.
    pub headers: Vec<String>,
    pub rows: Vec<RecordRow>,
    /// One entry per data row that failed to parse and was skipped.
    pub parse_warnings: Vec<String>,
}

impl RecordFile {
    /// The identifier cell of a row: one of [`IDENTIFIER_COLUMNS`], falling
    /// back to the first column when no header matched.
    pub fn identifier_of<'a>(&self, row: &'a RecordRow) -> Option<&'a str> {
        if let Some(value) = row.value(IDENTIFIER_COLUMNS) {
            return Some(value);
        }
        let first = self.headers.first()?;
        row.values
            .get(first)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Parse record-file text. Fails only when the header row is missing.
pub fn parse_record_text(text: &str) -> Result<RecordFile> {
    // A first line starting with '#' is the title directive, consumed
    // before the tabular content.
    let (title, body) = match text.strip_prefix('#') {
        Some(rest) => {
            let (line, remainder) = rest.split_once('\n').unwrap_or((rest, ""));
            (Some(line.trim().to_string()), remainder)
        }
        None => (None, text),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(|h| h.to_lowercase().trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        anyhow::bail!("Missing header row");
    }

    // Line number of the first data row in the source file.
    let data_start = if title.is_some() { 3 } else { 2 };

    let mut rows = Vec::new();
    let mut parse_warnings = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let line_number = data_start + idx;
        match result {
            Ok(record) => {
                let values: HashMap<String, String> = headers
                    .iter()
                    .enumerate()
                    .filter_map(|(i, h)| record.get(i).map(|v| (h.clone(), v.to_string())))
                    .collect();
                rows.push(RecordRow {
                    line_number,
                    values,
                });
            }
            Err(e) => {
                parse_warnings.push(format!("Row {}: Parse error - {}", line_number, e));
            }
        }
    }

    Ok(RecordFile {
        title,
        headers,
        rows,
        parse_warnings,
    })
}

/// Read and parse a record file from disk.
pub fn parse_record_file(path: &Path) -> Result<RecordFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file {}", path.display()))?;
    parse_record_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_title_directive_is_consumed() {
        let file = parse_record_text("# Resistors\npn,description\nRES-001,10k\n").unwrap();
        assert_eq!(file.title.as_deref(), Some("Resistors"));
        assert_eq!(file.headers, vec!["pn", "description"]);
        assert_eq!(file.rows.len(), 1);
    }

    #[test]
    fn test_no_title_first_line_is_header() {
        let file = parse_record_text("pn,description\nRES-001,10k\n").unwrap();
        assert!(file.title.is_none());
        assert_eq!(file.rows.len(), 1);
        assert_eq!(file.rows[0].line_number, 2);
    }

    #[test]
    fn test_identifier_header_candidates() {
        for header in ["identifier", "Part Number", "part_number", "PN"] {
            let text = format!("{},description\nRES-001,10k\n", header);
            let file = parse_record_text(&text).unwrap();
            assert_eq!(
                file.identifier_of(&file.rows[0]),
                Some("RES-001"),
                "header {:?}",
                header
            );
        }
    }

    #[test]
    fn test_identifier_falls_back_to_first_column() {
        let file = parse_record_text("item,notes\nCAP-001,ceramic\n").unwrap();
        assert_eq!(file.identifier_of(&file.rows[0]), Some("CAP-001"));
    }

    #[test]
    fn test_ragged_rows_are_tolerated() {
        let file = parse_record_text("pn,qty,ref\nRES-001,2\nCAP-001,1,C1,extra\n").unwrap();
        assert_eq!(file.rows.len(), 2);
        assert_eq!(file.rows[0].value(QUANTITY_COLUMNS), Some("2"));
        assert_eq!(file.rows[0].value(REFERENCE_COLUMNS), None);
        assert_eq!(file.rows[1].value(REFERENCE_COLUMNS), Some("C1"));
    }

    #[test]
    fn test_quoted_cells() {
        let file = parse_record_text("pn,description\nIC-001,\"op-amp, dual\"\n").unwrap();
        assert_eq!(
            file.rows[0].value(DESCRIPTION_COLUMNS),
            Some("op-amp, dual")
        );
    }

    #[test]
    fn test_empty_text_is_missing_header() {
        assert!(parse_record_text("").is_err());
        assert!(parse_record_text("# Only a title\n").is_err());
    }

    proptest! {
        /// Every well-formed data row survives parsing with its identifier
        /// intact, regardless of the surrounding values.
        #[test]
        fn prop_rows_keep_identifier(
            identifier in "[A-Z]{2,4}-[0-9]{3}",
            description in "[A-Za-z0-9 ]{0,20}",
        ) {
            let text = format!("pn,description\n{},{}\n", identifier, description);
            let file = parse_record_text(&text).unwrap();
            prop_assert_eq!(file.rows.len(), 1);
            prop_assert_eq!(file.identifier_of(&file.rows[0]), Some(identifier.as_str()));
        }
    }
}
