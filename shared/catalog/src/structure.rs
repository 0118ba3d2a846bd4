//! Structure-definition parsing.
//!
//! Turns one structure file into the ordered `StructureLine`s naming the
//! direct components of a single parent identifier. Malformed rows are
//! skipped per-row and warned about; they never fail the parse.

use std::path::Path;

use anyhow::Result;
use tracing::warn;

use fabrica_models::{normalize_quantity, QuantityRule, StructureLine};
use fabrica_utils::records::{
    parse_record_file, DESCRIPTION_COLUMNS, QUANTITY_COLUMNS, REFERENCE_COLUMNS,
};

/// The parsed structure definition of one parent identifier.
#[derive(Debug, Clone)]
pub struct StructureDefinition {
    pub parent: String,
    /// Direct component lines, in file row order.
    pub lines: Vec<StructureLine>,
    /// Rows dropped for being unparseable or lacking an identifier.
    pub skipped_rows: usize,
}

/// Reads and parses the structure file at `path` for `parent`.
pub fn parse_structure_file(path: &Path, parent: &str) -> Result<StructureDefinition> {
    let file = parse_record_file(path)?;
    for warning in &file.parse_warnings {
        warn!(file = %path.display(), "{}", warning);
    }

    let mut lines = Vec::new();
    let mut skipped_rows = file.parse_warnings.len();

    for row in &file.rows {
        let Some(identifier) = file.identifier_of(row) else {
            warn!(
                file = %path.display(),
                row = row.line_number,
                "Structure row has no component identifier, skipped"
            );
            skipped_rows += 1;
            continue;
        };

        let (quantity, rule) = normalize_quantity(row.value(QUANTITY_COLUMNS));
        if rule == QuantityRule::ClampedToZero {
            warn!(
                file = %path.display(),
                row = row.line_number,
                identifier,
                "Negative quantity clamped to zero"
            );
        }

        lines.push(StructureLine {
            identifier: identifier.to_string(),
            quantity,
            reference: row.value(REFERENCE_COLUMNS).map(str::to_string),
            description: row.value(DESCRIPTION_COLUMNS).map(str::to_string),
        });
    }

    Ok(StructureDefinition {
        parent: parent.to_string(),
        lines,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> StructureDefinition {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PCA-TEST.csv");
        fs::write(&path, content).unwrap();
        parse_structure_file(&path, "PCA-TEST").unwrap()
    }

    #[test]
    fn test_lines_keep_file_order() {
        let def = parse("pn,qty,ref\nRES-001,2,R1 R2\nCAP-001,1,C1\nIC-001,1,U1\n");
        let identifiers: Vec<&str> = def.lines.iter().map(|l| l.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["RES-001", "CAP-001", "IC-001"]);
        assert_eq!(def.lines[0].quantity, 2.0);
        assert_eq!(def.lines[0].reference.as_deref(), Some("R1 R2"));
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let def = parse("pn,qty\nRES-001,\nCAP-001,abc\n");
        assert_eq!(def.lines[0].quantity, 1.0);
        assert_eq!(def.lines[1].quantity, 1.0);
    }

    #[test]
    fn test_negative_quantity_is_clamped() {
        let def = parse("pn,qty\nRES-001,-4\n");
        assert_eq!(def.lines[0].quantity, 0.0);
        assert_eq!(def.skipped_rows, 0);
    }

    #[test]
    fn test_rows_without_identifier_are_skipped() {
        let def = parse("pn,qty\n,2\nRES-001,1\n");
        assert_eq!(def.lines.len(), 1);
        assert_eq!(def.skipped_rows, 1);
        assert_eq!(def.lines[0].identifier, "RES-001");
    }

    #[test]
    fn test_description_override_is_optional() {
        let def = parse("pn,qty,description\nRES-001,1,precision shunt\nCAP-001,1,\n");
        assert_eq!(def.lines[0].description.as_deref(), Some("precision shunt"));
        assert!(def.lines[1].description.is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PCA-GONE.csv");
        assert!(parse_structure_file(&path, "PCA-GONE").is_err());
    }
}
