//! Part catalog domain models.
//!
//! A part record is one data row read from a catalog record file. Records
//! are rebuilt from disk on every catalog load and never cached across
//! requests, so the structs here carry no identity or timestamps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single catalog entry: the part identifier plus the raw field
/// dictionary from its record file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartRecord {
    /// Catalog-unique part identifier.
    pub identifier: String,
    /// Lowercased header name -> cell value, exactly as read from the file.
    pub fields: HashMap<String, String>,
    /// Category the record was loaded from (sub-directory or file stem).
    pub category: String,
}

impl PartRecord {
    pub fn new(identifier: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            fields: HashMap::new(),
            category: category.into(),
        }
    }

    /// Returns a trimmed, non-empty field value by lowercased header name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// The part's catalog description, or `""` when undocumented.
    pub fn description(&self) -> &str {
        self.field("description")
            .or_else(|| self.field("desc"))
            .unwrap_or("")
    }
}

/// The naming convention that classifies an identifier as an assembly.
///
/// Classification is a pure, case-insensitive string-prefix check. It is
/// deliberately independent of catalog contents and of whether a structure
/// file actually exists, so the same identifier classifies identically
/// within and across requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssemblyNaming {
    prefixes: Vec<String>,
}

impl Default for AssemblyNaming {
    fn default() -> Self {
        Self::new(["PCA", "ASY"])
    }
}

impl AssemblyNaming {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.into().trim().to_uppercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Whether `identifier` is eligible for structure expansion.
    pub fn is_assembly(&self, identifier: &str) -> bool {
        let upper = identifier.trim().to_uppercase();
        self.prefixes.iter().any(|p| upper.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_candidates() {
        let mut record = PartRecord::new("RES-001", "resistors");
        record
            .fields
            .insert("desc".to_string(), "10k 1% 0402".to_string());
        assert_eq!(record.description(), "10k 1% 0402");

        record
            .fields
            .insert("description".to_string(), "10k resistor".to_string());
        assert_eq!(record.description(), "10k resistor");
    }

    #[test]
    fn test_description_empty_when_undocumented() {
        let record = PartRecord::new("RES-001", "resistors");
        assert_eq!(record.description(), "");
    }

    #[test]
    fn test_field_trims_and_drops_blank() {
        let mut record = PartRecord::new("CAP-001", "capacitors");
        record.fields.insert("value".to_string(), "  100nF ".to_string());
        record.fields.insert("finish".to_string(), "   ".to_string());
        assert_eq!(record.field("value"), Some("100nF"));
        assert_eq!(record.field("finish"), None);
    }

    #[test]
    fn test_assembly_classification_is_prefix_only() {
        let naming = AssemblyNaming::default();
        assert!(naming.is_assembly("PCA-SIMPLE"));
        assert!(naming.is_assembly("pca-simple"));
        assert!(naming.is_assembly("Asy-100"));
        assert!(!naming.is_assembly("RES-001"));
        assert!(!naming.is_assembly("XPCA-001"));
        assert!(!naming.is_assembly(""));
    }

    #[test]
    fn test_assembly_classification_custom_prefixes() {
        let naming = AssemblyNaming::new(["kit"]);
        assert!(naming.is_assembly("KIT-9"));
        assert!(!naming.is_assembly("PCA-SIMPLE"));
    }
}
