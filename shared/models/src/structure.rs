//! Structure-definition rows.
//!
//! A structure definition lists the direct components of exactly one
//! parent identifier, one `StructureLine` per row, in file order.

use serde::{Deserialize, Serialize};

/// One row of a structure definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructureLine {
    /// Child part identifier.
    pub identifier: String,
    /// Quantity of the child per one parent. See [`normalize_quantity`]
    /// for how raw cell values map onto this field.
    pub quantity: f64,
    /// Reference designator(s), when the row supplies one.
    pub reference: Option<String>,
    /// Description override, when the row supplies one.
    pub description: Option<String>,
}

impl StructureLine {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            quantity: 1.0,
            reference: None,
            description: None,
        }
    }
}

/// How a raw quantity cell was normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityRule {
    /// The cell parsed as a non-negative number and was used as-is.
    Parsed,
    /// The cell was absent, blank, or unparseable; quantity defaults to 1.
    DefaultedToOne,
    /// The cell parsed negative and was clamped to 0. Callers are expected
    /// to surface this (the clamp is a validation event, not a default).
    ClampedToZero,
}

/// Normalizes a raw quantity cell into a non-negative quantity.
///
/// Policy: absent/unparseable -> 1, negative -> 0 (reported via
/// [`QuantityRule::ClampedToZero`]), zero preserved as a legitimate
/// do-not-populate line.
pub fn normalize_quantity(raw: Option<&str>) -> (f64, QuantityRule) {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return (1.0, QuantityRule::DefaultedToOne);
    };
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => (value, QuantityRule::Parsed),
        Ok(value) if value.is_finite() => (0.0, QuantityRule::ClampedToZero),
        _ => (1.0, QuantityRule::DefaultedToOne),
    }
}
