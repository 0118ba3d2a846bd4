//! Resolved BOM trees and cost reports.
//!
//! A `BomNode` tree is built fresh for every resolution request, owned by
//! that request, and discarded once the response is serialized. Nothing
//! here persists.

use serde::{Deserialize, Serialize};

/// What a resolved node represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BomNodeKind {
    /// A node whose structure file was located and expanded.
    Assembly,
    /// A leaf: no structure file, or not expandable by naming convention.
    Component,
    /// Recursion reached the depth bound; the node exists but was not
    /// expanded further. Distinct from "has no children".
    DepthLimited,
}

/// One node of a resolved component hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BomNode {
    pub identifier: String,
    /// Resolved description; empty when the part is undocumented.
    pub description: String,
    /// Quantity as seen from the parent line; 0 at the root.
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub kind: BomNodeKind,
    pub children: Vec<BomNode>,
}

impl BomNode {
    pub fn new(identifier: impl Into<String>, kind: BomNodeKind) -> Self {
        Self {
            identifier: identifier.into(),
            description: String::new(),
            quantity: 0.0,
            reference: None,
            kind,
            children: Vec::new(),
        }
    }

    /// A sentinel node for an identifier reached beyond the depth bound.
    pub fn depth_limited(identifier: impl Into<String>) -> Self {
        Self::new(identifier, BomNodeKind::DepthLimited)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(BomNode::node_count).sum::<usize>()
    }

    /// Number of levels below this node (0 for a childless node).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }
}

/// Outcome of a cost request for one identifier.
///
/// `unit_price` is the part's own last-known purchase price, reported for
/// any identifier. `rolled_up_cost` is the recursive aggregate, reported
/// only for identifiers that classify as assemblies. The two are distinct
/// quantities and are never conflated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostReport {
    pub identifier: String,
    pub is_assembly: bool,
    pub unit_price: Option<f64>,
    pub rolled_up_cost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(identifier: &str, quantity: f64) -> BomNode {
        BomNode {
            quantity,
            ..BomNode::new(identifier, BomNodeKind::Component)
        }
    }

    #[test]
    fn test_node_count_and_depth() {
        let mut root = BomNode::new("PCA-TOP", BomNodeKind::Assembly);
        let mut sub = BomNode::new("PCA-SUB", BomNodeKind::Assembly);
        sub.children.push(child("RES-001", 2.0));
        root.children.push(sub);
        root.children.push(child("CAP-001", 1.0));

        assert_eq!(root.node_count(), 4);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_depth_limited_sentinel_has_no_children() {
        let node = BomNode::depth_limited("PCA-LOOP");
        assert_eq!(node.kind, BomNodeKind::DepthLimited);
        assert!(node.children.is_empty());
        assert_eq!(node.depth(), 0);
    }

    #[test]
    fn test_cost_report_serializes_both_quantities() {
        let report = CostReport {
            identifier: "PCA-SIMPLE".to_string(),
            is_assembly: true,
            unit_price: Some(12.0),
            rolled_up_cost: Some(2.7),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["unit_price"], 12.0);
        assert_eq!(json["rolled_up_cost"], 2.7);
    }
}
