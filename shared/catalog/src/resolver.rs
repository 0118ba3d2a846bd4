//! BOM Resolution Engine
//!
//! Expands a part identifier into a labeled tree of direct and transitive
//! components. Recursion is depth-indexed: a node reached beyond the
//! bound becomes a sentinel instead of expanding further, which is the
//! sole cycle-breaking mechanism. There is deliberately no visited-set,
//! so a shared sub-assembly appearing on sibling branches expands on each
//! of them.

use std::path::Path;

use tracing::{debug, warn};

use fabrica_models::{AssemblyNaming, BomNode, BomNodeKind, StructureLine};

use crate::loader::Catalog;
use crate::locator::find_structure_file;
use crate::structure::parse_structure_file;

pub struct BomResolver<'a> {
    catalog: &'a Catalog,
    catalog_root: &'a Path,
    naming: &'a AssemblyNaming,
    structure_extension: &'a str,
}

impl<'a> BomResolver<'a> {
    pub fn new(
        catalog: &'a Catalog,
        catalog_root: &'a Path,
        naming: &'a AssemblyNaming,
        structure_extension: &'a str,
    ) -> Self {
        Self {
            catalog,
            catalog_root,
            naming,
            structure_extension,
        }
    }

    /// Resolves `identifier` into a BOM tree. `depth` is 0 at the root;
    /// `max_depth` is the number of additional levels allowed below it.
    ///
    /// Failures inside the traversal (missing records, unreadable nested
    /// structure files) degrade to empty descriptions or childless nodes;
    /// they are never propagated upward.
    pub fn resolve(&self, identifier: &str, depth: u32, max_depth: u32) -> BomNode {
        if depth > max_depth {
            debug!(identifier, depth, "Depth bound reached, emitting sentinel");
            return BomNode::depth_limited(identifier);
        }

        // Absence from the catalog is tolerated: an undocumented component
        // still resolves, with an empty description.
        let description = self.catalog_description(identifier);

        let Some(path) =
            find_structure_file(self.catalog_root, identifier, self.structure_extension)
        else {
            // No structure file: a leaf for resolution purposes, whatever
            // the naming convention says.
            let mut node = BomNode::new(identifier, BomNodeKind::Component);
            node.description = description;
            return node;
        };

        let mut node = BomNode::new(identifier, BomNodeKind::Assembly);
        node.description = description;

        let definition = match parse_structure_file(&path, identifier) {
            Ok(definition) => definition,
            Err(e) => {
                warn!(
                    file = %path.display(),
                    error = %e,
                    "Structure file unreadable, resolving as childless"
                );
                return node;
            }
        };

        for line in &definition.lines {
            node.children.push(self.resolve_line(line, depth, max_depth));
        }

        node
    }

    /// Materializes one structure line as a child node, recursing when the
    /// child classifies as an assembly.
    fn resolve_line(&self, line: &StructureLine, depth: u32, max_depth: u32) -> BomNode {
        let mut child = if self.naming.is_assembly(&line.identifier) {
            self.resolve(&line.identifier, depth + 1, max_depth)
        } else {
            let mut node = BomNode::new(line.identifier.as_str(), BomNodeKind::Component);
            node.description = self.catalog_description(&line.identifier);
            node
        };

        // The parent's line owns quantity and reference; its description
        // wins over whatever the child resolved for itself.
        child.quantity = line.quantity;
        child.reference = line.reference.clone();
        if let Some(description) = &line.description {
            child.description = description.clone();
        }
        child
    }

    fn catalog_description(&self, identifier: &str) -> String {
        self.catalog
            .find(identifier)
            .map(|record| record.description().to_string())
            .unwrap_or_default()
    }
}
