//! Cost Rollup Engine
//!
//! Walks the same structure expansion as the resolver but accumulates a
//! monetary total instead of building a tree. Depth-truncated and
//! structureless nodes contribute zero: an unresolved branch may
//! under-report a total, never inflate it.

use std::path::Path;

use tracing::{debug, warn};

use fabrica_models::AssemblyNaming;

use crate::locator::find_structure_file;
use crate::pricing::PriceSource;
use crate::structure::parse_structure_file;

pub struct CostRollup<'a> {
    catalog_root: &'a Path,
    naming: &'a AssemblyNaming,
    structure_extension: &'a str,
    prices: &'a dyn PriceSource,
}

impl<'a> CostRollup<'a> {
    pub fn new(
        catalog_root: &'a Path,
        naming: &'a AssemblyNaming,
        structure_extension: &'a str,
        prices: &'a dyn PriceSource,
    ) -> Self {
        Self {
            catalog_root,
            naming,
            structure_extension,
            prices,
        }
    }

    /// Aggregate cost of `identifier`'s hierarchy: for each structure line
    /// with quantity `q`, an expandable child contributes `q` times its own
    /// rollup, a leaf contributes `q` times its last-known unit price
    /// (zero when unpriced).
    pub fn rollup_cost(&self, identifier: &str, depth: u32, max_depth: u32) -> f64 {
        if depth > max_depth {
            return 0.0;
        }

        let Some(path) =
            find_structure_file(self.catalog_root, identifier, self.structure_extension)
        else {
            return 0.0;
        };

        let definition = match parse_structure_file(&path, identifier) {
            Ok(definition) => definition,
            Err(e) => {
                warn!(
                    file = %path.display(),
                    error = %e,
                    "Structure file unreadable, contributing zero cost"
                );
                return 0.0;
            }
        };

        let mut total = 0.0;
        for line in &definition.lines {
            let contribution = if self.naming.is_assembly(&line.identifier) {
                line.quantity * self.rollup_cost(&line.identifier, depth + 1, max_depth)
            } else {
                line.quantity * self.prices.unit_price(&line.identifier).unwrap_or(0.0)
            };
            total += contribution;
        }

        debug!(identifier, depth, total, "Rolled up assembly cost");
        total
    }
}
