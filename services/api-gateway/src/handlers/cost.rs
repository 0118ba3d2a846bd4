//! Cost Rollup Handler
//!
//! Reports a part's last-known unit price and, for assemblies, the
//! recursively rolled-up cost of its structure.

use axum::{
    extract::{Path, State},
    response::Json,
};

use fabrica_catalog::{find_structure_file, CatalogLoader, CostRollup, PricingRepository};
use fabrica_models::{AssemblyNaming, CostReport};
use fabrica_utils::{validate_identifier, FabricaError};

use crate::middleware::ApiError;
use crate::AppState;

/// Report costs for any identifier.
///
/// GET /api/v1/cost/{identifier}
pub async fn get_cost(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<CostReport>, ApiError> {
    validate_identifier(&identifier)?;

    let catalog_config = &state.config.catalog;
    let naming = AssemblyNaming::new(catalog_config.assembly_prefixes.clone());
    let repository = PricingRepository::new(state.postgres_pool.clone());

    // Every identifier gets a last-known-price lookup, assembly or not.
    let unit_price = repository
        .latest_unit_price(&identifier)
        .await
        .map_err(|e| FabricaError::database(e.to_string()))?;

    let is_assembly = naming.is_assembly(&identifier);

    // The rollup only runs for assemblies, over a price snapshot loaded
    // once for the whole traversal.
    let mut rolled_up_cost = None;
    if is_assembly {
        let price_book = repository
            .load_price_book()
            .await
            .map_err(|e| FabricaError::database(e.to_string()))?;
        let rollup = CostRollup::new(
            &catalog_config.root_dir,
            &naming,
            &catalog_config.structure_extension,
            &price_book,
        );
        rolled_up_cost = Some(rollup.rollup_cost(&identifier, 0, catalog_config.max_depth));
    }

    // A part that is nowhere to be found - no price history, no structure
    // file, no catalog record - is a client error, not an all-null report.
    if unit_price.is_none() {
        let structure = find_structure_file(
            &catalog_config.root_dir,
            &identifier,
            &catalog_config.structure_extension,
        );
        if structure.is_none() {
            let catalog = CatalogLoader::new(&catalog_config.root_dir).load()?;
            if catalog.find(&identifier).is_none() {
                return Err(FabricaError::not_found(format!("part {}", identifier)).into());
            }
        }
    }

    Ok(Json(CostReport {
        identifier,
        is_assembly,
        unit_price,
        rolled_up_cost,
    }))
}
