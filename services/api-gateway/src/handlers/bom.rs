//! BOM Resolution Handler
//!
//! Expands an assembly identifier into its component hierarchy.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use fabrica_catalog::{find_structure_file, BomResolver, CatalogLoader};
use fabrica_models::{AssemblyNaming, BomNode};
use fabrica_utils::{validate_identifier, validate_model, FabricaError};

use crate::middleware::ApiError;
use crate::AppState;

/// Optional knobs for a resolution request.
#[derive(Debug, Deserialize, Validate)]
pub struct BomQuery {
    /// Depth bound override for this request.
    #[validate(range(max = 10, message = "max_depth must be 10 or less"))]
    pub max_depth: Option<u32>,
}

/// BOM resolution response
#[derive(Debug, Serialize)]
pub struct BomResponse {
    pub identifier: String,
    pub max_depth: u32,
    pub node_count: usize,
    pub tree: BomNode,
}

/// Resolve an assembly's component hierarchy.
///
/// GET /api/v1/bom/{identifier}
pub async fn get_bom(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(query): Query<BomQuery>,
) -> Result<Json<BomResponse>, ApiError> {
    validate_identifier(&identifier)?;
    validate_model(&query)?;

    let catalog_config = &state.config.catalog;
    let naming = AssemblyNaming::new(catalog_config.assembly_prefixes.clone());

    // Only assemblies have structures worth resolving; reject before any
    // file I/O happens.
    if !naming.is_assembly(&identifier) {
        return Err(FabricaError::not_an_assembly(&identifier).into());
    }

    let catalog = CatalogLoader::new(&catalog_config.root_dir).load()?;

    let structure = find_structure_file(
        &catalog_config.root_dir,
        &identifier,
        &catalog_config.structure_extension,
    );
    if catalog.find(&identifier).is_none() && structure.is_none() {
        return Err(FabricaError::not_found(format!("part {}", identifier)).into());
    }

    let max_depth = query.max_depth.unwrap_or(catalog_config.max_depth);
    let resolver = BomResolver::new(
        &catalog,
        &catalog_config.root_dir,
        &naming,
        &catalog_config.structure_extension,
    );
    let tree = resolver.resolve(&identifier, 0, max_depth);

    Ok(Json(BomResponse {
        identifier,
        max_depth,
        node_count: tree.node_count(),
        tree,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use fabrica_utils::AppConfig;

    fn state_with_root(root: PathBuf) -> AppState {
        let mut config = AppConfig::default();
        config.catalog.root_dir = root;
        // Lazy pool: never connects unless a handler actually queries it.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database.postgres_url)
            .unwrap();
        AppState {
            postgres_pool: pool,
            config,
        }
    }

    fn no_query() -> Query<BomQuery> {
        Query(BomQuery { max_depth: None })
    }

    #[tokio::test]
    async fn test_non_assembly_rejected_before_any_io() {
        // The catalog root deliberately does not exist: if classification
        // ran after file I/O this would surface as a catalog error.
        let state = state_with_root(PathBuf::from("/nonexistent-catalog-root"));

        let err = get_bom(State(state), Path("RES-001".to_string()), no_query())
            .await
            .err()
            .unwrap();
        assert_eq!(err.0.error_code(), "NOT_AN_ASSEMBLY");
    }

    #[tokio::test]
    async fn test_unknown_assembly_is_not_found() {
        let dir = TempDir::new().unwrap();
        let state = state_with_root(dir.path().to_path_buf());

        let err = get_bom(State(state), Path("PCA-GHOST".to_string()), no_query())
            .await
            .err()
            .unwrap();
        assert_eq!(err.0.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_out_of_range_depth_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = state_with_root(dir.path().to_path_buf());

        let err = get_bom(
            State(state),
            Path("PCA-TOP".to_string()),
            Query(BomQuery {
                max_depth: Some(50),
            }),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.0.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resolves_assembly_from_catalog() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("components")).unwrap();
        fs::write(
            dir.path().join("components/parts.csv"),
            "pn,description\nRES-001,10k resistor\n",
        )
        .unwrap();
        fs::write(dir.path().join("PCA-TOP.csv"), "pn,qty\nRES-001,2\n").unwrap();
        let state = state_with_root(dir.path().to_path_buf());

        let Json(body) = get_bom(State(state), Path("PCA-TOP".to_string()), no_query())
            .await
            .unwrap();
        assert_eq!(body.identifier, "PCA-TOP");
        assert_eq!(body.node_count, 2);
        assert_eq!(body.tree.children[0].description, "10k resistor");
    }
}
