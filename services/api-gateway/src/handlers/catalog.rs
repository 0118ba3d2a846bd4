//! Catalog Browsing Handler
//!
//! Lists loaded categories with their schemas and display titles.

use axum::{extract::State, response::Json};
use serde::Serialize;

use fabrica_catalog::CatalogLoader;

use crate::middleware::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub title: String,
    pub columns: Vec<String>,
    pub record_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<CategorySummary>,
    pub total_records: usize,
}

/// List catalog categories.
///
/// GET /api/v1/catalog
pub async fn list_catalog(State(state): State<AppState>) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = CatalogLoader::new(&state.config.catalog.root_dir).load()?;

    let categories: Vec<CategorySummary> = catalog
        .records
        .iter()
        .map(|(name, records)| CategorySummary {
            name: name.clone(),
            title: catalog
                .titles
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.clone()),
            columns: catalog.schemas.get(name).cloned().unwrap_or_default(),
            record_count: records.len(),
        })
        .collect();

    Ok(Json(CatalogResponse {
        total_records: catalog.record_count(),
        categories,
    }))
}
