use axum::{routing::get, Router};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/bom/:identifier", get(get_bom))
        .route("/cost/:identifier", get(get_cost))
        .route("/catalog", get(list_catalog))
        .route("/health/detailed", get(detailed_health_check))
}
