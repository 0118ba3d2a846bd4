use axum::{extract::State, response::Json};
use fabrica_catalog::postgres_health_check;
use serde_json::{json, Value};

use crate::AppState;

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let mut health_status = json!({
        "status": "healthy",
        "service": "fabrica-api-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    // Check the catalog root
    let catalog_status = match std::fs::read_dir(&state.config.catalog.root_dir) {
        Ok(_) => json!({"status": "healthy", "message": "Catalog root readable"}),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    health_status["checks"]["catalog"] = catalog_status;

    // Check the pricing store
    let postgres_status = match postgres_health_check(&state.postgres_pool).await {
        Ok(_) => json!({"status": "healthy", "message": "Connected"}),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    health_status["checks"]["postgres"] = postgres_status;

    // Determine overall status
    let all_healthy = health_status["checks"]
        .as_object()
        .unwrap()
        .values()
        .all(|check| check["status"] == "healthy");

    if !all_healthy {
        health_status["status"] = json!("degraded");
    }

    Json(health_status)
}
