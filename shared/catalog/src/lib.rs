//! Catalog and pricing data access, plus the two traversal engines.
//!
//! The parts catalog is a human-edited directory tree of flat record
//! files, re-read on every request. The pricing store is purchase-order
//! history in PostgreSQL. `BomResolver` and `CostRollup` walk the same
//! structure expansion over both.

pub mod loader;
pub mod locator;
pub mod migrations;
pub mod postgres;
pub mod pricing;
pub mod resolver;
pub mod rollup;
pub mod structure;

pub use loader::{Catalog, CatalogLoader};
pub use locator::find_structure_file;
pub use postgres::{create_postgres_pool, health_check as postgres_health_check, PostgresPool};
pub use pricing::{PriceBook, PriceSource, PricingRepository};
pub use resolver::BomResolver;
pub use rollup::CostRollup;
pub use structure::{parse_structure_file, StructureDefinition};

use anyhow::Result;
use std::time::Duration;

use fabrica_utils::config::DatabaseConfig;

/// Connects to the pricing store and applies migrations.
pub async fn initialize_pricing_store(config: &DatabaseConfig) -> Result<PostgresPool> {
    let pool = create_postgres_pool(
        &config.postgres_url,
        config.max_connections,
        Duration::from_secs(config.connection_timeout_seconds),
    )
    .await?;

    migrations::run_postgres_migrations(&pool).await?;

    Ok(pool)
}
