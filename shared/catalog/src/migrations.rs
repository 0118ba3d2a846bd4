use anyhow::Result;
use sqlx::PgPool;

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running PostgreSQL migrations");

    // Purchase-order line history. Pricing lookups read the most recent
    // positive unit price per part from this table; rows are written by
    // the purchasing workflows outside this service.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS purchase_order_lines (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            order_number VARCHAR NOT NULL,
            part_number VARCHAR NOT NULL,
            quantity DOUBLE PRECISION NOT NULL DEFAULT 1,
            unit_price DOUBLE PRECISION NOT NULL,
            recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_po_lines_part_recorded
        ON purchase_order_lines (part_number, recorded_at DESC)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("PostgreSQL migrations completed");
    Ok(())
}
