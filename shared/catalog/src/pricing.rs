//! Pricing Lookup
//!
//! Leaf costs come from purchase history: the most recent positive unit
//! price recorded against an identifier. The engines consult prices
//! synchronously through [`PriceSource`]; request handlers load a
//! [`PriceBook`] snapshot up front so the recursive traversal itself
//! never touches the store.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use fabrica_models::PricePoint;

/// Latest-known unit prices, consulted inside the recursive traversal.
pub trait PriceSource {
    /// Most recent positive unit price for `identifier`, or `None` when
    /// the part has never been purchased.
    fn unit_price(&self, identifier: &str) -> Option<f64>;
}

/// An in-memory snapshot of latest unit prices, case-insensitive on
/// identifier.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    prices: HashMap<String, f64>,
}

impl PriceBook {
    /// Builds a book keeping the most recent positive price per
    /// identifier. Non-positive prices are ignored.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = PricePoint>,
    {
        let mut latest: HashMap<String, (DateTime<Utc>, f64)> = HashMap::new();
        for point in points {
            if point.unit_price <= 0.0 {
                continue;
            }
            let key = point.identifier.trim().to_uppercase();
            match latest.get(&key) {
                Some((recorded_at, _)) if *recorded_at >= point.recorded_at => {}
                _ => {
                    latest.insert(key, (point.recorded_at, point.unit_price));
                }
            }
        }
        Self {
            prices: latest
                .into_iter()
                .map(|(key, (_, price))| (key, price))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceSource for PriceBook {
    fn unit_price(&self, identifier: &str) -> Option<f64> {
        self.prices.get(&identifier.trim().to_uppercase()).copied()
    }
}

/// Purchase-history access for the pricing store.
pub struct PricingRepository {
    pool: PgPool,
}

impl PricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent positive unit price recorded against one identifier.
    pub async fn latest_unit_price(&self, identifier: &str) -> Result<Option<f64>> {
        let row: Option<(f64,)> = sqlx::query_as(
            r#"
            SELECT unit_price
            FROM purchase_order_lines
            WHERE UPPER(part_number) = UPPER($1) AND unit_price > 0
            ORDER BY recorded_at DESC
            LIMIT 1
            "#,
        )
        .bind(identifier.trim())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch latest unit price")?;

        Ok(row.map(|(price,)| price))
    }

    /// Snapshot of the latest positive price per identifier, loaded once
    /// per cost request before the traversal starts.
    pub async fn load_price_book(&self) -> Result<PriceBook> {
        let rows: Vec<PriceRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT ON (UPPER(part_number))
                   part_number, unit_price, recorded_at
            FROM purchase_order_lines
            WHERE unit_price > 0
            ORDER BY UPPER(part_number), recorded_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load price book")?;

        Ok(PriceBook::from_points(rows.into_iter().map(PricePoint::from)))
    }
}

#[derive(Debug, FromRow)]
struct PriceRow {
    part_number: String,
    unit_price: f64,
    recorded_at: DateTime<Utc>,
}

impl From<PriceRow> for PricePoint {
    fn from(row: PriceRow) -> Self {
        Self {
            identifier: row.part_number,
            unit_price: row.unit_price,
            recorded_at: row.recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(identifier: &str, price: f64, day: u32) -> PricePoint {
        PricePoint::new(
            identifier,
            price,
            Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_most_recent_price_wins() {
        let book = PriceBook::from_points(vec![
            point("RES-001", 0.12, 1),
            point("RES-001", 0.10, 20),
            point("RES-001", 0.15, 5),
        ]);
        assert_eq!(book.unit_price("RES-001"), Some(0.10));
    }

    #[test]
    fn test_non_positive_prices_are_ignored() {
        let book = PriceBook::from_points(vec![
            point("RES-001", 0.10, 1),
            point("RES-001", 0.0, 20),
            point("RES-001", -1.0, 25),
        ]);
        assert_eq!(book.unit_price("RES-001"), Some(0.10));
    }

    #[test]
    fn test_unknown_identifier_is_none() {
        let book = PriceBook::from_points(vec![point("RES-001", 0.10, 1)]);
        assert_eq!(book.unit_price("CAP-001"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let book = PriceBook::from_points(vec![point("res-001", 0.10, 1)]);
        assert_eq!(book.unit_price("RES-001"), Some(0.10));
        assert_eq!(book.unit_price(" res-001 "), Some(0.10));
    }
}
