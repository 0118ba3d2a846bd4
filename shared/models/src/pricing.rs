//! Pricing store row shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One recorded purchase price for a part.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PricePoint {
    #[validate(length(min = 1, max = 100, message = "Identifier must be between 1 and 100 characters"))]
    pub identifier: String,
    #[validate(range(min = 0.0, message = "Unit price must be positive"))]
    pub unit_price: f64,
    pub recorded_at: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(identifier: impl Into<String>, unit_price: f64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            unit_price,
            recorded_at,
        }
    }
}
