//! Canonical column names and categorical types of the listing schema.
//!
//! Source headers are normalized to snake_case before anything else touches
//! the frame, so every stage after normalization addresses columns through
//! the constants defined here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Columns produced by header normalization of the source export.
pub mod source {
    pub const RESTAURANT_ID: &str = "restaurant_id";
    pub const RESTAURANT_NAME: &str = "restaurant_name";
    pub const COUNTRY_CODE: &str = "country_code";
    pub const CITY: &str = "city";
    pub const ADDRESS: &str = "address";
    pub const CUISINES: &str = "cuisines";
    pub const AVERAGE_COST_FOR_TWO: &str = "average_cost_for_two";
    pub const CURRENCY: &str = "currency";
    pub const PRICE_RANGE: &str = "price_range";
    pub const AGGREGATE_RATING: &str = "aggregate_rating";
    pub const RATING_COLOR: &str = "rating_color";
    pub const VOTES: &str = "votes";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const HAS_ONLINE_DELIVERY: &str = "has_online_delivery";
    pub const IS_DELIVERING_NOW: &str = "is_delivering_now";

    /// Columns enrichment cannot run without.
    pub const REQUIRED: [&str; 9] = [
        RESTAURANT_ID,
        RESTAURANT_NAME,
        COUNTRY_CODE,
        CITY,
        CUISINES,
        AVERAGE_COST_FOR_TWO,
        CURRENCY,
        PRICE_RANGE,
        RATING_COLOR,
    ];
}

/// Columns of the enriched frame.
///
/// The three free-text source columns whose names are reused by derived
/// values are kept under a `_raw` suffix.
pub mod enriched {
    pub use super::source::{
        ADDRESS, AGGREGATE_RATING, AVERAGE_COST_FOR_TWO, CITY, COUNTRY_CODE,
        HAS_ONLINE_DELIVERY, IS_DELIVERING_NOW, LATITUDE, LONGITUDE, PRICE_RANGE, RESTAURANT_ID,
        RESTAURANT_NAME, VOTES,
    };

    pub const CUISINES_RAW: &str = "cuisines_raw";
    pub const CURRENCY_RAW: &str = "currency_raw";
    pub const RATING_COLOR_RAW: &str = "rating_color_raw";

    pub const RATING_COLOR: &str = "rating_color";
    pub const PRICE_RANGE_LABEL: &str = "price_range_label";
    pub const CUISINE: &str = "cuisine";
    pub const CURRENCY: &str = "currency";
    pub const COUNTRY: &str = "country";
    pub const EXCHANGE_RATE: &str = "exchange_rate";
    pub const PRICE_BRL: &str = "price_brl";

    /// Derived columns in the order enrichment appends them.
    pub const DERIVED: [&str; 7] = [
        RATING_COLOR,
        PRICE_RANGE_LABEL,
        CUISINE,
        CURRENCY,
        COUNTRY,
        EXCHANGE_RATE,
        PRICE_BRL,
    ];
}

/// Ordinal price tier derived from `price_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Cheap,
    Normal,
    Expensive,
    /// Catch-all for 4 and anything outside 1..=3.
    Gourmet,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Cheap,
        PriceTier::Normal,
        PriceTier::Expensive,
        PriceTier::Gourmet,
    ];

    pub fn from_price_range(price_range: i64) -> Self {
        match price_range {
            1 => Self::Cheap,
            2 => Self::Normal,
            3 => Self::Expensive,
            _ => Self::Gourmet,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cheap => "cheap",
            Self::Normal => "normal",
            Self::Expensive => "expensive",
            Self::Gourmet => "gourmet",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cheap" => Ok(Self::Cheap),
            "normal" => Ok(Self::Normal),
            "expensive" => Ok(Self::Expensive),
            "gourmet" => Ok(Self::Gourmet),
            other => Err(format!("unknown price tier: {other}")),
        }
    }
}
