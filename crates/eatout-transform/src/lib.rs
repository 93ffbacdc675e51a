//! Listing transformation.
//!
//! Turns a raw listing snapshot into the enriched frame the dashboard views
//! read, and computes the filters and rankings those views show.
//!
//! # Stages
//!
//! - [`normalization`]: canonical snake_case headers
//! - [`cleaning`]: drop incomplete and duplicate rows
//! - [`enrichment`]: derive rating colors, price tiers, cuisines, currency
//!   codes, countries and converted prices
//!
//! [`Pipeline`] runs the stages in order and [`DatasetCache`] memoizes its
//! output per snapshot. [`filter`] and [`aggregate`] work on the result.

pub mod aggregate;
pub mod cache;
pub mod cleaning;
pub mod enrichment;
pub mod error;
pub mod filter;
pub mod frame_utils;
pub mod normalization;
pub mod pipeline;

pub use aggregate::{
    MapMarker, MarkerMap, OverviewMetrics, RankedCount, RankedMean, RatingBand,
    RestaurantHighlight, SortOrder, cheapest, delivery_by_cuisine, distinct_count_by,
    lowest_rated, map_markers, mean_by, most_expensive, overview_metrics, rating_band_cities,
    top_rated,
};
pub use cache::{CacheStats, DatasetCache};
pub use cleaning::{CleaningReport, clean_listings, drop_duplicate_rows, drop_incomplete_rows};
pub use enrichment::{
    EnrichmentReport, Enricher, PriceConversion, convert_price, enrich_listings, primary_cuisine,
};
pub use error::{EnrichError, EnrichErrorKind, NormalizeError, PipelineError, Result};
pub use filter::{ListingFilter, country_options, price_bounds, rating_bounds};
pub use normalization::{normalize_frame_columns, normalize_header, normalize_headers};
pub use pipeline::{EnrichedListings, Pipeline, PipelineReport};
