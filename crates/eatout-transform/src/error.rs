//! Error types for the listing pipeline.

use eatout_ingest::IngestError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Header normalization failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// Two distinct raw headers normalize to the same name.
    #[error("headers {first:?} and {second:?} both normalize to {normalized:?}")]
    HeaderCollision {
        first: String,
        second: String,
        normalized: String,
    },

    /// A header has no letters or digits to build a name from.
    #[error("header {raw:?} normalizes to an empty name")]
    EmptyHeader { raw: String },
}

/// Broad class of an enrichment failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichErrorKind {
    /// A column enrichment reads is absent.
    Schema,
    /// A coded value has no directory entry.
    Lookup,
    /// A value cannot be read as the number it should be.
    Format,
}

/// Enrichment failures. Any of these aborts the whole batch.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("required column {column:?} is missing")]
    MissingColumn { column: String },

    #[error("row {row} (restaurant {restaurant_id}): unknown rating color {token:?}")]
    UnknownRatingColor {
        row: usize,
        restaurant_id: String,
        token: String,
    },

    #[error("row {row} (restaurant {restaurant_id}): unknown country code {code}")]
    UnknownCountry {
        row: usize,
        restaurant_id: String,
        code: i64,
    },

    #[error("row {row} (restaurant {restaurant_id}): unknown currency {description:?}")]
    UnknownCurrency {
        row: usize,
        restaurant_id: String,
        description: String,
    },

    #[error("row {row} (restaurant {restaurant_id}): {column} value {value:?} is not a valid number")]
    InvalidNumber {
        row: usize,
        restaurant_id: String,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl EnrichError {
    pub fn kind(&self) -> EnrichErrorKind {
        match self {
            Self::MissingColumn { .. } | Self::Polars(_) => EnrichErrorKind::Schema,
            Self::UnknownRatingColor { .. }
            | Self::UnknownCountry { .. }
            | Self::UnknownCurrency { .. } => EnrichErrorKind::Lookup,
            Self::InvalidNumber { .. } => EnrichErrorKind::Format,
        }
    }
}

/// Errors surfaced by [`crate::Pipeline`] and [`crate::DatasetCache`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("header normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("enrichment failed: {0}")]
    Enrich(#[from] EnrichError),

    #[error("dataframe operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
