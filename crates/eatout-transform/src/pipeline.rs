//! Listing pipeline with explicit stages.
//!
//! The pipeline runs these stages in order:
//! 1. **Normalize**: rename headers to snake_case
//! 2. **Clean**: drop incomplete rows, then duplicates
//! 3. **Enrich**: derive labels, codes and converted prices
//!
//! Each stage runs inside its own span and logs its row counts and duration.

use std::time::Instant;

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use eatout_ingest::{ListingSource, SnapshotId};
use eatout_model::{Directories, ExchangeRateTable, PipelineOptions};

use crate::cleaning::{CleaningReport, clean_listings};
use crate::enrichment::{EnrichmentReport, Enricher};
use crate::error::Result;
use crate::normalization::normalize_frame_columns;

/// What the pipeline did to one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    pub cleaning: CleaningReport,
    pub enrichment: EnrichmentReport,
}

/// Enriched listings of one snapshot.
#[derive(Debug, Clone)]
pub struct EnrichedListings {
    pub frame: DataFrame,
    pub snapshot: SnapshotId,
    /// Currency `price_brl` is expressed in.
    pub reporting_currency: String,
    pub report: PipelineReport,
}

/// Normalize, clean and enrich listing batches with injected lookup tables.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    directories: Directories,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(directories: Directories, options: PipelineOptions) -> Self {
        Self {
            directories,
            options,
        }
    }

    pub fn directories(&self) -> &Directories {
        &self.directories
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run every stage on a parsed snapshot.
    pub fn run(&self, source: &ListingSource) -> Result<EnrichedListings> {
        let span = info_span!("pipeline", snapshot = source.snapshot.short());
        let _guard = span.enter();
        let start = Instant::now();

        let (frame, report) = self.run_frame(&source.listings, &source.rates)?;

        info!(
            rows = frame.height(),
            columns = frame.width(),
            duration_ms = start.elapsed().as_millis(),
            "pipeline complete"
        );
        Ok(EnrichedListings {
            frame,
            snapshot: source.snapshot.clone(),
            reporting_currency: source.rates.reporting_currency().to_string(),
            report,
        })
    }

    /// Run every stage on a raw frame. The input frame is left untouched.
    pub fn run_frame(
        &self,
        raw: &DataFrame,
        rates: &ExchangeRateTable,
    ) -> Result<(DataFrame, PipelineReport)> {
        let normalized = info_span!("normalize").in_scope(|| -> Result<DataFrame> {
            let start = Instant::now();
            let frame = normalize_frame_columns(raw)?;
            info!(
                columns = frame.width(),
                duration_ms = start.elapsed().as_millis(),
                "normalize complete"
            );
            Ok(frame)
        })?;

        let (cleaned, cleaning) =
            info_span!("clean").in_scope(|| -> Result<(DataFrame, CleaningReport)> {
                let start = Instant::now();
                let (frame, report) = clean_listings(&normalized)?;
                info!(
                    rows_in = report.rows_in,
                    rows_out = report.rows_out,
                    duration_ms = start.elapsed().as_millis(),
                    "clean complete"
                );
                Ok((frame, report))
            })?;

        let (enriched, enrichment) =
            info_span!("enrich").in_scope(|| -> Result<(DataFrame, EnrichmentReport)> {
                let start = Instant::now();
                let enricher =
                    Enricher::new(&self.directories, rates, &self.options.enrichment);
                let (frame, report) = enricher.enrich(&cleaned)?;
                info!(
                    rows = report.rows,
                    currency_fallbacks = report.currency_fallbacks,
                    missing_rates = report.missing_rates,
                    prices_over_bound = report.prices_over_bound,
                    duration_ms = start.elapsed().as_millis(),
                    "enrich complete"
                );
                Ok((frame, report))
            })?;

        Ok((
            enriched,
            PipelineReport {
                cleaning,
                enrichment,
            },
        ))
    }
}
