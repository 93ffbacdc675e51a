//! Configuration resolution and cached dataset loading for commands.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use eatout_ingest::SourceFiles;
use eatout_model::{AppConfig, UnknownValuePolicy, load_config};
use eatout_transform::{CacheStats, DatasetCache, EnrichedListings, ListingFilter, Pipeline};

/// Load the optional config file, then apply command-line overrides.
pub fn resolve_config(
    path: Option<&Path>,
    strict_lookups: bool,
    max_price_brl: Option<f64>,
) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => {
            load_config(path).with_context(|| format!("load config {}", path.display()))?
        }
        None => AppConfig::default(),
    };
    let enrichment = &mut config.options.enrichment;
    if strict_lookups {
        enrichment.currency_policy = UnknownValuePolicy::Fail;
        enrichment.country_policy = UnknownValuePolicy::Fail;
    }
    if let Some(bound) = max_price_brl {
        if !bound.is_finite() || bound <= 0.0 {
            bail!("--max-price-brl must be a positive number, got {bound}");
        }
        enrichment.max_price_brl = Some(bound);
    }
    Ok(config)
}

/// Build a listing filter from optional bounds. A missing side of a range is
/// open.
pub fn build_filter(
    countries: &[String],
    rating: (Option<f64>, Option<f64>),
    price: (Option<f64>, Option<f64>),
) -> ListingFilter {
    let mut filter = ListingFilter::new();
    if !countries.is_empty() {
        filter = filter.with_countries(countries.iter().cloned());
    }
    if let Some((min, max)) = open_range(rating) {
        filter = filter.with_rating_range(min, max);
    }
    if let Some((min, max)) = open_range(price) {
        filter = filter.with_price_range(min, max);
    }
    filter
}

fn open_range(bounds: (Option<f64>, Option<f64>)) -> Option<(f64, f64)> {
    match bounds {
        (None, None) => None,
        (min, max) => Some((
            min.unwrap_or(f64::NEG_INFINITY),
            max.unwrap_or(f64::INFINITY),
        )),
    }
}

/// One pipeline and the cache of what it has produced.
pub struct Session {
    cache: DatasetCache,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            cache: DatasetCache::new(Pipeline::new(config.directories, config.options)),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        self.cache.pipeline()
    }

    /// Read both files and return the enriched listings, reusing an earlier
    /// result when the file contents have not changed.
    pub fn load(&self, listings: &Path, rates: &Path) -> Result<EnrichedListings> {
        let span = info_span!("load", listings = %listings.display());
        let _guard = span.enter();
        let start = Instant::now();

        let files = SourceFiles::read(listings, rates)
            .with_context(|| format!("read {} and {}", listings.display(), rates.display()))?;
        let enriched = self
            .cache
            .get_or_load(&files)
            .with_context(|| format!("process {}", listings.display()))?;

        info!(
            snapshot = enriched.snapshot.short(),
            rows = enriched.frame.height(),
            duration_ms = start.elapsed().as_millis(),
            "listings ready"
        );
        Ok(enriched)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
