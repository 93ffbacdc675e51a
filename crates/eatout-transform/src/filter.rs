//! Row filters over an enriched frame.
//!
//! Predicates combine conjunctively and preserve row order.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, PolarsResult};

use eatout_model::schema::enriched;

use crate::frame_utils::{column_f64s, column_texts};

/// Country, rating and price predicates.
///
/// An empty country set keeps no rows. Rows without a converted price are
/// dropped only when a price range is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    countries: Option<BTreeSet<String>>,
    rating: Option<(f64, f64)>,
    price: Option<(f64, f64)>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    /// Inclusive `aggregate_rating` range.
    pub fn with_rating_range(mut self, min: f64, max: f64) -> Self {
        self.rating = Some((min, max));
        self
    }

    /// Inclusive `price_brl` range.
    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price = Some((min, max));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_none() && self.rating.is_none() && self.price.is_none()
    }

    /// Per-row keep flags.
    pub fn mask(&self, df: &DataFrame) -> PolarsResult<Vec<bool>> {
        let mut keep = vec![true; df.height()];
        if let Some(countries) = &self.countries {
            let values = column_texts(df, enriched::COUNTRY)?;
            for (flag, value) in keep.iter_mut().zip(values) {
                *flag &= value.is_some_and(|country| countries.contains(&country));
            }
        }
        if let Some((min, max)) = self.rating {
            let values = column_f64s(df, enriched::AGGREGATE_RATING)?;
            for (flag, value) in keep.iter_mut().zip(values) {
                *flag &= value.is_some_and(|rating| rating >= min && rating <= max);
            }
        }
        if let Some((min, max)) = self.price {
            let values = column_f64s(df, enriched::PRICE_BRL)?;
            for (flag, value) in keep.iter_mut().zip(values) {
                *flag &= value.is_some_and(|price| price >= min && price <= max);
            }
        }
        Ok(keep)
    }

    /// Rows passing every predicate, in input order.
    pub fn apply(&self, df: &DataFrame) -> PolarsResult<DataFrame> {
        if self.is_empty() {
            return Ok(df.clone());
        }
        let keep = self.mask(df)?;
        let mask = BooleanChunked::from_slice("filter".into(), &keep);
        let filtered = df.filter(&mask)?;
        tracing::debug!(
            rows_in = df.height(),
            rows_out = filtered.height(),
            "listing filter applied"
        );
        Ok(filtered)
    }
}

/// Distinct countries, sorted, for a selector.
pub fn country_options(df: &DataFrame) -> PolarsResult<Vec<String>> {
    let countries: BTreeSet<String> = column_texts(df, enriched::COUNTRY)?
        .into_iter()
        .flatten()
        .collect();
    Ok(countries.into_iter().collect())
}

/// Minimum and maximum `aggregate_rating`; `None` for an empty frame.
pub fn rating_bounds(df: &DataFrame) -> PolarsResult<Option<(f64, f64)>> {
    Ok(bounds(column_f64s(df, enriched::AGGREGATE_RATING)?))
}

/// Minimum and maximum `price_brl`, ignoring missing prices.
pub fn price_bounds(df: &DataFrame) -> PolarsResult<Option<(f64, f64)>> {
    Ok(bounds(column_f64s(df, enriched::PRICE_BRL)?))
}

fn bounds(values: Vec<Option<f64>>) -> Option<(f64, f64)> {
    values.into_iter().flatten().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
