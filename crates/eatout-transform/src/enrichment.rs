//! Enrichment: derive labels, codes and converted prices from a cleaned batch.
//!
//! The raw `cuisines`, `currency` and `rating_color` columns are kept under a
//! `_raw` suffix and the derived columns are appended after every source
//! column, in [`enriched::DERIVED`] order.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use serde::Serialize;

use eatout_model::schema::{enriched, source};
use eatout_model::{Directories, EnrichmentOptions, ExchangeRateTable, PriceTier, UnknownValuePolicy};

use crate::error::EnrichError;
use crate::frame_utils::{column_texts, has_column, value_f64, value_i64, value_text};

/// Counts of the substitutions and nulls enrichment produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichmentReport {
    pub rows: usize,
    /// Rows whose currency description fell back to the default code.
    pub currency_fallbacks: usize,
    pub unknown_currencies: BTreeSet<String>,
    /// Rows whose country code fell back to the unknown-country label.
    pub country_fallbacks: usize,
    pub unknown_country_codes: BTreeSet<i64>,
    /// Rows whose currency has no usable rate.
    pub missing_rates: usize,
    pub missing_rate_currencies: BTreeSet<String>,
    /// Rows whose converted price exceeded the sanity bound.
    pub prices_over_bound: usize,
}

/// Result of converting one price to the reporting currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceConversion {
    Converted(f64),
    /// No rate, or a rate of zero or a non-finite value.
    NoRate,
    /// Quotient above the sanity bound.
    OverBound(f64),
}

impl PriceConversion {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Converted(value) => Some(value),
            Self::NoRate | Self::OverBound(_) => None,
        }
    }
}

/// Convert a native-currency cost with `rate` native units per reporting unit.
pub fn convert_price(cost: f64, rate: Option<f64>, max_price: Option<f64>) -> PriceConversion {
    let Some(rate) = rate.filter(|r| r.is_finite() && *r != 0.0) else {
        return PriceConversion::NoRate;
    };
    let price = cost / rate;
    if !price.is_finite() {
        return PriceConversion::NoRate;
    }
    match max_price {
        Some(bound) if price > bound => PriceConversion::OverBound(price),
        _ => PriceConversion::Converted(price),
    }
}

/// First comma-delimited cuisine label, trimmed.
pub fn primary_cuisine(cuisines: &str) -> &str {
    cuisines.split(',').next().unwrap_or_default().trim()
}

/// Derives the enriched schema using injected lookup tables.
pub struct Enricher<'a> {
    directories: &'a Directories,
    rates: &'a ExchangeRateTable,
    options: &'a EnrichmentOptions,
}

/// Derived values for every row, column-major.
#[derive(Default)]
struct Derived {
    rating_color: Vec<String>,
    price_range_label: Vec<String>,
    cuisine: Vec<String>,
    currency: Vec<String>,
    cost: Vec<f64>,
    country: Vec<String>,
    exchange_rate: Vec<Option<f64>>,
    price_brl: Vec<Option<f64>>,
}

impl<'a> Enricher<'a> {
    pub fn new(
        directories: &'a Directories,
        rates: &'a ExchangeRateTable,
        options: &'a EnrichmentOptions,
    ) -> Self {
        Self {
            directories,
            rates,
            options,
        }
    }

    /// Enrich a cleaned batch. The input frame is left untouched.
    pub fn enrich(&self, df: &DataFrame) -> Result<(DataFrame, EnrichmentReport), EnrichError> {
        for column in source::REQUIRED {
            if !has_column(df, column) {
                return Err(EnrichError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut report = EnrichmentReport {
            rows: df.height(),
            ..EnrichmentReport::default()
        };
        let derived = self.derive(df, &mut report)?;
        self.log_report(&report);

        let frame = assemble(df, derived)?;
        Ok((frame, report))
    }

    fn derive(&self, df: &DataFrame, report: &mut EnrichmentReport) -> Result<Derived, EnrichError> {
        let height = df.height();
        let ids = column_texts(df, source::RESTAURANT_ID)?;
        let colors = df.column(source::RATING_COLOR)?;
        let price_ranges = df.column(source::PRICE_RANGE)?;
        let cuisines = df.column(source::CUISINES)?;
        let currencies = df.column(source::CURRENCY)?;
        let costs = df.column(source::AVERAGE_COST_FOR_TWO)?;
        let countries = df.column(source::COUNTRY_CODE)?;

        let mut out = Derived::default();
        for idx in 0..height {
            let restaurant_id = || ids[idx].clone().unwrap_or_default();
            let row = idx + 1;

            let color_token = value_text(&colors.get(idx)?);
            let Some(label) = self.directories.rating_colors.label(&color_token) else {
                return Err(EnrichError::UnknownRatingColor {
                    row,
                    restaurant_id: restaurant_id(),
                    token: color_token,
                });
            };
            out.rating_color.push(label.to_string());

            let price_range = price_ranges.get(idx)?;
            let Some(tier) = value_i64(&price_range) else {
                return Err(EnrichError::InvalidNumber {
                    row,
                    restaurant_id: restaurant_id(),
                    column: source::PRICE_RANGE.to_string(),
                    value: value_text(&price_range),
                });
            };
            out.price_range_label
                .push(PriceTier::from_price_range(tier).as_str().to_string());

            let cuisine_list = value_text(&cuisines.get(idx)?);
            out.cuisine.push(primary_cuisine(&cuisine_list).to_string());

            let description = value_text(&currencies.get(idx)?);
            let code = match self.directories.currencies.code(&description) {
                Some(code) => code.to_string(),
                None => match self.options.currency_policy {
                    UnknownValuePolicy::Fail => {
                        return Err(EnrichError::UnknownCurrency {
                            row,
                            restaurant_id: restaurant_id(),
                            description,
                        });
                    }
                    UnknownValuePolicy::Fallback => {
                        report.currency_fallbacks += 1;
                        report.unknown_currencies.insert(description);
                        self.options.default_currency.clone()
                    }
                },
            };

            let cost_value = costs.get(idx)?;
            let Some(cost) = value_f64(&cost_value).filter(|c| c.is_finite()) else {
                return Err(EnrichError::InvalidNumber {
                    row,
                    restaurant_id: restaurant_id(),
                    column: source::AVERAGE_COST_FOR_TWO.to_string(),
                    value: value_text(&cost_value),
                });
            };
            out.cost.push(cost);

            let code_value = countries.get(idx)?;
            let Some(country_code) = value_i64(&code_value) else {
                return Err(EnrichError::InvalidNumber {
                    row,
                    restaurant_id: restaurant_id(),
                    column: source::COUNTRY_CODE.to_string(),
                    value: value_text(&code_value),
                });
            };
            let country = match self.directories.countries.name(country_code) {
                Some(name) => name.to_string(),
                None => match self.options.country_policy {
                    UnknownValuePolicy::Fail => {
                        return Err(EnrichError::UnknownCountry {
                            row,
                            restaurant_id: restaurant_id(),
                            code: country_code,
                        });
                    }
                    UnknownValuePolicy::Fallback => {
                        report.country_fallbacks += 1;
                        report.unknown_country_codes.insert(country_code);
                        self.options.unknown_country_label.clone()
                    }
                },
            };
            out.country.push(country);

            let rate = self.rates.rate(&code);
            let conversion = convert_price(cost, rate, self.options.max_price_brl);
            match conversion {
                PriceConversion::Converted(_) => {}
                PriceConversion::NoRate => {
                    report.missing_rates += 1;
                    report.missing_rate_currencies.insert(code.clone());
                }
                PriceConversion::OverBound(price) => {
                    report.prices_over_bound += 1;
                    tracing::debug!(
                        row,
                        restaurant_id = %restaurant_id(),
                        price,
                        "converted price above bound"
                    );
                }
            }
            out.exchange_rate.push(rate);
            out.price_brl.push(conversion.value());
            out.currency.push(code);
        }
        Ok(out)
    }

    fn log_report(&self, report: &EnrichmentReport) {
        if report.currency_fallbacks > 0 {
            tracing::warn!(
                rows = report.currency_fallbacks,
                descriptions = ?report.unknown_currencies,
                default_code = %self.options.default_currency,
                "unknown currency descriptions mapped to default code"
            );
        }
        if report.country_fallbacks > 0 {
            tracing::warn!(
                rows = report.country_fallbacks,
                codes = ?report.unknown_country_codes,
                label = %self.options.unknown_country_label,
                "unknown country codes mapped to fallback label"
            );
        }
        if report.missing_rates > 0 {
            tracing::warn!(
                rows = report.missing_rates,
                currencies = ?report.missing_rate_currencies,
                "no usable exchange rate; prices left empty"
            );
        }
        if report.prices_over_bound > 0 {
            tracing::warn!(
                rows = report.prices_over_bound,
                bound = ?self.options.max_price_brl,
                "converted prices above bound left empty"
            );
        }
    }
}

/// Enrich a cleaned batch with the given directories, rates and options.
pub fn enrich_listings(
    df: &DataFrame,
    directories: &Directories,
    rates: &ExchangeRateTable,
    options: &EnrichmentOptions,
) -> Result<(DataFrame, EnrichmentReport), EnrichError> {
    Enricher::new(directories, rates, options).enrich(df)
}

fn assemble(df: &DataFrame, mut derived: Derived) -> PolarsResult<DataFrame> {
    let renames = [
        (source::CUISINES, enriched::CUISINES_RAW),
        (source::CURRENCY, enriched::CURRENCY_RAW),
        (source::RATING_COLOR, enriched::RATING_COLOR_RAW),
    ];
    let mut columns: Vec<Column> = Vec::with_capacity(df.width() + enriched::DERIVED.len());
    for column in df.get_columns() {
        let name = column.name().as_str();
        if name == source::AVERAGE_COST_FOR_TWO {
            columns.push(Series::new(name.into(), std::mem::take(&mut derived.cost)).into());
            continue;
        }
        let renamed = renames
            .iter()
            .find(|(from, _)| *from == name)
            .map(|(_, to)| *to);
        match renamed {
            Some(to) => columns.push(column.clone().with_name(to.into())),
            None => columns.push(column.clone()),
        }
    }

    columns.push(Series::new(enriched::RATING_COLOR.into(), derived.rating_color).into());
    columns.push(Series::new(enriched::PRICE_RANGE_LABEL.into(), derived.price_range_label).into());
    columns.push(Series::new(enriched::CUISINE.into(), derived.cuisine).into());
    columns.push(Series::new(enriched::CURRENCY.into(), derived.currency).into());
    columns.push(Series::new(enriched::COUNTRY.into(), derived.country).into());
    columns.push(Series::new(enriched::EXCHANGE_RATE.into(), derived.exchange_rate).into());
    columns.push(Series::new(enriched::PRICE_BRL.into(), derived.price_brl).into());
    DataFrame::new(columns)
}
