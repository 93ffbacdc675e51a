//! Rankings and summary figures over an enriched, optionally filtered, frame.
//!
//! Rankings sort by value (descending or ascending), then by key ascending,
//! and are truncated to `top_n` rows.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{DataFrame, PolarsResult};
use serde::Serialize;

use eatout_model::schema::enriched;

use crate::frame_utils::{
    column_f64s, column_i64s, column_texts, optional_column_f64s, optional_column_texts,
};

/// Ratings strictly above this count as excellent.
pub const EXCELLENT_RATING: f64 = 4.0;
/// Ratings strictly below this count as poor.
pub const POOR_RATING: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Descending => ordering.reverse(),
            Self::Ascending => ordering,
        }
    }
}

/// Headline figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverviewMetrics {
    pub countries: usize,
    pub restaurants: usize,
    pub cities: usize,
    pub cuisines: usize,
    pub votes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMean {
    /// One entry per grouping column.
    pub keys: Vec<String>,
    pub mean: f64,
    /// Rows that contributed to the mean.
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantHighlight {
    pub restaurant_name: String,
    pub aggregate_rating: f64,
    pub votes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    /// Rating above [`EXCELLENT_RATING`].
    Excellent,
    /// Rating below [`POOR_RATING`].
    Poor,
}

impl RatingBand {
    pub fn contains(self, rating: f64) -> bool {
        match self {
            Self::Excellent => rating > EXCELLENT_RATING,
            Self::Poor => rating < POOR_RATING,
        }
    }
}

/// One map pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub restaurant_name: String,
    pub address: String,
    pub cuisine: String,
    pub price_brl: Option<f64>,
    pub aggregate_rating: Option<f64>,
    pub rating_color: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerMap {
    /// Mean latitude and longitude of the markers.
    pub center: Option<(f64, f64)>,
    pub markers: Vec<MapMarker>,
}

pub fn overview_metrics(df: &DataFrame) -> PolarsResult<OverviewMetrics> {
    let votes = column_i64s(df, enriched::VOTES)?.into_iter().flatten().sum();
    Ok(OverviewMetrics {
        countries: distinct(column_texts(df, enriched::COUNTRY)?),
        restaurants: distinct(column_texts(df, enriched::RESTAURANT_ID)?),
        cities: distinct(column_texts(df, enriched::CITY)?),
        cuisines: distinct(column_texts(df, enriched::CUISINE)?),
        votes,
    })
}

fn distinct(values: Vec<Option<String>>) -> usize {
    values.into_iter().flatten().collect::<BTreeSet<_>>().len()
}

/// Number of distinct `value` entries per `group`.
///
/// Restaurants per country is `distinct_count_by(df, "country", "restaurant_id", ..)`.
pub fn distinct_count_by(
    df: &DataFrame,
    group: &str,
    value: &str,
    order: SortOrder,
    top_n: usize,
) -> PolarsResult<Vec<RankedCount>> {
    let groups = column_texts(df, group)?;
    let values = column_texts(df, value)?;
    let mut sets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (key, value) in groups.into_iter().zip(values) {
        if let (Some(key), Some(value)) = (key, value) {
            sets.entry(key).or_default().insert(value);
        }
    }
    let counts = sets
        .into_iter()
        .map(|(key, set)| RankedCount {
            key,
            count: set.len(),
        })
        .collect();
    Ok(rank_counts(counts, order, top_n))
}

/// Mean of `value` per combination of `groups`.
///
/// For `price_brl` only rows with a positive price contribute.
pub fn mean_by(
    df: &DataFrame,
    groups: &[&str],
    value: &str,
    order: SortOrder,
    top_n: usize,
) -> PolarsResult<Vec<RankedMean>> {
    let positive_only = value == enriched::PRICE_BRL;
    let values = column_f64s(df, value)?;
    let keys = group_keys(df, groups)?;

    let mut sums: BTreeMap<Vec<String>, (f64, usize)> = BTreeMap::new();
    for (key, value) in keys.into_iter().zip(values) {
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        if positive_only && value <= 0.0 {
            continue;
        }
        let entry = sums.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let mut means: Vec<RankedMean> = sums
        .into_iter()
        .map(|(keys, (sum, rows))| RankedMean {
            keys,
            mean: sum / rows as f64,
            rows,
        })
        .collect();
    means.sort_by(|a, b| {
        order
            .apply(a.mean.total_cmp(&b.mean))
            .then_with(|| a.keys.cmp(&b.keys))
    });
    means.truncate(top_n);
    Ok(means)
}

/// Composite group key per row; `None` when any part is missing.
fn group_keys(df: &DataFrame, groups: &[&str]) -> PolarsResult<Vec<Option<Vec<String>>>> {
    let mut keys: Vec<Option<Vec<String>>> = vec![Some(Vec::with_capacity(groups.len())); df.height()];
    for group in groups {
        for (key, part) in keys.iter_mut().zip(column_texts(df, group)?) {
            match (key.as_mut(), part) {
                (Some(parts), Some(part)) => parts.push(part),
                _ => *key = None,
            }
        }
    }
    Ok(keys)
}

/// Restaurants per city among rows inside the rating band, most first.
pub fn rating_band_cities(
    df: &DataFrame,
    band: RatingBand,
    top_n: usize,
) -> PolarsResult<Vec<RankedCount>> {
    let ratings = column_f64s(df, enriched::AGGREGATE_RATING)?;
    let cities = column_texts(df, enriched::CITY)?;
    let ids = column_texts(df, enriched::RESTAURANT_ID)?;
    let mut sets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for ((rating, city), id) in ratings.into_iter().zip(cities).zip(ids) {
        if let (Some(rating), Some(city), Some(id)) = (rating, city, id)
            && band.contains(rating)
        {
            sets.entry(city).or_default().insert(id);
        }
    }
    let counts = sets
        .into_iter()
        .map(|(key, set)| RankedCount {
            key,
            count: set.len(),
        })
        .collect();
    Ok(rank_counts(counts, SortOrder::Descending, top_n))
}

/// Restaurant with the highest rating, ties broken by more votes.
pub fn top_rated(df: &DataFrame) -> PolarsResult<Option<RestaurantHighlight>> {
    Ok(rated(df)?
        .into_iter()
        .min_by(|a, b| compare_rated(a, b).reverse().then_with(|| a.restaurant_name.cmp(&b.restaurant_name))))
}

/// Restaurant with the lowest rating, ties broken by fewer votes.
pub fn lowest_rated(df: &DataFrame) -> PolarsResult<Option<RestaurantHighlight>> {
    Ok(rated(df)?
        .into_iter()
        .min_by(|a, b| compare_rated(a, b).then_with(|| a.restaurant_name.cmp(&b.restaurant_name))))
}

fn compare_rated(a: &RestaurantHighlight, b: &RestaurantHighlight) -> Ordering {
    a.aggregate_rating
        .total_cmp(&b.aggregate_rating)
        .then(a.votes.cmp(&b.votes))
}

fn rated(df: &DataFrame) -> PolarsResult<Vec<RestaurantHighlight>> {
    let names = column_texts(df, enriched::RESTAURANT_NAME)?;
    let ratings = column_f64s(df, enriched::AGGREGATE_RATING)?;
    let votes = column_i64s(df, enriched::VOTES)?;
    Ok(names
        .into_iter()
        .zip(ratings)
        .zip(votes)
        .filter_map(|((name, rating), votes)| {
            Some(RestaurantHighlight {
                restaurant_name: name?,
                aggregate_rating: rating?,
                votes: votes.unwrap_or(0),
            })
        })
        .collect())
}

/// Restaurant with the highest mean converted price.
pub fn most_expensive(df: &DataFrame) -> PolarsResult<Option<RankedMean>> {
    Ok(mean_by(df, &[enriched::RESTAURANT_NAME], enriched::PRICE_BRL, SortOrder::Descending, 1)?
        .into_iter()
        .next())
}

/// Restaurant with the lowest positive mean converted price.
pub fn cheapest(df: &DataFrame) -> PolarsResult<Option<RankedMean>> {
    Ok(mean_by(df, &[enriched::RESTAURANT_NAME], enriched::PRICE_BRL, SortOrder::Ascending, 1)?
        .into_iter()
        .next())
}

/// Rows offering online delivery, counted per cuisine.
pub fn delivery_by_cuisine(df: &DataFrame, top_n: usize) -> PolarsResult<Vec<RankedCount>> {
    let flags = column_i64s(df, enriched::HAS_ONLINE_DELIVERY)?;
    let cuisines = column_texts(df, enriched::CUISINE)?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (flag, cuisine) in flags.into_iter().zip(cuisines) {
        if flag == Some(1)
            && let Some(cuisine) = cuisine
        {
            *counts.entry(cuisine).or_default() += 1;
        }
    }
    let counts = counts
        .into_iter()
        .map(|(key, count)| RankedCount { key, count })
        .collect();
    Ok(rank_counts(counts, SortOrder::Descending, top_n))
}

/// Marker projection for the map view. Rows without coordinates are skipped.
pub fn map_markers(df: &DataFrame) -> PolarsResult<MarkerMap> {
    let names = column_texts(df, enriched::RESTAURANT_NAME)?;
    let addresses = optional_column_texts(df, enriched::ADDRESS)?;
    let cuisines = column_texts(df, enriched::CUISINE)?;
    let prices = column_f64s(df, enriched::PRICE_BRL)?;
    let ratings = optional_column_f64s(df, enriched::AGGREGATE_RATING)?;
    let colors = column_texts(df, enriched::RATING_COLOR)?;
    let latitudes = optional_column_f64s(df, enriched::LATITUDE)?;
    let longitudes = optional_column_f64s(df, enriched::LONGITUDE)?;

    let mut markers = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let (Some(latitude), Some(longitude)) = (latitudes[idx], longitudes[idx]) else {
            continue;
        };
        markers.push(MapMarker {
            restaurant_name: names[idx].clone().unwrap_or_default(),
            address: addresses[idx].clone().unwrap_or_default(),
            cuisine: cuisines[idx].clone().unwrap_or_default(),
            price_brl: prices[idx],
            aggregate_rating: ratings[idx],
            rating_color: colors[idx].clone().unwrap_or_default(),
            latitude,
            longitude,
        });
    }

    let center = (!markers.is_empty()).then(|| {
        let n = markers.len() as f64;
        let lat = markers.iter().map(|m| m.latitude).sum::<f64>() / n;
        let lon = markers.iter().map(|m| m.longitude).sum::<f64>() / n;
        (lat, lon)
    });
    Ok(MarkerMap { center, markers })
}

fn rank_counts(mut counts: Vec<RankedCount>, order: SortOrder, top_n: usize) -> Vec<RankedCount> {
    counts.sort_by(|a, b| {
        order
            .apply(a.count.cmp(&b.count))
            .then_with(|| a.key.cmp(&b.key))
    });
    counts.truncate(top_n);
    counts
}
