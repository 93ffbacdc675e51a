//! View models: the figures each dashboard page shows, computed from an
//! enriched and filtered frame.

use polars::prelude::{DataFrame, PolarsResult};
use serde::Serialize;

use eatout_model::schema::enriched;
use eatout_transform::{
    OverviewMetrics, RankedCount, RankedMean, RatingBand, RestaurantHighlight, SortOrder,
    cheapest, delivery_by_cuisine, distinct_count_by, lowest_rated, mean_by, most_expensive,
    overview_metrics, rating_band_cities, top_rated,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub metrics: OverviewMetrics,
    pub restaurants_per_country: Vec<RankedCount>,
    pub cuisines_per_country: Vec<RankedCount>,
    pub cities_per_country: Vec<RankedCount>,
}

pub fn overview_view(df: &DataFrame, top_n: usize) -> PolarsResult<OverviewView> {
    let per_country = |value: &str, top_n: usize| {
        distinct_count_by(df, enriched::COUNTRY, value, SortOrder::Descending, top_n)
    };
    Ok(OverviewView {
        metrics: overview_metrics(df)?,
        restaurants_per_country: per_country(enriched::RESTAURANT_ID, top_n)?,
        cuisines_per_country: per_country(enriched::CUISINE, top_n)?,
        // Every country is listed, not just the top N.
        cities_per_country: per_country(enriched::CITY, usize::MAX)?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitiesView {
    pub cuisines_per_city: Vec<RankedCount>,
    pub excellent_cities: Vec<RankedCount>,
    pub poor_cities: Vec<RankedCount>,
    pub most_expensive_cities: Vec<RankedMean>,
    pub cheapest_cities: Vec<RankedMean>,
}

pub fn cities_view(df: &DataFrame, top_n: usize) -> PolarsResult<CitiesView> {
    let city_prices = |order| {
        mean_by(
            df,
            &[enriched::CITY, enriched::COUNTRY],
            enriched::PRICE_BRL,
            order,
            top_n,
        )
    };
    Ok(CitiesView {
        cuisines_per_city: distinct_count_by(
            df,
            enriched::CITY,
            enriched::CUISINE,
            SortOrder::Descending,
            top_n,
        )?,
        excellent_cities: rating_band_cities(df, RatingBand::Excellent, top_n)?,
        poor_cities: rating_band_cities(df, RatingBand::Poor, top_n)?,
        most_expensive_cities: city_prices(SortOrder::Descending)?,
        cheapest_cities: city_prices(SortOrder::Ascending)?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuisinesView {
    pub top_rated: Option<RestaurantHighlight>,
    pub lowest_rated: Option<RestaurantHighlight>,
    pub most_expensive: Option<RankedMean>,
    pub cheapest: Option<RankedMean>,
    pub best_cuisines: Vec<RankedMean>,
    pub worst_cuisines: Vec<RankedMean>,
    pub expensive_cuisines: Vec<RankedMean>,
    pub delivering_cuisines: Vec<RankedCount>,
}

pub fn cuisines_view(df: &DataFrame, top_n: usize) -> PolarsResult<CuisinesView> {
    let cuisine_means = |value: &str, order| mean_by(df, &[enriched::CUISINE], value, order, top_n);
    Ok(CuisinesView {
        top_rated: top_rated(df)?,
        lowest_rated: lowest_rated(df)?,
        most_expensive: most_expensive(df)?,
        cheapest: cheapest(df)?,
        best_cuisines: cuisine_means(enriched::AGGREGATE_RATING, SortOrder::Descending)?,
        worst_cuisines: cuisine_means(enriched::AGGREGATE_RATING, SortOrder::Ascending)?,
        expensive_cuisines: cuisine_means(enriched::PRICE_BRL, SortOrder::Descending)?,
        delivering_cuisines: delivery_by_cuisine(df, top_n)?,
    })
}
