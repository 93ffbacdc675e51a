//! Tests for listing enrichment.

use polars::prelude::*;

use eatout_model::{
    CountryDirectory, Directories, EnrichmentOptions, ExchangeRateTable, RatingColorDirectory,
    UnknownValuePolicy,
};
use eatout_transform::{EnrichError, EnrichErrorKind, enrich_listings};

struct Row {
    country_code: i64,
    cuisines: &'static str,
    cost: f64,
    currency: &'static str,
    price_range: i64,
    rating_color: &'static str,
}

fn row(country_code: i64, currency: &'static str, cost: f64) -> Row {
    Row {
        country_code,
        cuisines: "Italian, Pizza",
        cost,
        currency,
        price_range: 2,
        rating_color: "9ACD32",
    }
}

fn frame(rows: &[Row]) -> DataFrame {
    let ids: Vec<String> = (1..=rows.len()).map(|i| i.to_string()).collect();
    let names: Vec<String> = (1..=rows.len()).map(|i| format!("Restaurant {i}")).collect();
    DataFrame::new(vec![
        Series::new("restaurant_id".into(), ids).into(),
        Series::new("restaurant_name".into(), names).into(),
        Series::new("country_code".into(), rows.iter().map(|r| r.country_code).collect::<Vec<_>>()).into(),
        Series::new("city".into(), vec!["Rio de Janeiro"; rows.len()]).into(),
        Series::new("cuisines".into(), rows.iter().map(|r| r.cuisines).collect::<Vec<_>>()).into(),
        Series::new("average_cost_for_two".into(), rows.iter().map(|r| r.cost).collect::<Vec<_>>()).into(),
        Series::new("currency".into(), rows.iter().map(|r| r.currency).collect::<Vec<_>>()).into(),
        Series::new("price_range".into(), rows.iter().map(|r| r.price_range).collect::<Vec<_>>()).into(),
        Series::new("aggregate_rating".into(), vec![4.2; rows.len()]).into(),
        Series::new("rating_color".into(), rows.iter().map(|r| r.rating_color).collect::<Vec<_>>()).into(),
    ])
    .unwrap()
}

fn rates() -> ExchangeRateTable {
    ExchangeRateTable::new([("BRL", 1.0), ("INR", 15.0), ("USD", 0.25), ("IDR", 0.0)])
        .with_base_code("BRL")
}

fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

#[test]
fn test_rating_color_label() {
    let df = frame(&[row(30, "Brazilian Real(R$)", 100.0)]);
    let (enriched, _) =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap();
    assert_eq!(strings(&enriched, "rating_color"), [Some("lightgreen".to_string())]);
    assert_eq!(strings(&enriched, "rating_color_raw"), [Some("9ACD32".to_string())]);
}

#[test]
fn test_known_country_resolves() {
    let df = frame(&[row(30, "Brazilian Real(R$)", 100.0)]);
    let (enriched, _) =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap();
    assert_eq!(strings(&enriched, "country"), [Some("Brazil".to_string())]);
}

#[test]
fn test_unknown_country_fails_batch() {
    let df = frame(&[row(30, "Brazilian Real(R$)", 100.0), row(9999, "Dollar($)", 10.0)]);
    let err =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap_err();
    assert_eq!(err.kind(), EnrichErrorKind::Lookup);
    assert!(matches!(err, EnrichError::UnknownCountry { row: 2, code: 9999, .. }));
}

#[test]
fn test_unknown_country_fallback_policy() {
    let df = frame(&[row(9999, "Dollar($)", 10.0)]);
    let options = EnrichmentOptions::default().with_country_policy(UnknownValuePolicy::Fallback);
    let (enriched, report) =
        enrich_listings(&df, &Directories::default(), &rates(), &options).unwrap();
    assert_eq!(strings(&enriched, "country"), [Some("Unknown".to_string())]);
    assert_eq!(report.country_fallbacks, 1);
    assert!(report.unknown_country_codes.contains(&9999));
}

#[test]
fn test_injected_country_directory() {
    let df = frame(&[row(9999, "Dollar($)", 10.0)]);
    let directories =
        Directories::default().with_countries(CountryDirectory::new([(9999, "Atlantis")]));
    let (enriched, _) =
        enrich_listings(&df, &directories, &rates(), &EnrichmentOptions::default()).unwrap();
    assert_eq!(strings(&enriched, "country"), [Some("Atlantis".to_string())]);
}

#[test]
fn test_price_in_reporting_currency() {
    let df = frame(&[row(30, "Brazilian Real(R$)", 1000.0), row(1, "Indian Rupees(Rs.)", 300.0)]);
    let (enriched, report) =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap();
    assert_eq!(floats(&enriched, "price_brl"), [Some(1000.0), Some(20.0)]);
    assert_eq!(floats(&enriched, "exchange_rate"), [Some(1.0), Some(15.0)]);
    assert_eq!(strings(&enriched, "currency"), [Some("BRL".to_string()), Some("INR".to_string())]);
    assert_eq!(report.missing_rates, 0);
}

#[test]
fn test_missing_rate_leaves_price_empty() {
    let df = frame(&[row(30, "Zorkmid(ZZZ)", 100.0)]);
    let options = EnrichmentOptions::default().with_default_currency("ZZZ");
    let (enriched, report) =
        enrich_listings(&df, &Directories::default(), &rates(), &options).unwrap();
    assert_eq!(strings(&enriched, "currency"), [Some("ZZZ".to_string())]);
    assert_eq!(floats(&enriched, "exchange_rate"), [None]);
    assert_eq!(floats(&enriched, "price_brl"), [None]);
    assert_eq!(report.currency_fallbacks, 1);
    assert_eq!(report.missing_rates, 1);
}

#[test]
fn test_zero_rate_leaves_price_empty() {
    let df = frame(&[row(94, "Indonesian Rupiah(IDR)", 100.0)]);
    let (enriched, report) =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap();
    assert_eq!(floats(&enriched, "exchange_rate"), [Some(0.0)]);
    assert_eq!(floats(&enriched, "price_brl"), [None]);
    assert_eq!(report.missing_rates, 1);
}

#[test]
fn test_price_over_bound_is_dropped_and_counted() {
    let df = frame(&[row(216, "Dollar($)", 300_000.0), row(216, "Dollar($)", 30.0)]);
    let (enriched, report) =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap();
    assert_eq!(floats(&enriched, "price_brl"), [None, Some(120.0)]);
    assert_eq!(report.prices_over_bound, 1);

    let unbounded = EnrichmentOptions::default().with_max_price_brl(None);
    let (enriched, _) =
        enrich_listings(&df, &Directories::default(), &rates(), &unbounded).unwrap();
    assert_eq!(floats(&enriched, "price_brl"), [Some(1_200_000.0), Some(120.0)]);
}

#[test]
fn test_currency_fail_policy() {
    let df = frame(&[row(208, "Turkish Lira(TL)", 100.0)]);
    let err = enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::strict())
        .unwrap_err();
    assert!(
        matches!(err, EnrichError::UnknownCurrency { ref description, .. } if description == "Turkish Lira(TL)")
    );
}

#[test]
fn test_unknown_currency_defaults_to_lira() {
    let df = frame(&[row(208, "Turkish Lira(TL)", 100.0)]);
    let (enriched, report) =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap();
    assert_eq!(strings(&enriched, "currency"), [Some("TRY".to_string())]);
    assert!(report.unknown_currencies.contains("Turkish Lira(TL)"));
}

#[test]
fn test_unknown_rating_color_fails() {
    let mut bad = row(30, "Brazilian Real(R$)", 100.0);
    bad.rating_color = "123456";
    let err = enrich_listings(
        &frame(&[bad]),
        &Directories::default(),
        &rates(),
        &EnrichmentOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EnrichError::UnknownRatingColor { ref token, .. } if token == "123456"));
}

#[test]
fn test_injected_rating_color_directory() {
    let mut custom = row(30, "Brazilian Real(R$)", 100.0);
    custom.rating_color = "123456";
    let directories = Directories::default()
        .with_rating_colors(RatingColorDirectory::new([("123456", "teal"), ("9acd32", "olive")]));
    let (enriched, _) = enrich_listings(
        &frame(&[custom, row(30, "Brazilian Real(R$)", 100.0)]),
        &directories,
        &rates(),
        &EnrichmentOptions::default(),
    )
    .unwrap();
    assert_eq!(
        strings(&enriched, "rating_color"),
        [Some("teal".to_string()), Some("olive".to_string())]
    );
}

#[test]
fn test_price_tiers_and_cuisine() {
    let mut rows = Vec::new();
    for (tier, cuisines) in [(1, "Burger"), (2, "Cafe, Bakery"), (3, " Sushi ,Ramen"), (4, "Steak"), (7, "Mystery")] {
        let mut r = row(30, "Brazilian Real(R$)", 100.0);
        r.price_range = tier;
        r.cuisines = cuisines;
        rows.push(r);
    }
    let (enriched, _) = enrich_listings(
        &frame(&rows),
        &Directories::default(),
        &rates(),
        &EnrichmentOptions::default(),
    )
    .unwrap();

    let labels: Vec<_> = strings(&enriched, "price_range_label").into_iter().flatten().collect();
    assert_eq!(labels, ["cheap", "normal", "expensive", "gourmet", "gourmet"]);
    let cuisines: Vec<_> = strings(&enriched, "cuisine").into_iter().flatten().collect();
    assert_eq!(cuisines, ["Burger", "Cafe", "Sushi", "Steak", "Mystery"]);
}

#[test]
fn test_missing_required_column() {
    let df = frame(&[row(30, "Brazilian Real(R$)", 100.0)])
        .drop("currency")
        .unwrap();
    let err =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap_err();
    assert_eq!(err.kind(), EnrichErrorKind::Schema);
    assert!(matches!(err, EnrichError::MissingColumn { ref column } if column == "currency"));
}

#[test]
fn test_non_numeric_cost_fails() {
    let df = frame(&[row(30, "Brazilian Real(R$)", 100.0)]);
    let mut df = df.drop("average_cost_for_two").unwrap();
    df.with_column(Series::new("average_cost_for_two".into(), vec!["a lot"]))
        .unwrap();
    let err =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap_err();
    assert_eq!(err.kind(), EnrichErrorKind::Format);
}

#[test]
fn test_output_schema_and_input_untouched() {
    let df = frame(&[row(30, "Brazilian Real(R$)", 100.0)]);
    let before = df.get_column_names_owned();
    let (enriched, _) =
        enrich_listings(&df, &Directories::default(), &rates(), &EnrichmentOptions::default())
            .unwrap();

    assert_eq!(df.get_column_names_owned(), before);
    let names: Vec<String> = enriched
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(
        names,
        [
            "restaurant_id",
            "restaurant_name",
            "country_code",
            "city",
            "cuisines_raw",
            "average_cost_for_two",
            "currency_raw",
            "price_range",
            "aggregate_rating",
            "rating_color_raw",
            "rating_color",
            "price_range_label",
            "cuisine",
            "currency",
            "country",
            "exchange_rate",
            "price_brl",
        ]
    );
    assert_eq!(enriched.column("average_cost_for_two").unwrap().dtype(), &DataType::Float64);
}
