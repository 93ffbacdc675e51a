//! Integration tests for configuration, loading and the dashboard views.

use std::fs;
use std::path::{Path, PathBuf};

use eatout_cli::session::{Session, build_filter, resolve_config};
use eatout_cli::summary::{cities_sections, cuisines_sections, overview_sections, render_sections};
use eatout_cli::views::{cities_view, cuisines_view, overview_view};
use eatout_model::{AppConfig, UnknownValuePolicy};
use tempfile::TempDir;

const LISTINGS: &str = "\
Restaurant ID,Restaurant Name,Country Code,City,Address,Longitude,Latitude,Cuisines,Average Cost for two,Currency,Has Online delivery,Is delivering now,Price range,Aggregate rating,Rating color,Rating text,Votes
1,Garota de Ipanema,30,Rio de Janeiro,Rua A 1,-43.2,-22.98,\"Brazilian, Bar Food\",200,Brazilian Real(R$),0,0,3,4.6,3F7E00,Excellent,900
2,Spice Route,1,New Delhi,Block B,77.21,28.63,\"North Indian, Mughlai\",1500,Indian Rupees(Rs.),1,0,3,4.2,5BA829,Very Good,450
3,Chaat Corner,1,New Delhi,Lane 4,77.23,28.65,Street Food,300,Indian Rupees(Rs.),1,1,1,3.1,CDD614,Average,60
1,Garota de Ipanema,30,Rio de Janeiro,Rua A 1,-43.2,-22.98,\"Brazilian, Bar Food\",200,Brazilian Real(R$),0,0,3,4.6,3F7E00,Excellent,900
5,Feijoada da Vila,30,Sao Paulo,Rua C 3,-46.68,-23.56,Brazilian,120,Brazilian Real(R$),0,0,2,2.4,FF7800,Poor,12
";

const RATES: &str = r#"{"result":"success","base_code":"BRL","conversion_rates":{"BRL":1,"INR":15}}"#;

struct Fixture {
    _dir: TempDir,
    listings: PathBuf,
    rates: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let listings = dir.path().join("zomato.csv");
    let rates = dir.path().join("rates.json");
    fs::write(&listings, LISTINGS).unwrap();
    fs::write(&rates, RATES).unwrap();
    Fixture {
        _dir: dir,
        listings,
        rates,
    }
}

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("eatout.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_cli_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "[pipeline.enrichment]\ncountry_policy = \"fallback\"\nmax_price_brl = 5000.0\n",
    );

    let from_file = resolve_config(Some(&path), false, None).unwrap();
    assert_eq!(from_file.options.enrichment.country_policy, UnknownValuePolicy::Fallback);
    assert_eq!(from_file.options.enrichment.max_price_brl, Some(5000.0));

    let overridden = resolve_config(Some(&path), true, Some(250.0)).unwrap();
    assert_eq!(overridden.options.enrichment.country_policy, UnknownValuePolicy::Fail);
    assert_eq!(overridden.options.enrichment.currency_policy, UnknownValuePolicy::Fail);
    assert_eq!(overridden.options.enrichment.max_price_brl, Some(250.0));
}

#[test]
fn test_invalid_price_bound_flag_is_rejected() {
    assert!(resolve_config(None, false, Some(-1.0)).is_err());
    assert!(resolve_config(None, false, Some(f64::NAN)).is_err());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = resolve_config(Some(&dir.path().join("nope.toml")), false, None).unwrap_err();
    assert!(format!("{err:#}").contains("nope.toml"));
}

#[test]
fn test_session_reuses_unchanged_snapshot() {
    let fixture = fixture();
    let session = Session::new(AppConfig::default());

    let first = session.load(&fixture.listings, &fixture.rates).unwrap();
    let second = session.load(&fixture.listings, &fixture.rates).unwrap();
    assert_eq!(first.snapshot, second.snapshot);
    assert_eq!(first.frame.height(), 4);

    let stats = session.cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));

    fs::write(&fixture.rates, r#"{"BRL": 1, "INR": 10}"#).unwrap();
    let third = session.load(&fixture.listings, &fixture.rates).unwrap();
    assert_ne!(third.snapshot, first.snapshot);
    assert_eq!(session.cache_stats().misses, 2);
}

#[test]
fn test_load_reports_missing_file() {
    let fixture = fixture();
    let session = Session::new(AppConfig::default());
    let err = session
        .load(&fixture.listings, &fixture.rates.with_file_name("missing.json"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn test_overview_view_snapshot() {
    let fixture = fixture();
    let session = Session::new(AppConfig::default());
    let listings = session.load(&fixture.listings, &fixture.rates).unwrap();
    let view = overview_view(&listings.frame, 10).unwrap();

    insta::assert_json_snapshot!(view, @r###"
    {
      "metrics": {
        "countries": 2,
        "restaurants": 4,
        "cities": 3,
        "cuisines": 3,
        "votes": 1422
      },
      "restaurants_per_country": [
        {
          "key": "Brazil",
          "count": 2
        },
        {
          "key": "India",
          "count": 2
        }
      ],
      "cuisines_per_country": [
        {
          "key": "India",
          "count": 2
        },
        {
          "key": "Brazil",
          "count": 1
        }
      ],
      "cities_per_country": [
        {
          "key": "Brazil",
          "count": 2
        },
        {
          "key": "India",
          "count": 1
        }
      ]
    }
    "###);
}

#[test]
fn test_filtered_views() {
    let fixture = fixture();
    let session = Session::new(AppConfig::default());
    let listings = session.load(&fixture.listings, &fixture.rates).unwrap();

    let india = build_filter(&["India".to_string()], (None, None), (None, Some(50.0)))
        .apply(&listings.frame)
        .unwrap();
    assert_eq!(india.height(), 1);

    let cities = cities_view(&listings.frame, 10).unwrap();
    assert_eq!(cities.excellent_cities.len(), 2);
    assert_eq!(cities.poor_cities[0].key, "Sao Paulo");
    assert_eq!(cities.most_expensive_cities[0].keys, ["Rio de Janeiro", "Brazil"]);
    assert_eq!(cities.cheapest_cities[0].keys, ["New Delhi", "India"]);
    assert_eq!(cities.cheapest_cities[0].mean, 60.0);

    let cuisines = cuisines_view(&listings.frame, 10).unwrap();
    assert_eq!(cuisines.top_rated.unwrap().restaurant_name, "Garota de Ipanema");
    assert_eq!(cuisines.lowest_rated.unwrap().restaurant_name, "Feijoada da Vila");
    assert_eq!(cuisines.delivering_cuisines.len(), 2);
}

#[test]
fn test_rendered_sections_name_their_rankings() {
    let fixture = fixture();
    let session = Session::new(AppConfig::default());
    let listings = session.load(&fixture.listings, &fixture.rates).unwrap();
    let frame = &listings.frame;

    let overview = render_sections(&overview_sections(&overview_view(frame, 10).unwrap()));
    assert!(overview.contains("Countries with most restaurants"));
    assert!(overview.contains("Brazil"));

    let cities = render_sections(&cities_sections(&cities_view(frame, 10).unwrap(), "BRL"));
    assert!(cities.contains("Mean price for two (BRL)"));
    assert!(cities.contains("200.00"));

    let cuisines = render_sections(&cuisines_sections(&cuisines_view(frame, 10).unwrap(), "BRL"));
    assert!(cuisines.contains("4.6/5.0 (900 votes)"));
    assert!(cuisines.contains("BRL 200.00"));
}
