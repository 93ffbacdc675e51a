//! Data model for the Eat Out listing pipeline.
//!
//! - **schema**: canonical column names and the price tier type
//! - **directory**: country, currency and rating-color lookup tables
//! - **rates**: exchange-rate snapshot
//! - **options**: pipeline and enrichment options
//! - **config**: TOML configuration loading

pub mod config;
pub mod directory;
pub mod error;
pub mod options;
pub mod rates;
pub mod schema;

pub use config::{AppConfig, load_config, parse_config};
pub use directory::{
    CountryDirectory, CurrencyDirectory, DEFAULT_CURRENCY_CODE, Directories, RatingColorDirectory,
};
pub use error::{ConfigError, Result};
pub use options::{EnrichmentOptions, PipelineOptions, UnknownValuePolicy};
pub use rates::{DEFAULT_REPORTING_CURRENCY, ExchangeRateTable};
pub use schema::PriceTier;
