//! TOML configuration file.
//!
//! ```toml
//! [pipeline.enrichment]
//! currency_policy = "fail"
//! max_price_brl = 250000.0
//!
//! [countries]
//! 999 = "Atlantis"
//!
//! [currencies]
//! "Turkish Lira(TL)" = "TRY"
//! ```
//!
//! Directory tables extend the built-in directories; an entry with an
//! existing key replaces the built-in value.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::directory::{CountryDirectory, CurrencyDirectory, Directories};
use crate::error::{ConfigError, Result};
use crate::options::PipelineOptions;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    pipeline: PipelineOptions,
    countries: BTreeMap<String, String>,
    currencies: BTreeMap<String, String>,
}

/// Resolved configuration: pipeline options plus the directories to inject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub options: PipelineOptions,
    pub directories: Directories,
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, path)
}

/// Parse configuration text; `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(bound) = file.pipeline.enrichment.max_price_brl
        && !(bound.is_finite() && bound > 0.0)
    {
        return Err(ConfigError::InvalidPriceBound {
            value: bound,
            path: path.to_path_buf(),
        });
    }

    let mut directories = Directories::default();
    if !file.countries.is_empty() {
        let mut countries: BTreeMap<i64, String> = directories
            .countries
            .iter()
            .map(|(code, name)| (code, name.to_string()))
            .collect();
        for (code, name) in file.countries {
            let parsed = code
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidCountryCode {
                    code: code.clone(),
                    path: path.to_path_buf(),
                })?;
            countries.insert(parsed, name);
        }
        directories = directories.with_countries(CountryDirectory::new(countries));
    }
    if !file.currencies.is_empty() {
        let mut currencies: BTreeMap<String, String> = directories
            .currencies
            .iter()
            .map(|(description, code)| (description.to_string(), code.to_string()))
            .collect();
        currencies.extend(file.currencies);
        directories = directories.with_currencies(CurrencyDirectory::new(currencies));
    }

    Ok(AppConfig {
        options: file.pipeline,
        directories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::UnknownValuePolicy;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("", Path::new("eatout.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn invalid_country_code_is_rejected() {
        let err = parse_config("[countries]\nabc = \"Nowhere\"\n", Path::new("eatout.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCountryCode { .. }));
    }

    #[test]
    fn partial_enrichment_table_keeps_other_defaults() {
        let text = "[pipeline.enrichment]\ncurrency_policy = \"fail\"\n";
        let config = parse_config(text, Path::new("eatout.toml")).unwrap();
        let enrichment = &config.options.enrichment;
        assert_eq!(enrichment.currency_policy, UnknownValuePolicy::Fail);
        assert_eq!(enrichment.country_policy, UnknownValuePolicy::Fail);
        assert_eq!(enrichment.default_currency, "TRY");
    }
}
