//! Configuration options for listing processing.

use serde::{Deserialize, Serialize};

use crate::directory::DEFAULT_CURRENCY_CODE;

/// Label used for unknown country codes under [`UnknownValuePolicy::Fallback`].
pub const DEFAULT_UNKNOWN_COUNTRY_LABEL: &str = "Unknown";

/// Upper bound applied to converted prices unless configured otherwise.
pub const DEFAULT_MAX_PRICE_BRL: f64 = 1_000_000.0;

/// What to do when a coded value is missing from its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownValuePolicy {
    /// Stop enrichment of the whole batch.
    Fail,
    /// Substitute the configured default and log a warning.
    Fallback,
}

/// Options for the enrichment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentOptions {
    /// Handling of currency descriptions absent from the currency directory.
    pub currency_policy: UnknownValuePolicy,

    /// Code assigned to unknown currency descriptions under `Fallback`.
    pub default_currency: String,

    /// Handling of country codes absent from the country directory.
    pub country_policy: UnknownValuePolicy,

    /// Country name assigned to unknown codes under `Fallback`.
    pub unknown_country_label: String,

    /// Converted prices above this bound are treated as missing.
    /// `None` disables the check.
    pub max_price_brl: Option<f64>,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            currency_policy: UnknownValuePolicy::Fallback,
            default_currency: DEFAULT_CURRENCY_CODE.to_string(),
            country_policy: UnknownValuePolicy::Fail,
            unknown_country_label: DEFAULT_UNKNOWN_COUNTRY_LABEL.to_string(),
            max_price_brl: Some(DEFAULT_MAX_PRICE_BRL),
        }
    }
}

impl EnrichmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both lookups fail on unknown values.
    pub fn strict() -> Self {
        Self {
            currency_policy: UnknownValuePolicy::Fail,
            country_policy: UnknownValuePolicy::Fail,
            ..Self::default()
        }
    }

    pub fn with_currency_policy(mut self, policy: UnknownValuePolicy) -> Self {
        self.currency_policy = policy;
        self
    }

    pub fn with_default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = code.into();
        self
    }

    pub fn with_country_policy(mut self, policy: UnknownValuePolicy) -> Self {
        self.country_policy = policy;
        self
    }

    pub fn with_max_price_brl(mut self, bound: Option<f64>) -> Self {
        self.max_price_brl = bound;
        self
    }
}

/// Options controlling the whole listing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub enrichment: EnrichmentOptions,
}

impl PipelineOptions {
    pub fn strict() -> Self {
        Self {
            enrichment: EnrichmentOptions::strict(),
        }
    }

    pub fn with_enrichment(mut self, enrichment: EnrichmentOptions) -> Self {
        self.enrichment = enrichment;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_source_behaviour() {
        let options = EnrichmentOptions::default();
        assert_eq!(options.currency_policy, UnknownValuePolicy::Fallback);
        assert_eq!(options.default_currency, "TRY");
        assert_eq!(options.country_policy, UnknownValuePolicy::Fail);
        assert_eq!(options.max_price_brl, Some(DEFAULT_MAX_PRICE_BRL));
    }

    #[test]
    fn strict_fails_both_lookups() {
        let options = PipelineOptions::strict();
        assert_eq!(options.enrichment.currency_policy, UnknownValuePolicy::Fail);
        assert_eq!(options.enrichment.country_policy, UnknownValuePolicy::Fail);
    }
}
