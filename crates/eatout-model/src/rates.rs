//! Exchange-rate snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reporting currency assumed when the snapshot does not name one.
pub const DEFAULT_REPORTING_CURRENCY: &str = "BRL";

/// Currency code to conversion rate, expressed as native-currency units per
/// one unit of the reporting currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    base_code: Option<String>,
    rates: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RatesDocument {
    Envelope {
        base_code: Option<String>,
        conversion_rates: BTreeMap<String, f64>,
    },
    Flat(BTreeMap<String, f64>),
}

impl ExchangeRateTable {
    pub fn new<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            base_code: None,
            rates: rates
                .into_iter()
                .map(|(code, rate)| {
                    let code: String = code.into();
                    (code.trim().to_ascii_uppercase(), rate)
                })
                .collect(),
        }
    }

    pub fn with_base_code(mut self, base_code: impl Into<String>) -> Self {
        self.base_code = Some(base_code.into());
        self
    }

    /// Parse either a flat `{"USD": 0.19}` object or an exchange-rate API
    /// envelope carrying `base_code` and `conversion_rates`.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let document: RatesDocument = serde_json::from_str(json)?;
        Ok(match document {
            RatesDocument::Envelope {
                base_code,
                conversion_rates,
            } => {
                let table = Self::new(conversion_rates);
                match base_code {
                    Some(code) => table.with_base_code(code),
                    None => table,
                }
            }
            RatesDocument::Flat(rates) => Self::new(rates),
        })
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_ascii_uppercase()).copied()
    }

    pub fn base_code(&self) -> Option<&str> {
        self.base_code.as_deref()
    }

    /// Currency the converted prices are expressed in.
    pub fn reporting_currency(&self) -> &str {
        self.base_code().unwrap_or(DEFAULT_REPORTING_CURRENCY)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
